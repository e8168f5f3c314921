use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogiMergeError {
    #[error("엑셀 파일을 읽을 수 없습니다: {file} ({reason})")]
    UnreadableSource { file: String, reason: String },

    #[error("표 머리글(품목코드/바코드 등)을 찾을 수 없습니다")]
    HeaderNotFound,

    #[error("핵심 칸({missing})을 찾지 못했습니다 (확인된 컬럼: {found})")]
    ColumnUnresolved { missing: String, found: String },

    #[error("매핑 마스터 파일이 불량합니다: {0}")]
    InvalidMaster(String),

    #[error("파일이 없습니다: {0}")]
    FileNotFound(String),

    #[error("키워드 설정 오류: {0}")]
    Keywords(String),

    #[error("JSON 해석 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("보고서 생성 오류: {0}")]
    ReportWrite(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, LogiMergeError>;
