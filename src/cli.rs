use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logi-merge")]
#[command(about = "물류 재고·매출 엑셀 통합 도구 (업체별 양식 자동 인식)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 엑셀 파일들을 통합해 재고/매출 요약을 만든다
    Merge {
        /// 입력 엑셀 파일 또는 폴더 (폴더는 바로 아래만 스캔)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// 코드 매핑 마스터 파일 (업체별 로컬코드 → 공통코드)
        #[arg(short, long)]
        master: Option<PathBuf>,

        /// 출력 파일/폴더 (기본: 현재 폴더)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 출력 형식 (excel/json/both)
        #[arg(short, long, default_value = "excel")]
        format: ReportFormat,

        /// TOP 랭킹 표시 개수
        #[arg(short, long, default_value = "5")]
        top: usize,

        /// 키워드 설정 JSON (기본 키워드 테이블 덮어쓰기)
        #[arg(short, long)]
        keywords: Option<PathBuf>,
    },

    /// 파일 하나의 머리글 위치와 컬럼 해석 결과를 보여준다
    Inspect {
        /// 검사할 엑셀 파일
        #[arg(required = true)]
        file: PathBuf,

        /// 키워드 설정 JSON
        #[arg(short, long)]
        keywords: Option<PathBuf>,
    },
}

#[derive(Clone, Debug, Default)]
pub enum ReportFormat {
    #[default]
    Excel,
    Json,
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "json" => Ok(ReportFormat::Json),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("알 수 없는 형식: {}. excel, json, both 중 하나", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Excel => write!(f, "excel"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Both => write!(f, "both"),
        }
    }
}
