//! 셀 그리드 로더
//!
//! 엑셀 리소스(xlsx/xls/ods)를 시트별 문자열 그리드로 읽는다.
//! 머리글 해석은 하지 않는다. 해석은 locator/resolver의 몫.

use crate::error::{LogiMergeError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 머리글 탐색 시 살펴보는 최대 행 수
pub const HEADER_SCAN_ROWS: usize = 20;

/// 한 시트의 원본 그리드
///
/// 모든 셀은 문자열로 읽는다. 머리글 행 번호가 정해지면
/// `column_names`/`data_rows`로 해석된 표 형태를 얻는다.
#[derive(Debug, Clone)]
pub struct SheetTable {
    /// 원본 파일명 (경로 제외)
    pub file_name: String,
    pub sheet_name: String,
    /// 이 파일의 전체 시트 수 (스트림 분류에 사용)
    pub sheet_count: usize,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// 머리글 탐색용 프리뷰 (앞 `limit`행)
    pub fn preview(&self, limit: usize) -> &[Vec<String>] {
        let end = self.rows.len().min(limit);
        &self.rows[..end]
    }

    /// 머리글 행의 컬럼명 목록 (앞뒤 공백 제거)
    pub fn column_names(&self, header_idx: usize) -> Vec<String> {
        self.rows
            .get(header_idx)
            .map(|row| row.iter().map(|c| c.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// 머리글 아래의 데이터 행들
    pub fn data_rows(&self, header_idx: usize) -> &[Vec<String>] {
        if header_idx + 1 >= self.rows.len() {
            return &[];
        }
        &self.rows[header_idx + 1..]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|c| c.trim().is_empty()))
    }
}

/// 엑셀 파일의 모든 시트를 읽는다
///
/// 깨진 파일·지원하지 않는 형식은 `UnreadableSource`.
/// 해당 파일에만 치명적이고 배치 전체는 계속된다.
pub fn load_workbook(path: &Path) -> Result<Vec<SheetTable>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if !path.exists() {
        return Err(LogiMergeError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| LogiMergeError::UnreadableSource {
        file: file_name.clone(),
        reason: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    let sheet_count = sheet_names.len();
    let mut tables = Vec::with_capacity(sheet_count);

    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| LogiMergeError::UnreadableSource {
                file: file_name.clone(),
                reason: format!("시트 '{}' 읽기 실패: {}", sheet_name, e),
            })?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        tables.push(SheetTable {
            file_name: file_name.clone(),
            sheet_name,
            sheet_count,
            rows,
        });
    }

    Ok(tables)
}

/// 셀 값을 문자열로 변환
///
/// 소수부 없는 실수는 정수 표기로 (코드 "1001.0" 방지).
/// 날짜 셀은 "YYYY-MM-DD HH:MM:SS" 형태로.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}
