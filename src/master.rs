//! 코드 매핑 마스터 모듈
//!
//! 업체별 로컬 품목코드를 공통코드로 바꾸는 매핑 테이블.
//! 마스터 파일(첫 시트)에서 배치 시작 시 한 번 만들고,
//! 이후에는 읽기 전용으로 공유한다.

use crate::error::{LogiMergeError, Result};
use crate::keywords::KeywordConfig;
use crate::loader::{SheetTable, HEADER_SCAN_ROWS};
use crate::locator::locate_header;
use std::collections::HashMap;

/// 업체별 로컬코드 → 공통코드 매핑과 공통코드 → 품목명 사전
#[derive(Debug, Clone, Default)]
pub struct CodeMapping {
    by_company: HashMap<String, HashMap<String, String>>,
    name_by_code: HashMap<String, String>,
    home_company: String,
}

impl CodeMapping {
    /// 마스터 시트에서 매핑을 만든다
    ///
    /// 공통코드 컬럼: 자사 표기+"코드"를 함께 가진 컬럼 우선,
    /// 없으면 "품목코드" 포함 컬럼, 그래도 없으면 첫 컬럼.
    /// 품목명 컬럼: "품목명" 포함 첫 컬럼.
    /// 나머지 컬럼 중 업체명이 들어간 컬럼마다 로컬코드 사전을 만든다.
    pub fn from_table(table: &SheetTable, config: &KeywordConfig) -> Result<Self> {
        // 마스터에도 제목 행이 붙어 올 수 있어 같은 탐지기를 쓴다.
        // 실패하면 첫 행을 머리글로 간주.
        let header_idx = locate_header(table.preview(HEADER_SCAN_ROWS), config).unwrap_or(0);
        let columns = table.column_names(header_idx);
        let data_rows = table.data_rows(header_idx);

        if columns.is_empty() || data_rows.is_empty() {
            return Err(LogiMergeError::InvalidMaster(
                "매핑 데이터가 비어 있습니다".into(),
            ));
        }

        let canonical_idx = find_canonical_code_column(&columns, &config.home_company);
        let name_idx = columns.iter().position(|c| c.contains("품목명"));

        let mut name_by_code = HashMap::new();
        if let Some(name_idx) = name_idx {
            for row in data_rows {
                let code = cell(row, canonical_idx);
                let name = cell(row, name_idx);
                if !code.is_empty() && !name.is_empty() {
                    name_by_code.insert(code.to_string(), name.to_string());
                }
            }
        }

        let mut by_company: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (idx, column) in columns.iter().enumerate() {
            if idx == canonical_idx || Some(idx) == name_idx {
                continue;
            }
            let supplier = match config.suppliers.iter().find(|s| column.contains(s.as_str())) {
                Some(s) => s,
                None => continue,
            };

            let dict = by_company.entry(supplier.clone()).or_default();
            for row in data_rows {
                let local = cell(row, idx);
                let canonical = cell(row, canonical_idx);
                if !local.is_empty() && !canonical.is_empty() {
                    dict.insert(local.to_string(), canonical.to_string());
                }
            }
        }

        Ok(Self {
            by_company,
            name_by_code,
            home_company: config.home_company.clone(),
        })
    }

    /// 로컬코드를 공통코드로 변환
    ///
    /// 자사 코드는 그대로 공통코드다. 매핑에 없는 코드도
    /// 버리지 않고 그대로 통과시킨다.
    pub fn canonical_code(&self, company: &str, local: &str) -> String {
        if company == self.home_company {
            return local.to_string();
        }
        self.by_company
            .get(company)
            .and_then(|dict| dict.get(local))
            .cloned()
            .unwrap_or_else(|| local.to_string())
    }

    /// 공통코드의 대표 품목명
    pub fn canonical_name(&self, code: &str) -> Option<&str> {
        self.name_by_code.get(code).map(|s| s.as_str())
    }

    /// 매핑이 등록된 업체 수
    pub fn company_count(&self) -> usize {
        self.by_company.len()
    }
}

fn find_canonical_code_column(columns: &[String], home_company: &str) -> usize {
    columns
        .iter()
        .position(|c| c.contains(home_company) && c.contains("코드"))
        .or_else(|| columns.iter().position(|c| c.contains("품목코드")))
        .unwrap_or(0)
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|c| c.trim()).unwrap_or("")
}
