//! 레코드 정규화 모듈
//!
//! 역할 맵이 정해진 표의 데이터 행을 NormalizedRecord로 바꾼다.
//!
//! ## 처리 순서
//! 1. 코드 셀이 빈 행은 건너뜀
//! 2. 로컬코드 → 공통코드 (마스터가 있을 때)
//! 3. 품목명 해석 (마스터 → 파일 자체 컬럼 → "-")
//! 4. 수량 강제 변환, 일자 해석

pub mod classify;
pub mod quantity;

use crate::loader::SheetTable;
use crate::master::CodeMapping;
use crate::types::{ColumnRoleMap, NormalizedRecord};
use chrono::NaiveDate;

pub use classify::{classify_stream, infer_company};
pub use quantity::coerce_quantity;

/// 해석된 표를 정규화 레코드 목록으로 바꾼다
///
/// 호출 전에 코드·수량 역할이 해석되어 있어야 한다.
/// 레코드는 생성 이후 변경되지 않는다.
pub fn normalize_table(
    table: &SheetTable,
    header_idx: usize,
    roles: &ColumnRoleMap,
    company: &str,
    mapping: Option<&CodeMapping>,
    unregistered_name: &str,
) -> Vec<NormalizedRecord> {
    let columns = table.column_names(header_idx);
    let col_idx = |name: &Option<String>| -> Option<usize> {
        name.as_ref().and_then(|n| columns.iter().position(|c| c == n))
    };

    let code_idx = match col_idx(&roles.code) {
        Some(idx) => idx,
        None => return Vec::new(),
    };
    let qty_idx = match col_idx(&roles.quantity) {
        Some(idx) => idx,
        None => return Vec::new(),
    };
    let name_idx = col_idx(&roles.name);
    let date_idx = col_idx(&roles.date);

    let mut records = Vec::new();
    for row in table.data_rows(header_idx) {
        let local_code = cell(row, code_idx);
        if local_code.is_empty() {
            continue;
        }

        let code = match mapping {
            Some(m) => m.canonical_code(company, local_code),
            None => local_code.to_string(),
        };

        let name = resolve_name(&code, row, name_idx, mapping, unregistered_name);

        let (quantity, quantity_was_coerced) = coerce_quantity(cell(row, qty_idx));
        let date = date_idx.and_then(|idx| parse_date(cell(row, idx)));

        records.push(NormalizedRecord {
            date,
            company: company.to_string(),
            code,
            name,
            quantity,
            quantity_was_coerced,
        });
    }

    records
}

/// 품목명 해석
///
/// 마스터가 있으면 마스터 사전이 유일한 출처: 없는 코드는 미등록 표기.
/// 마스터가 없으면 파일 자체의 품목명 컬럼, 그마저 없으면 "-".
fn resolve_name(
    code: &str,
    row: &[String],
    name_idx: Option<usize>,
    mapping: Option<&CodeMapping>,
    unregistered_name: &str,
) -> String {
    match mapping {
        Some(m) => m
            .canonical_name(code)
            .map(String::from)
            .unwrap_or_else(|| unregistered_name.to_string()),
        None => {
            let own = name_idx.map(|idx| cell(row, idx)).unwrap_or("");
            if own.is_empty() {
                "-".to_string()
            } else {
                own.to_string()
            }
        }
    }
}

/// 일자 셀 해석
///
/// 로더가 날짜 셀을 "YYYY-MM-DD HH:MM:SS"로 문자열화하므로
/// 공백 앞부분만 떼어 날짜 형식 몇 가지를 시도한다.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let token = raw.trim().split_whitespace().next()?;

    const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|c| c.trim()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::KeywordConfig;
    use crate::resolver::resolve_roles;

    fn table(rows: Vec<Vec<&str>>) -> SheetTable {
        SheetTable {
            file_name: "가온_매출.xlsx".into(),
            sheet_name: "Sheet1".into(),
            sheet_count: 1,
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    #[test]
    fn test_normalize_without_master() {
        let config = KeywordConfig::default();
        let t = table(vec![
            vec!["바코드", "상품명", "출고(E)", "출고일자"],
            vec!["A100", "위젯", "5", "2024-01-15"],
            vec!["B200", "부품", "1,000", "2024/02/01"],
            vec!["", "이름만", "3", ""],
        ]);
        let roles = resolve_roles(&t.column_names(0), &config);
        let records = normalize_table(&t, 0, &roles, "가온", None, &config.unregistered_name);

        // 코드 빈 행은 제외
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, "A100");
        assert_eq!(records[0].name, "위젯");
        assert_eq!(records[0].quantity, 5.0);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(records[1].quantity, 1000.0);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert!(records.iter().all(|r| r.company == "가온"));
    }

    #[test]
    fn test_normalize_with_master() {
        let config = KeywordConfig::default();
        let master = table(vec![
            vec!["한국코드", "품목명", "하은코드"],
            vec!["K001", "위젯", "X1"],
        ]);
        let mapping = CodeMapping::from_table(&master, &config).unwrap();

        let t = table(vec![
            vec!["코드", "품명", "재고수량"],
            vec!["X1", "하은식이름", "7"],
            vec!["X9", "미지품목", "2"],
        ]);
        let roles = resolve_roles(&t.column_names(0), &config);
        let records =
            normalize_table(&t, 0, &roles, "하은", Some(&mapping), &config.unregistered_name);

        // 매핑된 코드는 공통코드 + 마스터 이름
        assert_eq!(records[0].code, "K001");
        assert_eq!(records[0].name, "위젯");
        // 매핑 없는 코드는 통과 + 미등록 표기
        assert_eq!(records[1].code, "X9");
        assert_eq!(records[1].name, "미등록 품목");
    }

    #[test]
    fn test_name_fallback_dash() {
        let config = KeywordConfig::default();
        let t = table(vec![
            vec!["코드", "수량"],
            vec!["A1", "4"],
        ]);
        let roles = resolve_roles(&t.column_names(0), &config);
        let records = normalize_table(&t, 0, &roles, "기타", None, &config.unregistered_name);
        assert_eq!(records[0].name, "-");
    }

    #[test]
    fn test_coerced_quantity_flagged() {
        let config = KeywordConfig::default();
        let t = table(vec![
            vec!["코드", "수량"],
            vec!["A1", "확인중"],
            vec!["A2", "0"],
        ]);
        let roles = resolve_roles(&t.column_names(0), &config);
        let records = normalize_table(&t, 0, &roles, "기타", None, &config.unregistered_name);

        // 해석 불가 → 0 + 플래그, 진짜 0은 플래그 없음
        assert_eq!(records[0].quantity, 0.0);
        assert!(records[0].quantity_was_coerced);
        assert_eq!(records[1].quantity, 0.0);
        assert!(!records[1].quantity_was_coerced);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-15"), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(parse_date("2024/1/5"), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(parse_date("2024.01.15"), NaiveDate::from_ymd_opt(2024, 1, 15));
        // 로더의 날짜 문자열화 형태
        assert_eq!(
            parse_date("2024-01-15 00:00:00"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(parse_date("미정"), None);
        assert_eq!(parse_date(""), None);
    }
}
