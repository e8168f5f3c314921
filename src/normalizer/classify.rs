//! 업체 추정과 스트림 분류
//!
//! 업체는 파일명(필요하면 시트명)에서, 스트림(재고/매출)은
//! 컨테이너 이름에서 키워드로 판별한다. 둘 다 코드 변환과는
//! 독립적으로, 변환보다 먼저 일어난다.

use crate::keywords::{first_match, KeywordConfig};
use crate::types::StreamKind;

/// 파일명·시트명에서 업체 태그를 추정한다
///
/// 레지스트리 순서대로 첫 일치가 승자. 파일명을 먼저 보고,
/// 없으면 시트명. 둘 다 없으면 기타 태그.
pub fn infer_company(file_name: &str, sheet_name: &str, config: &KeywordConfig) -> String {
    first_match(file_name, &config.suppliers)
        .or_else(|| first_match(sheet_name, &config.suppliers))
        .map(String::from)
        .unwrap_or_else(|| config.fallback_company.clone())
}

/// 컨테이너 이름으로 재고/매출 스트림을 판별한다
///
/// 시트가 여럿인 파일은 시트명이 컨테이너, 단일 시트면 파일명.
/// 매출 키워드를 먼저 검사하고, 다음 재고 키워드.
/// 어느 쪽도 아니면 None. 해당 입력은 두 스트림 모두에서 제외된다.
pub fn classify_stream(
    file_name: &str,
    sheet_name: &str,
    sheet_count: usize,
    config: &KeywordConfig,
) -> Option<StreamKind> {
    let container = if sheet_count > 1 { sheet_name } else { file_name };

    if first_match(container, &config.sales_markers).is_some() {
        return Some(StreamKind::Sales);
    }
    if first_match(container, &config.stock_markers).is_some() {
        return Some(StreamKind::Stock);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_company_from_filename() {
        let config = KeywordConfig::default();
        assert_eq!(infer_company("하은_재고.xlsx", "Sheet1", &config), "하은");
        assert_eq!(infer_company("가온_매출.xlsx", "Sheet1", &config), "가온");
        assert_eq!(infer_company("2024_다이소_출고.xls", "Sheet1", &config), "다이소");
    }

    #[test]
    fn test_infer_company_registry_order() {
        let config = KeywordConfig::default();
        // 파일명에 두 업체가 다 있으면 레지스트리에서 앞선 쪽
        assert_eq!(infer_company("하은_가온_통합.xlsx", "Sheet1", &config), "하은");
    }

    #[test]
    fn test_infer_company_sheet_fallback_then_other() {
        let config = KeywordConfig::default();
        assert_eq!(infer_company("2024재고.xlsx", "가온재고", &config), "가온");
        assert_eq!(infer_company("수기입력.xlsx", "Sheet1", &config), "기타");
    }

    #[test]
    fn test_classify_single_sheet_uses_filename() {
        let config = KeywordConfig::default();
        assert_eq!(
            classify_stream("하은_재고.xlsx", "Sheet1", 1, &config),
            Some(StreamKind::Stock)
        );
        assert_eq!(
            classify_stream("가온_매출.xlsx", "Sheet1", 1, &config),
            Some(StreamKind::Sales)
        );
        // 판매 키워드도 매출 스트림
        assert_eq!(
            classify_stream("다이소_판매현황.xlsx", "Sheet1", 1, &config),
            Some(StreamKind::Sales)
        );
    }

    #[test]
    fn test_classify_multi_sheet_uses_sheet_name() {
        let config = KeywordConfig::default();
        // 시트가 여럿이면 파일명이 아니라 시트명으로 판별
        assert_eq!(
            classify_stream("하은_통합.xlsx", "재고", 2, &config),
            Some(StreamKind::Stock)
        );
        assert_eq!(
            classify_stream("하은_통합.xlsx", "월별매출", 2, &config),
            Some(StreamKind::Sales)
        );
    }

    #[test]
    fn test_sales_markers_win_over_stock() {
        let config = KeywordConfig::default();
        // "매출재고대비" 같은 이름은 매출 키워드가 먼저 잡힌다
        assert_eq!(
            classify_stream("매출재고대비.xlsx", "Sheet1", 1, &config),
            Some(StreamKind::Sales)
        );
    }

    #[test]
    fn test_unclassified_is_none() {
        let config = KeywordConfig::default();
        assert_eq!(classify_stream("미분류자료.xlsx", "Sheet1", 1, &config), None);
        assert_eq!(classify_stream("통합.xlsx", "Sheet1", 2, &config), None);
    }
}
