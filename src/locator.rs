//! 머리글 탐지 모듈
//!
//! 제목·메타데이터 행이 섞인 그리드에서 진짜 컬럼 머리글 행을 찾는다.
//! 키워드 하나만 세는 방식은 본문 문장에 오탐이 많아서,
//! 역할(코드/품명/수량) 커버리지로 점수를 매긴다.

use crate::error::{LogiMergeError, Result};
use crate::keywords::{matches_excluding, KeywordConfig};

/// 행 하나의 점수 (0~3)
///
/// 역할마다 해당 키워드가 어느 셀에든 포함되면 +1.
/// 같은 역할 키워드가 여러 번 나와도 1점.
/// 수량 역할은 제외 토큰(일자/금액/단가 등)이 함께 있는 셀을 무시한다.
pub fn score_row(row: &[String], config: &KeywordConfig) -> u32 {
    let mut score = 0;

    if row.iter().any(|cell| config.code.iter().any(|k| cell.contains(k.as_str()))) {
        score += 1;
    }
    if row.iter().any(|cell| config.name.iter().any(|k| cell.contains(k.as_str()))) {
        score += 1;
    }
    if row
        .iter()
        .any(|cell| matches_excluding(cell, &config.quantity, &config.quantity_exclude))
    {
        score += 1;
    }

    score
}

/// 프리뷰 그리드에서 머리글 행 번호를 찾는다
///
/// 첫 셀이 주석 글리프로 시작하는 행은 메타데이터로 보고 건너뛴다.
/// 최고 점수 행이 승자, 동점이면 앞선(낮은) 행. 전부 0점이면 실패.
pub fn locate_header(grid: &[Vec<String>], config: &KeywordConfig) -> Result<usize> {
    let mut best: Option<(usize, u32)> = None;

    for (idx, row) in grid.iter().enumerate() {
        if let Some(first) = row.first() {
            if first.trim_start().starts_with(config.annotation_marker.as_str()) {
                continue;
            }
        }

        let score = score_row(row, config);
        if score == 0 {
            continue;
        }

        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }

    best.map(|(idx, _)| idx).ok_or(LogiMergeError::HeaderNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_score_by_role_coverage() {
        let config = KeywordConfig::default();
        // 역할 3개 전부
        assert_eq!(score_row(&row(&["코드", "품명", "수량"]), &config), 3);
        // 역할 2개
        assert_eq!(score_row(&row(&["코드", "품명", "비고"]), &config), 2);
        // 같은 역할 키워드 중복은 1점
        assert_eq!(score_row(&row(&["코드", "바코드", "상품코드"]), &config), 1);
        // 아무것도 없음
        assert_eq!(score_row(&row(&["안녕하세요", "메모"]), &config), 0);
    }

    #[test]
    fn test_quantity_exclusion_in_score() {
        let config = KeywordConfig::default();
        // "출고일자"는 수량이 아니라 날짜 → 수량 점수 없음
        assert_eq!(score_row(&row(&["출고일자"]), &config), 0);
        assert_eq!(score_row(&row(&["출고"]), &config), 1);
    }

    #[test]
    fn test_locate_header_with_preamble() {
        let config = KeywordConfig::default();
        let grid = vec![
            row(&["2024년 1월 재고 현황 보고서"]),
            row(&["작성: 물류팀"]),
            row(&["코드", "품명", "재고수량"]),
            row(&["A100", "위젯", "10"]),
        ];
        assert_eq!(locate_header(&grid, &config).unwrap(), 2);
    }

    #[test]
    fn test_locate_header_ties_keep_first() {
        let config = KeywordConfig::default();
        // 두 행 모두 3점이면 앞선 행이 승자
        let grid = vec![
            row(&["코드", "품명", "수량"]),
            row(&["바코드", "상품명", "출고"]),
        ];
        assert_eq!(locate_header(&grid, &config).unwrap(), 0);
    }

    #[test]
    fn test_higher_score_wins_over_earlier_row() {
        let config = KeywordConfig::default();
        // 본문에 "코드"가 한 번 스친 행보다 역할 커버리지가 넓은 행이 승자
        let grid = vec![
            row(&["관리 코드 체계 안내문"]),
            row(&["코드", "품명", "가용재고"]),
        ];
        assert_eq!(locate_header(&grid, &config).unwrap(), 1);
    }

    #[test]
    fn test_annotation_row_skipped() {
        let config = KeywordConfig::default();
        // 주석 행에 키워드가 있어도 무시
        let grid = vec![
            row(&["※ 코드, 품명, 수량은 매주 갱신"]),
            row(&["코드", "품명", "수량"]),
        ];
        assert_eq!(locate_header(&grid, &config).unwrap(), 1);
    }

    #[test]
    fn test_no_header_found() {
        let config = KeywordConfig::default();
        let grid = vec![row(&["메모"]), row(&["안내문"])];
        assert!(matches!(
            locate_header(&grid, &config),
            Err(LogiMergeError::HeaderNotFound)
        ));
    }

    #[test]
    fn test_deterministic() {
        let config = KeywordConfig::default();
        let grid = vec![
            row(&["제목"]),
            row(&["바코드", "상품명", "출고(E)"]),
            row(&["A", "B", "5"]),
        ];
        let first = locate_header(&grid, &config).unwrap();
        for _ in 0..10 {
            assert_eq!(locate_header(&grid, &config).unwrap(), first);
        }
    }
}
