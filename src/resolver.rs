//! 컬럼 해석 모듈
//!
//! 업체마다 제각각인 컬럼명을 다섯 가지 의미 역할
//! (코드·품명·수량·일자·업체)에 대응시킨다.
//! 순수 함수: 입출력이 컬럼명 목록과 키워드 테이블뿐이다.

use crate::keywords::KeywordConfig;
use crate::types::ColumnRoleMap;

/// 우선순위 목록으로 컬럼 하나를 고른다
///
/// 키워드 목록 순서가 바깥 루프: 목록에서 앞선 키워드가
/// 표에서 뒤에 있는 컬럼이라도 먼저 뽑힌다.
fn pick_column<'a>(columns: &'a [String], keywords: &[String]) -> Option<&'a str> {
    for key in keywords {
        if let Some(found) = columns.iter().find(|c| c.contains(key.as_str())) {
            return Some(found.as_str());
        }
    }
    None
}

/// 수량 컬럼 전용: 제외 토큰이 포함된 컬럼은 건너뛴다
///
/// "출고일자" 같은 날짜 컬럼이나 "출고금액" 같은 금액 컬럼이
/// 수량으로 잡히는 것을 막는다.
fn pick_quantity_column<'a>(
    columns: &'a [String],
    keywords: &[String],
    exclusions: &[String],
) -> Option<&'a str> {
    for key in keywords {
        let found = columns.iter().find(|c| {
            c.contains(key.as_str()) && !exclusions.iter().any(|ex| c.contains(ex.as_str()))
        });
        if let Some(found) = found {
            return Some(found.as_str());
        }
    }
    None
}

/// 컬럼명 목록을 역할 맵으로 해석한다
///
/// 해석되지 않은 역할은 None으로 남는다. 필수 역할 검증은
/// 호출 측(파이프라인)의 몫이다.
pub fn resolve_roles(columns: &[String], config: &KeywordConfig) -> ColumnRoleMap {
    ColumnRoleMap {
        code: pick_column(columns, &config.code).map(String::from),
        name: pick_column(columns, &config.name).map(String::from),
        quantity: pick_quantity_column(columns, &config.quantity, &config.quantity_exclude)
            .map(String::from),
        date: pick_column(columns, &config.date).map(String::from),
        company: pick_column(columns, &config.company).map(String::from),
    }
}
