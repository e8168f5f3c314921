//! 수량 강제 변환
//!
//! 천단위 콤마·공백·단위 표기가 섞인 수량 텍스트를 숫자로 바꾼다.
//! 해석 불가능하면 0. 행을 버리지 않는다 (집계 누락 방지).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMERIC: Regex = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();
}

/// 수량 텍스트를 (값, 강제변환 여부)로 변환
///
/// 반환 플래그는 "0이 진짜 0인지"를 구분하기 위한 것:
/// 비어 있지 않은 입력이 끝내 해석되지 않아 0이 된 경우에만 true.
/// 단위가 붙은 "1,234개"처럼 숫자를 건져낸 경우는 false.
pub fn coerce_quantity(raw: &str) -> (f64, bool) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (0.0, false);
    }

    // 천단위 콤마와 공백(일반·NBSP) 제거
    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && *c != ' ' && *c != '\u{a0}')
        .collect();

    if let Ok(value) = cleaned.parse::<f64>() {
        if value.is_finite() {
            return (value, false);
        }
    }

    // "1234개", "재고:5" 같은 노이즈 속 첫 숫자를 건진다
    if let Some(m) = NUMERIC.find(&cleaned) {
        if let Ok(value) = m.as_str().parse::<f64>() {
            return (value, false);
        }
    }

    (0.0, true)
}
