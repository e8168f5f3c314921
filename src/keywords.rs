//! 키워드 테이블 모듈
//!
//! 머리글 탐지·컬럼 해석·업체 추정에 쓰이는 키워드 목록을
//! 코드가 아닌 데이터로 관리한다. 새 업체 양식이 나타나면
//! 제어 흐름을 건드리지 않고 목록만 늘리면 된다.

use crate::error::{LogiMergeError, Result};
use serde::{Deserialize, Serialize};

/// 역할별 키워드·업체 레지스트리 설정
///
/// 각 목록은 우선순위 순서 (구체적인 표현이 앞). JSON 파일로
/// 덮어쓸 수 있으며, 파일에 없는 항목은 기본값이 유지된다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordConfig {
    /// 품목코드 컬럼 후보
    pub code: Vec<String>,
    /// 품목명 컬럼 후보
    pub name: Vec<String>,
    /// 수량 컬럼 후보
    pub quantity: Vec<String>,
    /// 수량 후보에서 제외할 토큰 (날짜·금액·단가 계열)
    pub quantity_exclude: Vec<String>,
    /// 일자 컬럼 후보
    pub date: Vec<String>,
    /// 업체 컬럼 후보
    pub company: Vec<String>,
    /// 알려진 업체명 레지스트리 (순서대로 첫 일치 우선)
    pub suppliers: Vec<String>,
    /// 자사(기준) 업체: 이 업체의 코드가 곧 공통코드
    pub home_company: String,
    /// 매출 스트림 판별 키워드
    pub sales_markers: Vec<String>,
    /// 재고 스트림 판별 키워드
    pub stock_markers: Vec<String>,
    /// 주석 행 표시 글리프 (첫 셀이 이 글자로 시작하면 메타데이터)
    pub annotation_marker: String,
    /// 레지스트리에 없는 업체의 태그
    pub fallback_company: String,
    /// 마스터에 없는 품목의 표시명
    pub unregistered_name: String,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            code: vec![
                "품목코드".into(),
                "바코드".into(),
                "상품코드".into(),
                "내부코드".into(),
                "코드".into(),
                "Code".into(),
            ],
            name: vec![
                "품목명".into(),
                "품명".into(),
                "상품명".into(),
                "규격".into(),
                "상품".into(),
            ],
            quantity: vec![
                "재고수량".into(),
                "가용재고".into(),
                "장부재고".into(),
                "총재고".into(),
                "재고".into(),
                "출고(E)".into(),
                "출고".into(),
                "수량".into(),
                "매출".into(),
            ],
            quantity_exclude: vec![
                "일자".into(),
                "날짜".into(),
                "금액".into(),
                "단가".into(),
                "오류".into(),
            ],
            date: vec!["일자".into(), "날짜".into(), "일시".into()],
            company: vec!["업체".into(), "거래처".into(), "공급처".into()],
            suppliers: vec!["하은".into(), "한국".into(), "가온".into(), "다이소".into()],
            home_company: "한국".into(),
            sales_markers: vec!["판매".into(), "매출".into(), "출고".into()],
            stock_markers: vec!["재고".into()],
            annotation_marker: "※".into(),
            fallback_company: "기타".into(),
            unregistered_name: "미등록 품목".into(),
        }
    }
}

impl KeywordConfig {
    /// JSON 파일에서 읽어 기본값 위에 병합
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON 문자열에서 읽어 기본값 위에 병합
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: KeywordOverrides = serde_json::from_str(json)?;
        let mut config = Self::default();
        config.merge(overrides);
        if config.code.is_empty() || config.quantity.is_empty() {
            return Err(LogiMergeError::Keywords(
                "코드/수량 키워드 목록은 비울 수 없습니다".into(),
            ));
        }
        Ok(config)
    }

    /// 덮어쓰기 병합: 파일에 있는 목록이 기본 목록을 대체
    fn merge(&mut self, other: KeywordOverrides) {
        macro_rules! take {
            ($field:ident) => {
                if let Some(v) = other.$field {
                    self.$field = v;
                }
            };
        }
        take!(code);
        take!(name);
        take!(quantity);
        take!(quantity_exclude);
        take!(date);
        take!(company);
        take!(suppliers);
        take!(home_company);
        take!(sales_markers);
        take!(stock_markers);
        take!(annotation_marker);
        take!(fallback_company);
        take!(unregistered_name);
    }
}

/// JSON에서 부분 지정을 허용하기 위한 중간 형태
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct KeywordOverrides {
    code: Option<Vec<String>>,
    name: Option<Vec<String>>,
    quantity: Option<Vec<String>>,
    quantity_exclude: Option<Vec<String>>,
    date: Option<Vec<String>>,
    company: Option<Vec<String>>,
    suppliers: Option<Vec<String>>,
    home_company: Option<String>,
    sales_markers: Option<Vec<String>>,
    stock_markers: Option<Vec<String>>,
    annotation_marker: Option<String>,
    fallback_company: Option<String>,
    unregistered_name: Option<String>,
}

/// 순서 있는 키워드 목록에서 첫 일치를 찾는다
///
/// 부분 문자열 포함 검사. 목록 순서가 우선순위다.
pub fn first_match<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .find(|key| text.contains(key.as_str()))
        .map(|key| key.as_str())
}

/// 제외 토큰을 가진 첫 일치 검사
///
/// 키워드가 포함되어도 제외 토큰이 함께 있으면 실격.
pub fn matches_excluding(text: &str, keywords: &[String], exclusions: &[String]) -> bool {
    if exclusions.iter().any(|ex| text.contains(ex.as_str())) {
        return false;
    }
    keywords.iter().any(|key| text.contains(key.as_str()))
}
