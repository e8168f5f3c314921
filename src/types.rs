//! 공통 타입 정의
//!
//! 파이프라인 전체에서 공유되는 타입:
//! - NormalizedRecord: 정규화된 1행 (업체·코드·수량)
//! - StreamKind: 재고/매출 스트림 구분
//! - InputOutcome: 파일(시트)별 처리 결과

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 레코드가 속하는 스트림 (재고 또는 매출)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreamKind {
    Stock,
    Sales,
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Stock => write!(f, "재고"),
            StreamKind::Sales => write!(f, "매출"),
        }
    }
}

/// 정규화된 레코드
///
/// 수량은 항상 유한한 수치. 해석 불가능한 입력은 0으로 강제 변환되며
/// `quantity_was_coerced`에 그 사실이 남는다 (집계 값은 변하지 않음).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub date: Option<NaiveDate>,
    pub company: String,
    pub code: String,
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub quantity_was_coerced: bool,
}

/// 컬럼 역할 매핑
///
/// 시트의 실제 컬럼명을 다섯 가지 의미 역할에 대응시킨 결과.
/// 해석되지 않은 역할은 None (에러 아님).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRoleMap {
    pub code: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub date: Option<String>,
    pub company: Option<String>,
}

impl ColumnRoleMap {
    /// 필수 역할(코드·수량) 중 빠진 것의 이름 목록
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.code.is_none() {
            missing.push("코드");
        }
        if self.quantity.is_none() {
            missing.push("수량");
        }
        missing
    }
}

/// 파일(시트) 단위 처리 결과
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum Outcome {
    /// 정상 처리: 스트림과 레코드 수
    Success { stream: StreamKind, records: usize },
    /// 해당 입력만 건너뜀 (사유 포함)
    Warning { reason: String },
    /// 해당 입력만 실패 (사유 포함)
    Error { reason: String },
}

/// 입력별 진단 메시지
///
/// 배치 전체는 항상 끝까지 수행되고, 입력마다 결과가 하나씩 남는다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputOutcome {
    /// "파일명" 또는 "파일명#시트명"
    pub source: String,
    pub outcome: Outcome,
}
