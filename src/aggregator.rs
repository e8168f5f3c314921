//! 집계 모듈
//!
//! 정규화 레코드를 피벗 요약으로 합친다.
//! 업체·품목 모두 처음 등장한 순서를 유지한다 (결정적 출력).

use crate::types::NormalizedRecord;
use serde::Serialize;
use std::collections::HashMap;

/// 피벗 한 행: (공통코드, 품목명)별 업체 수량과 합계
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotRow {
    pub code: String,
    pub name: String,
    /// `PivotTable::companies` 순서대로의 수량
    pub quantities: Vec<f64>,
    pub total: f64,
}

/// (코드, 품목명) × 업체 피벗 테이블
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotTable {
    /// 처음 등장한 순서의 업체 목록
    pub companies: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 전체 수량 합계
    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(|r| r.total).sum()
    }

    /// 업체별 수량 합계 (`companies` 순서)
    pub fn company_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.companies.len()];
        for row in &self.rows {
            for (idx, qty) in row.quantities.iter().enumerate() {
                totals[idx] += qty;
            }
        }
        totals
    }

    /// 수량 합계가 가장 큰 업체
    pub fn top_company(&self) -> Option<&str> {
        let totals = self.company_totals();
        let mut best: Option<(usize, f64)> = None;
        for (idx, total) in totals.iter().enumerate() {
            match best {
                Some((_, best_total)) if *total <= best_total => {}
                _ => best = Some((idx, *total)),
            }
        }
        best.map(|(idx, _)| self.companies[idx].as_str())
    }
}

/// 레코드 목록을 피벗으로 집계한다
///
/// 그룹 키는 (코드, 품목명), 업체가 컬럼, 수량 합산, 빈 조합은 0.
pub fn build_pivot(records: &[NormalizedRecord]) -> PivotTable {
    // 1차 통과: 업체 목록을 처음 등장 순서로 확정
    let mut companies: Vec<String> = Vec::new();
    let mut company_idx: HashMap<&str, usize> = HashMap::new();
    for record in records {
        if !company_idx.contains_key(record.company.as_str()) {
            company_idx.insert(record.company.as_str(), companies.len());
            companies.push(record.company.clone());
        }
    }

    // 2차 통과: 행 채우기
    let mut rows: Vec<PivotRow> = Vec::new();
    let mut row_idx: HashMap<(String, String), usize> = HashMap::new();
    for record in records {
        let key = (record.code.clone(), record.name.clone());
        let idx = *row_idx.entry(key).or_insert_with(|| {
            rows.push(PivotRow {
                code: record.code.clone(),
                name: record.name.clone(),
                quantities: vec![0.0; companies.len()],
                total: 0.0,
            });
            rows.len() - 1
        });
        let col = company_idx[record.company.as_str()];
        rows[idx].quantities[col] += record.quantity;
        rows[idx].total += record.quantity;
    }

    PivotTable { companies, rows }
}

/// 월 × 업체 추이 행
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    /// "YYYY-MM"
    pub month: String,
    pub quantities: Vec<f64>,
}

/// 월별 추이 테이블 (매출 스트림 전용)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendTable {
    pub companies: Vec<String>,
    /// 월 오름차순
    pub rows: Vec<TrendRow>,
}

impl TrendTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 일자를 달력 월로 버킷팅해 업체별 수량을 합산한다
///
/// 일자가 없거나 해석 불가한 레코드는 이 뷰에서만 제외된다.
pub fn monthly_trend(records: &[NormalizedRecord]) -> TrendTable {
    let dated: Vec<&NormalizedRecord> = records.iter().filter(|r| r.date.is_some()).collect();

    let mut companies: Vec<String> = Vec::new();
    let mut company_idx: HashMap<&str, usize> = HashMap::new();
    for record in &dated {
        if !company_idx.contains_key(record.company.as_str()) {
            company_idx.insert(record.company.as_str(), companies.len());
            companies.push(record.company.clone());
        }
    }

    // 월 키는 "YYYY-MM" 문자열이라 BTreeMap 순서가 곧 시간 순서
    let mut buckets: std::collections::BTreeMap<String, Vec<f64>> = std::collections::BTreeMap::new();
    for record in &dated {
        let month = record.date.unwrap().format("%Y-%m").to_string();
        let col = company_idx[record.company.as_str()];
        let row = buckets.entry(month).or_insert_with(|| vec![0.0; companies.len()]);
        row[col] += record.quantity;
    }

    TrendTable {
        companies,
        rows: buckets
            .into_iter()
            .map(|(month, quantities)| TrendRow { month, quantities })
            .collect(),
    }
}

/// 합계 내림차순 상위 N (동률은 등장 순서 유지)
pub fn top_n(pivot: &PivotTable, n: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = pivot
        .rows
        .iter()
        .map(|r| (r.name.clone(), r.total))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}
