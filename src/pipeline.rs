//! 배치 파이프라인
//!
//! 로더 → 머리글 탐지 → 컬럼 해석 → 코드 변환 → 정규화 → 분류를
//! 파일(시트) 단위로 돌리고 결과를 접는다(fold).
//!
//! 실패는 전부 입력 단위로 격리된다: 한 파일이 깨져도
//! 배치는 끝까지 가고, 입력마다 결과가 하나씩 남는다.

use crate::error::{LogiMergeError, Result};
use crate::keywords::KeywordConfig;
use crate::loader::{load_workbook, SheetTable, HEADER_SCAN_ROWS};
use crate::locator::locate_header;
use crate::master::CodeMapping;
use crate::normalizer::{classify_stream, infer_company, normalize_table};
use crate::resolver::resolve_roles;
use crate::types::{ColumnRoleMap, InputOutcome, NormalizedRecord, Outcome, StreamKind};
use std::path::{Path, PathBuf};

/// 배치 전체의 집계 전 결과
#[derive(Debug, Default)]
pub struct BatchResult {
    pub stock: Vec<NormalizedRecord>,
    pub sales: Vec<NormalizedRecord>,
    pub outcomes: Vec<InputOutcome>,
}

/// 입력 파일들을 처리해 스트림별 레코드와 입력별 결과를 돌려준다
///
/// 마스터가 주어지면 먼저 한 번 매핑을 만들고 이후 읽기 전용으로
/// 공유한다. 마스터 자체의 문제만 배치 전체의 에러가 된다.
pub fn process_batch(
    inputs: &[PathBuf],
    master: Option<&Path>,
    config: &KeywordConfig,
) -> Result<BatchResult> {
    let mapping = match master {
        Some(path) => Some(load_mapping(path, config)?),
        None => None,
    };

    let result = inputs.iter().fold(BatchResult::default(), |mut acc, path| {
        let (streams, outcomes) = process_file(path, mapping.as_ref(), config);
        for (stream, records) in streams {
            match stream {
                StreamKind::Stock => acc.stock.extend(records),
                StreamKind::Sales => acc.sales.extend(records),
            }
        }
        acc.outcomes.extend(outcomes);
        acc
    });

    Ok(result)
}

/// 마스터 파일(첫 시트)에서 코드 매핑을 만든다
pub fn load_mapping(path: &Path, config: &KeywordConfig) -> Result<CodeMapping> {
    let tables = load_workbook(path)?;
    let first = tables
        .into_iter()
        .next()
        .ok_or_else(|| LogiMergeError::InvalidMaster("시트가 없습니다".into()))?;
    CodeMapping::from_table(&first, config)
}

/// 파일 하나를 처리한다
///
/// 시트마다 독립적으로: 실패한 시트는 결과에 사유만 남기고
/// 다음 시트로 넘어간다.
fn process_file(
    path: &Path,
    mapping: Option<&CodeMapping>,
    config: &KeywordConfig,
) -> (Vec<(StreamKind, Vec<NormalizedRecord>)>, Vec<InputOutcome>) {
    let file_label = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let tables = match load_workbook(path) {
        Ok(tables) => tables,
        Err(e) => {
            return (
                Vec::new(),
                vec![InputOutcome {
                    source: file_label,
                    outcome: Outcome::Error { reason: e.to_string() },
                }],
            );
        }
    };

    let mut streams = Vec::new();
    let mut outcomes = Vec::new();

    for table in &tables {
        let source = source_label(table);
        match process_sheet(table, mapping, config) {
            SheetResult::Records(stream, records) => {
                outcomes.push(InputOutcome {
                    source,
                    outcome: Outcome::Success { stream, records: records.len() },
                });
                streams.push((stream, records));
            }
            SheetResult::Skipped(reason) => {
                outcomes.push(InputOutcome {
                    source,
                    outcome: Outcome::Warning { reason },
                });
            }
            SheetResult::Failed(reason) => {
                outcomes.push(InputOutcome {
                    source,
                    outcome: Outcome::Error { reason },
                });
            }
            SheetResult::Empty => {}
        }
    }

    (streams, outcomes)
}

enum SheetResult {
    Records(StreamKind, Vec<NormalizedRecord>),
    Skipped(String),
    Failed(String),
    /// 완전히 빈 시트는 결과 없이 조용히 넘어간다
    Empty,
}

fn process_sheet(
    table: &SheetTable,
    mapping: Option<&CodeMapping>,
    config: &KeywordConfig,
) -> SheetResult {
    if table.is_empty() {
        return SheetResult::Empty;
    }

    let header_idx = match locate_header(table.preview(HEADER_SCAN_ROWS), config) {
        Ok(idx) => idx,
        Err(e) => return SheetResult::Failed(e.to_string()),
    };

    let columns = table.column_names(header_idx);
    let roles = resolve_roles(&columns, config);
    let missing = roles.missing_required();
    if !missing.is_empty() {
        let e = LogiMergeError::ColumnUnresolved {
            missing: missing.join(", "),
            found: columns.join(", "),
        };
        return SheetResult::Skipped(e.to_string());
    }

    let stream = match classify_stream(
        &table.file_name,
        &table.sheet_name,
        table.sheet_count,
        config,
    ) {
        Some(stream) => stream,
        None => {
            return SheetResult::Skipped(
                "재고/매출 어느 쪽인지 판별할 수 없어 제외합니다".into(),
            );
        }
    };

    let company = infer_company(&table.file_name, &table.sheet_name, config);
    let records = normalize_table(
        table,
        header_idx,
        &roles,
        &company,
        mapping,
        &config.unregistered_name,
    );

    SheetResult::Records(stream, records)
}

fn source_label(table: &SheetTable) -> String {
    if table.sheet_count > 1 {
        format!("{}#{}", table.file_name, table.sheet_name)
    } else {
        table.file_name.clone()
    }
}

/// 시트 하나의 진단 정보 (inspect 명령용)
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInspection {
    pub sheet_name: String,
    pub header_row: Option<usize>,
    pub columns: Vec<String>,
    pub roles: ColumnRoleMap,
}

/// 새 업체 양식 진단: 시트별 머리글 위치와 역할 해석 결과
///
/// 레코드는 만들지 않는다. 머리글을 못 찾은 시트는
/// header_row가 None으로 남고 컬럼 목록은 빈다.
pub fn inspect_file(path: &Path, config: &KeywordConfig) -> Result<Vec<SheetInspection>> {
    let tables = load_workbook(path)?;

    Ok(tables
        .iter()
        .map(|table| {
            let header_row = locate_header(table.preview(HEADER_SCAN_ROWS), config).ok();
            let columns = header_row
                .map(|idx| table.column_names(idx))
                .unwrap_or_default();
            let roles = resolve_roles(&columns, config);
            SheetInspection {
                sheet_name: table.sheet_name.clone(),
                header_row,
                columns,
                roles,
            }
        })
        .collect())
}
