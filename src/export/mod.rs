pub mod excel;

use crate::aggregator::{PivotTable, TrendTable};
use crate::cli::ReportFormat;
use crate::error::Result;
use crate::types::InputOutcome;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON 보고서의 전체 페이로드
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload<'a> {
    pub outcomes: &'a [InputOutcome],
    pub stock: &'a PivotTable,
    pub sales: &'a PivotTable,
    pub trend: &'a TrendTable,
}

fn output_path_for(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("통합보고서.{}", extension))
    } else {
        output.to_path_buf()
    }
}

/// both 형식: 확장자만 다른 같은 이름의 경로 쌍
fn output_paths_for_both(output: &Path) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        (
            output.join("통합보고서.xlsx"),
            output.join("통합보고서.json"),
        )
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("통합보고서");
        (
            parent.join(format!("{}.xlsx", stem)),
            parent.join(format!("{}.json", stem)),
        )
    }
}

/// 집계 결과를 지정한 형식으로 내보낸다
pub fn export_report(
    format: &ReportFormat,
    output: &Path,
    payload: &ReportPayload<'_>,
    top: usize,
) -> Result<()> {
    match format {
        ReportFormat::Excel => {
            let path = output_path_for(output, "xlsx");
            println!("- Excel 보고서 생성 중...");
            excel::generate_report(&path, payload.stock, payload.sales, payload.trend, top)?;
            println!("✔ Excel 출력: {}", path.display());
        }
        ReportFormat::Json => {
            let path = output_path_for(output, "json");
            println!("- JSON 보고서 생성 중...");
            write_json(&path, payload)?;
            println!("✔ JSON 출력: {}", path.display());
        }
        ReportFormat::Both => {
            let (excel_path, json_path) = output_paths_for_both(output);
            println!("- Excel 보고서 생성 중...");
            excel::generate_report(&excel_path, payload.stock, payload.sales, payload.trend, top)?;
            println!("✔ Excel 출력: {}", excel_path.display());

            println!("- JSON 보고서 생성 중...");
            write_json(&json_path, payload)?;
            println!("✔ JSON 출력: {}", json_path.display());
        }
    }

    Ok(())
}

fn write_json(path: &Path, payload: &ReportPayload<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(payload)?;
    std::fs::write(path, json)?;
    Ok(())
}
