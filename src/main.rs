use clap::Parser;
use logi_merge_rust::{aggregator, cli, export, keywords, pipeline, types};
use cli::{Cli, Commands};
use keywords::KeywordConfig;
use logi_merge_rust::error::Result;
use std::path::{Path, PathBuf};
use types::Outcome;
use walkdir::WalkDir;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls", "ods"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge { inputs, master, output, format, top, keywords } => {
            println!("📦 logi-merge - 재고·매출 통합\n");

            let config = load_keywords(keywords.as_deref())?;

            // 1. 입력 수집
            let files = collect_inputs(&inputs)?;
            println!("[1/3] 입력 파일 {}개 확인\n", files.len());

            // 2. 배치 처리
            println!("[2/3] 파일 처리 중...{}", match &master {
                Some(path) => format!(" (마스터: {})", path.display()),
                None => String::new(),
            });
            let batch = pipeline::process_batch(&files, master.as_deref(), &config)?;
            print_outcomes(&batch.outcomes);

            if cli.verbose {
                let coerced = batch
                    .stock
                    .iter()
                    .chain(batch.sales.iter())
                    .filter(|r| r.quantity_was_coerced)
                    .count();
                if coerced > 0 {
                    println!("⚠️ 수량 해석 불가로 0 처리된 레코드: {}건", coerced);
                }
            }

            // 3. 집계·출력
            println!("\n[3/3] 집계 중...");
            let stock_pivot = aggregator::build_pivot(&batch.stock);
            let sales_pivot = aggregator::build_pivot(&batch.sales);
            let trend = aggregator::monthly_trend(&batch.sales);

            print_summary(&stock_pivot, &sales_pivot, &trend, top);

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let payload = export::ReportPayload {
                outcomes: &batch.outcomes,
                stock: &stock_pivot,
                sales: &sales_pivot,
                trend: &trend,
            };
            export::export_report(&format, &output_dir, &payload, top)?;

            println!("\n✅ 통합 완료");
        }

        Commands::Inspect { file, keywords } => {
            println!("🔍 logi-merge - 양식 진단\n");

            let config = load_keywords(keywords.as_deref())?;
            let inspections = pipeline::inspect_file(&file, &config)?;

            for inspection in &inspections {
                println!("시트: {}", inspection.sheet_name);
                match inspection.header_row {
                    Some(idx) => println!("  머리글 행: {} (0부터)", idx),
                    None => {
                        println!("  머리글 행: 못 찾음");
                        continue;
                    }
                }
                println!("  컬럼: {}", inspection.columns.join(", "));
                print_role("코드", inspection.roles.code.as_deref());
                print_role("품명", inspection.roles.name.as_deref());
                print_role("수량", inspection.roles.quantity.as_deref());
                print_role("일자", inspection.roles.date.as_deref());
                print_role("업체", inspection.roles.company.as_deref());
                println!();
            }
        }
    }

    Ok(())
}

fn print_role(label: &str, value: Option<&str>) {
    println!("  {} → {}", label, value.unwrap_or("(미해석)"));
}

fn load_keywords(path: Option<&Path>) -> Result<KeywordConfig> {
    match path {
        Some(path) => KeywordConfig::from_file(path),
        None => Ok(KeywordConfig::default()),
    }
}

/// 입력 목록을 실제 엑셀 파일 목록으로 펼친다
///
/// 폴더는 바로 아래만 스캔하고 엑셀 확장자만 남긴다.
/// 편집 중 잠금 파일(~$...)은 제외. 파일명 순으로 정렬.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_excel_file(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_excel_file(path: &Path) -> bool {
    let locked = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with("~$"))
        .unwrap_or(false);
    if locked {
        return false;
    }
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            EXCEL_EXTENSIONS.iter().any(|&e| e == ext)
        })
        .unwrap_or(false)
}

fn print_outcomes(outcomes: &[types::InputOutcome]) {
    for item in outcomes {
        match &item.outcome {
            Outcome::Success { stream, records } => {
                println!("✔ {}: {} {}건", item.source, stream, records);
            }
            Outcome::Warning { reason } => {
                println!("⚠️ {}: {}", item.source, reason);
            }
            Outcome::Error { reason } => {
                eprintln!("❌ {}: {}", item.source, reason);
            }
        }
    }
}

fn print_summary(
    stock: &aggregator::PivotTable,
    sales: &aggregator::PivotTable,
    trend: &aggregator::TrendTable,
    top: usize,
) {
    if !stock.is_empty() {
        println!("\n📦 재고 현황");
        println!("  총 품목 수: {}개", stock.rows.len());
        println!("  총 재고 수량: {}", format_quantity(stock.grand_total()));
        if let Some(company) = stock.top_company() {
            println!("  최다 보유 업체: {}", company);
        }

        println!("\n  보유 수량 TOP {}", top);
        for (rank, (name, total)) in aggregator::top_n(stock, top).iter().enumerate() {
            println!("  {}. {} ({})", rank + 1, name, format_quantity(*total));
        }
    } else {
        println!("\n재고 파일이 없습니다.");
    }

    if !sales.is_empty() {
        println!("\n💰 판매(매출) 현황");
        println!("  총 품목 수: {}개", sales.rows.len());
        println!("  총 판매 수량: {}", format_quantity(sales.grand_total()));

        println!("\n🏆 많이 팔린 상품 TOP {}", top);
        for (rank, (name, total)) in aggregator::top_n(sales, top).iter().enumerate() {
            println!("  {}. {} ({})", rank + 1, name, format_quantity(*total));
        }

        if !trend.is_empty() {
            println!("\n📈 월별 판매 추이: {}~{}", trend.rows[0].month,
                trend.rows[trend.rows.len() - 1].month);
        }
    } else {
        println!("\n판매(매출) 파일이 없습니다.");
    }
}

/// 천단위 콤마 표기 (정수일 때만 콤마, 소수는 그대로)
fn format_quantity(value: f64) -> String {
    if value.fract() != 0.0 {
        return format!("{:.2}", value);
    }
    let negative = value < 0.0;
    let digits = format!("{}", value.abs() as i64);
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
