//! 통합 보고서 Excel 생성
//!
//! 스트림별 피벗 시트("재고 현황", "매출 현황")와
//! 매출 월별 추이 시트를 하나의 워크북으로 만든다.

use crate::aggregator::{top_n, PivotTable, TrendTable};
use crate::error::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;

/// 보고서 워크북을 만들어 저장한다
///
/// 비어 있는 스트림의 시트는 만들지 않는다. 각 스트림 시트에는
/// 피벗 아래에 TOP 랭킹 블록을 붙인다.
pub fn generate_report(
    output_path: &Path,
    stock: &PivotTable,
    sales: &PivotTable,
    trend: &TrendTable,
    top: usize,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center);
    let number_format = Format::new().set_num_format("#,##0.##");

    if !stock.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("재고 현황")?;
        let next_row = write_pivot(worksheet, stock, "총재고", &header_format, &number_format)?;
        write_top_block(
            worksheet,
            stock,
            &format!("TOP {} 보유 품목", top),
            top,
            next_row + 2,
            &header_format,
            &number_format,
        )?;
    }

    if !sales.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("매출 현황")?;
        let next_row = write_pivot(worksheet, sales, "총판매량", &header_format, &number_format)?;
        write_top_block(
            worksheet,
            sales,
            &format!("TOP {} 판매 상품", top),
            top,
            next_row + 2,
            &header_format,
            &number_format,
        )?;
    }

    if !trend.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("월별 추이")?;
        write_trend(worksheet, trend, &header_format, &number_format)?;
    }

    if stock.is_empty() && sales.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("요약")?;
        worksheet.write_string(0, 0, "집계된 레코드가 없습니다")?;
    }

    workbook.save(output_path)?;
    Ok(())
}

/// 피벗을 시트에 쓴다. 다음 빈 행 번호를 돌려준다.
fn write_pivot(
    worksheet: &mut Worksheet,
    pivot: &PivotTable,
    total_label: &str,
    header_format: &Format,
    number_format: &Format,
) -> Result<u32> {
    worksheet.write_string_with_format(0, 0, "품목코드", header_format)?;
    worksheet.write_string_with_format(0, 1, "품목명", header_format)?;
    for (idx, company) in pivot.companies.iter().enumerate() {
        worksheet.write_string_with_format(0, 2 + idx as u16, company, header_format)?;
    }
    let total_col = 2 + pivot.companies.len() as u16;
    worksheet.write_string_with_format(0, total_col, total_label, header_format)?;

    for (row_idx, row) in pivot.rows.iter().enumerate() {
        let r = 1 + row_idx as u32;
        worksheet.write_string(r, 0, &row.code)?;
        worksheet.write_string(r, 1, &row.name)?;
        for (col_idx, qty) in row.quantities.iter().enumerate() {
            worksheet.write_number_with_format(r, 2 + col_idx as u16, *qty, number_format)?;
        }
        worksheet.write_number_with_format(r, total_col, row.total, number_format)?;
    }

    // 합계 행
    let sum_row = 1 + pivot.rows.len() as u32;
    worksheet.write_string_with_format(sum_row, 1, "합계", header_format)?;
    for (col_idx, total) in pivot.company_totals().iter().enumerate() {
        worksheet.write_number_with_format(sum_row, 2 + col_idx as u16, *total, number_format)?;
    }
    worksheet.write_number_with_format(sum_row, total_col, pivot.grand_total(), number_format)?;

    // 컬럼 폭: 코드·품목명은 넓게
    worksheet.set_column_width(0, 14.0)?;
    worksheet.set_column_width(1, 22.0)?;

    Ok(sum_row + 1)
}

/// 피벗 아래 TOP 랭킹 블록 (품목명, 합계)
fn write_top_block(
    worksheet: &mut Worksheet,
    pivot: &PivotTable,
    title: &str,
    top: usize,
    start: u32,
    header_format: &Format,
    number_format: &Format,
) -> Result<()> {
    let ranked = top_n(pivot, top);
    if ranked.is_empty() {
        return Ok(());
    }

    worksheet.write_string_with_format(start, 0, title, header_format)?;
    for (idx, (name, total)) in ranked.iter().enumerate() {
        let row = start + 1 + idx as u32;
        worksheet.write_string(row, 0, name)?;
        worksheet.write_number_with_format(row, 1, *total, number_format)?;
    }

    Ok(())
}

fn write_trend(
    worksheet: &mut Worksheet,
    trend: &TrendTable,
    header_format: &Format,
    number_format: &Format,
) -> Result<()> {
    worksheet.write_string_with_format(0, 0, "월", header_format)?;
    for (idx, company) in trend.companies.iter().enumerate() {
        worksheet.write_string_with_format(0, 1 + idx as u16, company, header_format)?;
    }

    for (row_idx, row) in trend.rows.iter().enumerate() {
        let r = 1 + row_idx as u32;
        worksheet.write_string(r, 0, &row.month)?;
        for (col_idx, qty) in row.quantities.iter().enumerate() {
            worksheet.write_number_with_format(r, 1 + col_idx as u16, *qty, number_format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::build_pivot;
    use crate::types::NormalizedRecord;

    fn record(company: &str, code: &str, qty: f64) -> NormalizedRecord {
        NormalizedRecord {
            date: None,
            company: company.into(),
            code: code.into(),
            name: format!("{}명", code),
            quantity: qty,
            quantity_was_coerced: false,
        }
    }

    #[test]
    fn test_generate_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("통합보고서.xlsx");

        let stock = build_pivot(&[record("하은", "A100", 10.0), record("가온", "A100", 3.0)]);
        let sales = build_pivot(&[record("가온", "B200", 5.0)]);
        let trend = TrendTable::default();

        generate_report(&path, &stock, &sales, &trend, 5).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_generate_report_empty_streams() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("빈보고서.xlsx");

        // 두 스트림 다 비어도 워크북 자체는 저장된다
        generate_report(
            &path,
            &PivotTable::default(),
            &PivotTable::default(),
            &TrendTable::default(),
            5,
        )
        .unwrap();
        assert!(path.exists());
    }
}
