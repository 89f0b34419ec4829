//! スプレッドシート書き出し（rust_xlsxwriter）

use super::{EXPORT_COLUMNS, IMPORT_COLUMNS, RESULT_SHEET_NAME};
use crate::error::{Error, Result};
use crate::types::ScanItem;
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

/// 書き出しファイル名（日付入り）
pub fn export_file_name(date: NaiveDate) -> String {
    format!("ket-qua-quet-{}.xlsx", date.format("%Y-%m-%d"))
}

/// 結果一覧をxlsxバイト列に
pub fn serialize(items: &[ScanItem]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_results(worksheet, items).map_err(export_error)?;

    workbook.save_to_buffer().map_err(export_error)
}

/// 読み込み用の空テンプレート（ヘッダーのみ）
pub fn template() -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_header(worksheet, &IMPORT_COLUMNS).map_err(export_error)?;

    workbook.save_to_buffer().map_err(export_error)
}

fn write_results(worksheet: &mut Worksheet, items: &[ScanItem]) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(RESULT_SHEET_NAME)?;
    write_header(worksheet, &EXPORT_COLUMNS)?;

    let scanned_format = Format::new().set_font_color(Color::RGB(0x16A34A));

    for (i, item) in items.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &item.order_id)?;
        worksheet.write_string(row, 1, &item.product_id)?;
        worksheet.write_string(row, 2, &item.product_name)?;
        worksheet.write_number(row, 3, item.quantity.value())?;
        if item.is_scanned() {
            worksheet.write_string_with_format(row, 4, item.status.label(), &scanned_format)?;
        } else {
            worksheet.write_string(row, 4, item.status.label())?;
        }
        // 未スキャンの時刻セルは空のまま
        let scanned_at = item.scanned_at_display();
        if !scanned_at.is_empty() {
            worksheet.write_string(row, 5, scanned_at)?;
        }
    }

    Ok(())
}

fn write_header(worksheet: &mut Worksheet, columns: &[&str]) -> std::result::Result<(), XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF1F5F9));

    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        worksheet.set_column_width(col as u16, 18)?;
    }
    Ok(())
}

fn export_error(e: XlsxError) -> Error {
    Error::Export(e.to_string())
}
