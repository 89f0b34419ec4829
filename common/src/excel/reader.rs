//! スプレッドシート読み込み（calamine）
//!
//! 最初のシートの、使用範囲の先頭行をヘッダーとして扱う。
//! 列はヘッダー名で探し、見つからない・空のセルは既定値で補う。

use super::{
    COL_ORDER_ID, COL_PRODUCT_ID, COL_PRODUCT_NAME, COL_QUANTITY, COL_SCANNED_AT, COL_STATUS,
    SUPPORTED_EXTENSIONS,
};
use crate::error::ImportError;
use crate::types::{Quantity, ScanItem};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;

/// 既定の商品名
pub const DEFAULT_PRODUCT_NAME: &str = "N/A";
/// 既定の数量
pub const DEFAULT_QUANTITY: Quantity = Quantity::ONE;

/// シート1行分の生データ（空セルは None）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    /// 書き出し済みファイルの状態列
    pub status: Option<String>,
    /// 書き出し済みファイルの時刻列
    pub scanned_at: Option<String>,
}

impl SheetRow {
    /// 既定値を補ってアイテムに変換（index は0始まりのデータ行番号）
    pub fn into_item(self, index: usize) -> ScanItem {
        let order_id = self.order_id.unwrap_or_else(|| format!("DH{}", index + 1));
        let product_id = self.product_id.unwrap_or_else(|| format!("SP{}", index + 1));
        let product_name = self
            .product_name
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());
        let quantity = parse_quantity(self.quantity.as_deref());
        ScanItem::new(index, order_id, product_id, product_name, quantity)
    }
}

/// 拡張子チェック（.xlsx / .xls のみ）
pub fn check_file_type(path: &Path) -> Result<(), ImportError> {
    let supported = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));

    if supported {
        Ok(())
    } else {
        Err(ImportError::UnsupportedFileType(path.display().to_string()))
    }
}

/// バイト列からアイテム一覧を作る（全件未スキャン）
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<ScanItem>, ImportError> {
    let items: Vec<ScanItem> = read_sheet_rows(bytes)?
        .into_iter()
        .enumerate()
        .map(|(index, row)| row.into_item(index))
        .collect();

    if items.is_empty() {
        return Err(ImportError::NoData);
    }

    tracing::debug!(items = items.len(), "workbook parsed");
    Ok(items)
}

/// 最初のシートの行を読み込む（空行は除く）
pub fn read_sheet_rows(bytes: &[u8]) -> Result<Vec<SheetRow>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::InvalidWorkbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::InvalidWorkbook("không có trang tính".to_string()))?
        .map_err(|e| ImportError::InvalidWorkbook(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = HeaderMap::from_row(header);

    Ok(rows
        .filter(|row| row.iter().any(|cell| cell_text(cell).is_some()))
        .map(|row| columns.read(row))
        .collect())
}

/// ヘッダー名 → 列番号
#[derive(Debug, Default)]
struct HeaderMap {
    order_id: Option<usize>,
    product_id: Option<usize>,
    product_name: Option<usize>,
    quantity: Option<usize>,
    status: Option<usize>,
    scanned_at: Option<usize>,
}

impl HeaderMap {
    fn from_row(header: &[Data]) -> Self {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| cell_text(cell).is_some_and(|text| text.trim() == name))
        };

        Self {
            order_id: find(COL_ORDER_ID),
            product_id: find(COL_PRODUCT_ID),
            product_name: find(COL_PRODUCT_NAME),
            quantity: find(COL_QUANTITY),
            status: find(COL_STATUS),
            scanned_at: find(COL_SCANNED_AT),
        }
    }

    fn read(&self, row: &[Data]) -> SheetRow {
        let get = |col: Option<usize>| col.and_then(|c| row.get(c)).and_then(cell_text);

        SheetRow {
            order_id: get(self.order_id),
            product_id: get(self.product_id),
            product_name: get(self.product_name),
            quantity: get(self.quantity),
            status: get(self.status),
            scanned_at: get(self.scanned_at),
        }
    }
}

/// セルを表示どおりの文字列に（空・エラーセルは None）
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        // 整数値の浮動小数は "123.0" ではなく "123"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// 数量（数値でない・負の値は既定値、小数はそのまま）
fn parse_quantity(raw: Option<&str>) -> Quantity {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .and_then(Quantity::new)
        .unwrap_or(DEFAULT_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    /// テスト用のワークブックを作る（None は空セル）
    fn workbook(rows: &[Vec<Option<&str>>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(value) = cell {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn header() -> Vec<Option<&'static str>> {
        vec![
            Some(COL_ORDER_ID),
            Some(COL_PRODUCT_ID),
            Some(COL_PRODUCT_NAME),
            Some(COL_QUANTITY),
        ]
    }

    #[test]
    fn test_parse_basic_rows() {
        let bytes = workbook(&[
            header(),
            vec![Some("DH001"), Some("SP-A"), Some("Áo thun"), Some("2")],
            vec![Some("DH002"), Some("SP-B"), Some("Quần"), Some("5")],
        ]);

        let items = parse_workbook(&bytes).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "DH001-SP-A-0");
        assert_eq!(items[0].product_name, "Áo thun");
        assert_eq!(items[0].quantity, Quantity::whole(2));
        assert_eq!(items[1].quantity, Quantity::whole(5));
        assert!(items.iter().all(|item| !item.is_scanned()));
    }

    #[test]
    fn test_missing_cells_use_fallbacks() {
        let bytes = workbook(&[
            header(),
            vec![None, None, None, None, Some("ghi chú")],
            vec![Some("DH7"), None, Some("Mũ"), Some("abc")],
        ]);

        let items = parse_workbook(&bytes).unwrap();
        assert_eq!(items[0].order_id, "DH1");
        assert_eq!(items[0].product_id, "SP1");
        assert_eq!(items[0].product_name, DEFAULT_PRODUCT_NAME);
        assert_eq!(items[0].quantity, DEFAULT_QUANTITY);

        assert_eq!(items[1].order_id, "DH7");
        assert_eq!(items[1].product_id, "SP2");
        assert_eq!(items[1].quantity, DEFAULT_QUANTITY);
    }

    #[test]
    fn test_missing_columns_use_fallbacks() {
        let bytes = workbook(&[
            vec![Some(COL_PRODUCT_ID)],
            vec![Some("X1")],
            vec![Some("X2")],
        ]);

        let items = parse_workbook(&bytes).unwrap();
        assert_eq!(items[1].order_id, "DH2");
        assert_eq!(items[1].product_id, "X2");
        assert_eq!(items[1].product_name, "N/A");
        assert_eq!(items[1].quantity, DEFAULT_QUANTITY);
    }

    #[test]
    fn test_repeated_ids_get_unique_item_ids() {
        let bytes = workbook(&[
            header(),
            vec![Some("DH1"), Some("A"), Some("x"), Some("1")],
            vec![Some("DH1"), Some("A"), Some("x"), Some("1")],
        ]);

        let items = parse_workbook(&bytes).unwrap();
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn test_numeric_cells_render_without_fraction() {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();
        for (c, name) in [COL_ORDER_ID, COL_PRODUCT_ID, COL_QUANTITY].iter().enumerate() {
            sheet.write_string(0, c as u16, *name).unwrap();
        }
        sheet.write_number(1, 0, 1001.0).unwrap();
        sheet.write_number(1, 1, 8934567.0).unwrap();
        sheet.write_number(1, 2, 3.7).unwrap();
        let bytes = book.save_to_buffer().unwrap();

        let items = parse_workbook(&bytes).unwrap();
        assert_eq!(items[0].order_id, "1001");
        assert_eq!(items[0].product_id, "8934567");
        assert_eq!(items[0].quantity.value(), 3.7);
    }

    #[test]
    fn test_fractional_quantity_kept() {
        let bytes = workbook(&[
            header(),
            vec![Some("DH1"), Some("A"), Some("Vải (mét)"), Some("2.5")],
            vec![Some("DH2"), Some("B"), Some("Dây"), Some("0.125")],
        ]);

        let items = parse_workbook(&bytes).unwrap();
        assert_eq!(items[0].quantity.value(), 2.5);
        assert_eq!(items[1].quantity.value(), 0.125);
        assert_eq!(items[0].quantity.to_string(), "2.5");
    }

    #[test]
    fn test_blank_rows_skipped() {
        let bytes = workbook(&[
            header(),
            vec![Some("DH1"), Some("A"), Some("x"), Some("1")],
            vec![],
            vec![Some("DH2"), Some("B"), Some("y"), Some("1")],
        ]);

        let items = parse_workbook(&bytes).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "DH2-B-1");
    }

    #[test]
    fn test_header_only_is_no_data() {
        let bytes = workbook(&[header()]);
        assert_eq!(parse_workbook(&bytes), Err(ImportError::NoData));
    }

    #[test]
    fn test_empty_sheet_is_no_data() {
        let bytes = workbook(&[]);
        assert_eq!(parse_workbook(&bytes), Err(ImportError::NoData));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = parse_workbook(b"this is not a spreadsheet");
        assert!(matches!(result, Err(ImportError::InvalidWorkbook(_))));
    }

    #[test]
    fn test_check_file_type() {
        assert!(check_file_type(Path::new("don-hang.xlsx")).is_ok());
        assert!(check_file_type(Path::new("DON-HANG.XLS")).is_ok());
        assert!(matches!(
            check_file_type(Path::new("don-hang.csv")),
            Err(ImportError::UnsupportedFileType(_))
        ));
        assert!(check_file_type(Path::new("no-extension")).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(None), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(Some("4")), Quantity::whole(4));
        assert_eq!(parse_quantity(Some(" 4 ")), Quantity::whole(4));
        assert_eq!(parse_quantity(Some("0")), Quantity::whole(0));
        assert_eq!(parse_quantity(Some("2.9")).value(), 2.9);
        assert_eq!(parse_quantity(Some("-3")), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(Some("NaN")), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(Some("inf")), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(Some("nhiều")), DEFAULT_QUANTITY);
    }
}
