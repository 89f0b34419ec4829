//! スプレッドシートの読み書き
//!
//! 読み込み（calamine）と書き出し（rust_xlsxwriter）で同じ列名を使うので、
//! 書き出したファイルを編集してそのまま再読み込みできる。

pub mod reader;
pub mod writer;

pub use reader::{check_file_type, parse_workbook, read_sheet_rows, SheetRow};
pub use writer::{export_file_name, serialize, template};

/// 注文番号
pub const COL_ORDER_ID: &str = "Mã đơn hàng";
/// 商品コード
pub const COL_PRODUCT_ID: &str = "Mã sản phẩm";
/// 商品名
pub const COL_PRODUCT_NAME: &str = "Tên sản phẩm";
/// 数量
pub const COL_QUANTITY: &str = "Số lượng";
/// 状態（書き出しのみ）
pub const COL_STATUS: &str = "Trạng thái";
/// スキャン時刻（書き出しのみ）
pub const COL_SCANNED_AT: &str = "Thời gian quét";

/// 読み込み時に必要な列
pub const IMPORT_COLUMNS: [&str; 4] = [COL_ORDER_ID, COL_PRODUCT_ID, COL_PRODUCT_NAME, COL_QUANTITY];

/// 書き出し時の列（読み込み列 + 状態 + 時刻）
pub const EXPORT_COLUMNS: [&str; 6] = [
    COL_ORDER_ID,
    COL_PRODUCT_ID,
    COL_PRODUCT_NAME,
    COL_QUANTITY,
    COL_STATUS,
    COL_SCANNED_AT,
];

/// 結果シート名
pub const RESULT_SHEET_NAME: &str = "Kết quả quét";

/// 読み込み可能な拡張子
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];
