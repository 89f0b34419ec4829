//! エラー型定義

use thiserror::Error;

/// 読み込み失敗（アップロード画面で表示し、画面は進めない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Vui lòng chọn file Excel (.xlsx, .xls): {0}")]
    UnsupportedFileType(String),

    #[error("Định dạng file Excel không hợp lệ: {0}")]
    InvalidWorkbook(String),

    #[error("File không có dữ liệu hoặc sai định dạng cột.")]
    NoData,
}

/// 数量として使えない値（負・NaN・無限大）
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Số lượng không hợp lệ: {0}")]
pub struct InvalidQuantity(pub f64);

/// 共通エラー型
///
/// ファイルの読み書きは呼び出し側が行うので、ここには I/O エラーを持たない。
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Export error: {0}")]
    Export(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
