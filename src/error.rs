use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockCheckError {
    #[error("Lỗi cấu hình: {0}")]
    Config(String),

    #[error("Không tìm thấy file: {0}")]
    FileNotFound(String),

    #[error("File đã tồn tại: {0}")]
    OutputExists(String),

    #[error("Lỗi phân tích JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Lỗi IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lỗi xuất Excel: {0}")]
    ExcelGeneration(String),

    #[error("Lỗi thực thi lệnh: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] stock_check_common::Error),
}

impl From<stock_check_common::ImportError> for StockCheckError {
    fn from(e: stock_check_common::ImportError) -> Self {
        StockCheckError::Common(e.into())
    }
}

impl StockCheckError {
    /// 読み込み失敗（アップロード画面に留まるエラー）かどうか
    pub fn as_import_error(&self) -> Option<&stock_check_common::ImportError> {
        match self {
            StockCheckError::Common(stock_check_common::Error::Import(e)) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StockCheckError>;
