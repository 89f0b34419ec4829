use crate::error::{StockCheckError, Result};
use std::path::Path;
use stock_check_common::excel::{self, SheetRow};
use stock_check_common::ScanItem;

async fn read_spreadsheet(path: &Path) -> Result<Vec<u8>> {
    excel::check_file_type(path)?;

    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(StockCheckError::FileNotFound(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "spreadsheet read");
    Ok(bytes)
}

/// 期待一覧を読み込む（全件未スキャン）
pub async fn load_items(path: &Path) -> Result<Vec<ScanItem>> {
    let bytes = read_spreadsheet(path).await?;
    Ok(excel::parse_workbook(&bytes)?)
}

/// 書き出し済み結果ファイルの行を読み込む（状態・時刻列つき）
pub async fn load_result_rows(path: &Path) -> Result<Vec<SheetRow>> {
    let bytes = read_spreadsheet(path).await?;
    Ok(excel::read_sheet_rows(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_check_common::ImportError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_wrong_extension_rejected_before_reading() {
        let result = load_items(Path::new("/nonexistent/orders.csv")).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.as_import_error(),
            Some(ImportError::UnsupportedFileType(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_items(Path::new("/nonexistent/orders.xlsx")).await;
        assert!(matches!(result, Err(StockCheckError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip").unwrap();

        let err = load_items(&path).await.unwrap_err();
        assert!(matches!(
            err.as_import_error(),
            Some(ImportError::InvalidWorkbook(_))
        ));
    }
}
