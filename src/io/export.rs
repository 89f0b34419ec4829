use crate::error::{StockCheckError, Result};
use chrono::{Local, NaiveDate};
use dialoguer::Confirm;
use std::path::{Path, PathBuf};
use stock_check_common::excel;
use stock_check_common::ScanItem;

/// 出力先を決める
///
/// ディレクトリ（または拡張子なし）なら日付入りファイル名を付ける。
pub fn resolve_output_path(output: &Path, date: NaiveDate) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(excel::export_file_name(date))
    } else {
        output.to_path_buf()
    }
}

/// 出力先に同名ファイルがあるときの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// 確認する（標準入力を他で読んでいないときだけ）
    Prompt,
    /// 確認なしで上書き
    Force,
    /// 連番を付けて両方残す
    KeepBoth,
}

impl Overwrite {
    pub fn from_force(force: bool) -> Self {
        if force { Overwrite::Force } else { Overwrite::Prompt }
    }
}

/// 既存ファイルと重ならないパス（`name-1.xlsx`, `name-2.xlsx`, ...）
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| path.with_file_name(format!("{}-{}{}", stem, n, ext)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// 上書き方針に従って実際の書き込み先を決める
fn settle_path(path: &Path, overwrite: Overwrite) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    match overwrite {
        Overwrite::Force => Ok(path.to_path_buf()),
        Overwrite::KeepBoth => Ok(unique_path(path)),
        Overwrite::Prompt => {
            let confirmed = Confirm::new()
                .with_prompt(format!("{} đã tồn tại. Ghi đè?", path.display()))
                .default(false)
                .interact()
                .map_err(|e| StockCheckError::CliExecution(e.to_string()))?;

            if confirmed {
                Ok(path.to_path_buf())
            } else {
                Err(StockCheckError::OutputExists(path.display().to_string()))
            }
        }
    }
}

/// バイト列を書き込み、書き込んだパスを返す
pub fn write_bytes(path: &Path, bytes: &[u8], overwrite: Overwrite) -> Result<PathBuf> {
    let path = settle_path(path, overwrite)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(path)
}

/// 結果を書き出し、書き出したパスを返す
pub fn write_results(items: &[ScanItem], output: &Path, overwrite: Overwrite) -> Result<PathBuf> {
    let path = resolve_output_path(output, Local::now().date_naive());
    let bytes = excel::serialize(items)
        .map_err(|e| StockCheckError::ExcelGeneration(e.to_string()))?;
    write_bytes(&path, &bytes, overwrite)
}

/// 読み込み用テンプレートを書き出す
pub fn write_template(output: &Path, overwrite: Overwrite) -> Result<PathBuf> {
    let bytes = excel::template()
        .map_err(|e| StockCheckError::ExcelGeneration(e.to_string()))?;
    write_bytes(output, &bytes, overwrite)
}
