//! ファイル入出力
//!
//! ファイルの読み込みは tokio::fs（非同期）、パース・生成は共通ライブラリに任せる。

pub mod import;
pub mod export;

pub use import::{load_items, load_result_rows};
pub use export::{resolve_output_path, unique_path, write_bytes, write_results, write_template, Overwrite};
