//! ログ初期化（tracing）
//!
//! 画面に出すメッセージは println! のまま。診断情報（デコーダーのイベント、
//! 破棄したイベント、読み上げ失敗など）は tracing 経由で stderr に出す。

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// `-v` なしは warn、ありは debug。`RUST_LOG` があればそちらを優先
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "qr_stock_check={level},stock_check_common={level},stock_check={level}",
            level = level.as_str().to_lowercase()
        ))
    })
}

/// 二重初期化はエラーにせず無視する
pub fn init_logging(verbose: bool) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(level_for(verbose)))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();

    if result.is_err() {
        tracing::debug!("logging already initialised");
    }
}
