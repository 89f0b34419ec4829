use crate::error::{StockCheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 読み上げコマンド（例: "espeak-ng -v {lang}"）。合図のテキストを最後の引数に追加
    pub speech_command: Option<String>,
    /// `{lang}` に埋め込む言語
    pub speech_lang: String,
    /// 読み取り後の一時停止（ミリ秒）
    pub cooldown_ms: u64,
    /// トースト表示時間（秒）
    pub toast_seconds: u64,
    /// 振動の代わりに端末ベルを鳴らす
    pub bell: bool,
    /// 書き出し先（省略時はカレント）
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speech_command: None,
            speech_lang: "vi-VN".into(),
            cooldown_ms: 1500,
            toast_seconds: 3,
            bell: true,
            export_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| StockCheckError::Config("Không tìm thấy thư mục home".into()))?;
        Ok(home.join(".config").join("stock-check").join("config.json"))
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }

    /// 書き出し先ディレクトリ（CLI指定 > 設定 > カレント）
    pub fn output_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// 読み上げコマンドを (プログラム, 引数) に分解
    pub fn speech_program(&self) -> Option<(String, Vec<String>)> {
        let command = self.speech_command.as_deref()?;
        let mut parts = command
            .split_whitespace()
            .map(|part| part.replace("{lang}", &self.speech_lang));
        let program = parts.next()?;
        Some((program, parts.collect()))
    }
}
