//! チェックリストの型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - ScanItem: スプレッドシート1行分の期待アイテム
//! - ScanStatus: 未スキャン / スキャン済み（時刻つき）
//! - Quantity: 数量（有限の非負数、小数もそのまま保持）
//! - ScanStats: 画面上部のカウンター

use crate::error::InvalidQuantity;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 表示用の時刻フォーマット（vi-VNロケール相当）
pub const SCANNED_AT_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

pub const PENDING_LABEL: &str = "Chưa quét";
pub const SCANNED_LABEL: &str = "Đã quét";

/// アイテムの状態
///
/// スキャン時刻は `Scanned` だけが持つので、
/// 「時刻があるのはスキャン済みのときだけ」が型で保証される。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum ScanStatus {
    #[default]
    Pending,
    Scanned { at: NaiveDateTime },
}

impl ScanStatus {
    /// エクスポートと一覧表示に使う表示名
    pub fn label(&self) -> &'static str {
        match self {
            ScanStatus::Pending => PENDING_LABEL,
            ScanStatus::Scanned { .. } => SCANNED_LABEL,
        }
    }

    pub fn is_scanned(&self) -> bool {
        matches!(self, ScanStatus::Scanned { .. })
    }
}

/// 数量
///
/// NaN・無限大・負の値は作れないので、値どうしの比較は常に成り立つ。
/// 表示は整数なら小数点なし（`2`）、小数ならそのまま（`2.5`）。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    pub const ONE: Quantity = Quantity(1.0);

    pub fn new(value: f64) -> Option<Self> {
        // -0.0 は 0 にそろえる
        (value.is_finite() && value >= 0.0).then_some(Quantity(value + 0.0))
    }

    pub fn whole(value: u32) -> Self {
        Quantity(f64::from(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_whole(self) -> bool {
        self.0.fract() == 0.0
    }
}

impl Eq for Quantity {}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ONE
    }
}

impl TryFrom<f64> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Quantity::new(value).ok_or(InvalidQuantity(value))
    }
}

impl From<Quantity> for f64 {
    fn from(quantity: Quantity) -> f64 {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 の Display は 2.0 を "2" と出す
        write!(f, "{}", self.0)
    }
}

/// 期待アイテム（スプレッドシート1行）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanItem {
    /// `{order_id}-{product_id}-{行番号}`、セッション中は不変
    pub id: String,
    pub order_id: String,
    /// 読み取ったコードと照合される値
    pub product_id: String,
    pub product_name: String,
    /// 表示のみ（スキャンで減算しない）
    pub quantity: Quantity,
    #[serde(default)]
    pub status: ScanStatus,
}

impl ScanItem {
    pub fn new(
        index: usize,
        order_id: impl Into<String>,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: Quantity,
    ) -> Self {
        let order_id = order_id.into();
        let product_id = product_id.into();
        Self {
            id: format!("{}-{}-{}", order_id, product_id, index),
            order_id,
            product_id,
            product_name: product_name.into(),
            quantity,
            status: ScanStatus::Pending,
        }
    }

    pub fn is_scanned(&self) -> bool {
        self.status.is_scanned()
    }

    pub fn scanned_at(&self) -> Option<NaiveDateTime> {
        match self.status {
            ScanStatus::Scanned { at } => Some(at),
            ScanStatus::Pending => None,
        }
    }

    /// 表示用のスキャン時刻（未スキャンなら空文字）
    pub fn scanned_at_display(&self) -> String {
        self.scanned_at()
            .map(|at| at.format(SCANNED_AT_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// 画面上部のカウンター
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub total: usize,
    pub scanned: usize,
    pub remaining: usize,
}

impl ScanStats {
    pub fn from_items(items: &[ScanItem]) -> Self {
        let scanned = items.iter().filter(|item| item.is_scanned()).count();
        Self {
            total: items.len(),
            scanned,
            remaining: items.len() - scanned,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.remaining == 0
    }
}
