//! スキャン照合エンジン
//!
//! 読み取ったコードとアイテム一覧を受け取り、どのアイテムを
//! スキャン済みにするか（またはしないか）を決める純粋関数。
//!
//! 判定順:
//! 1. 同じ商品コードのスキャン済みアイテムがあれば `Duplicate`
//! 2. 同じ商品コードの未スキャンアイテムのうち、一覧で最初のものを更新して `Success`
//! 3. どちらもなければ `NotFound`

use crate::types::{ScanItem, ScanStatus};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 1回のスキャンの分類結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum ScanOutcome {
    /// 更新後のアイテム
    Success(ScanItem),
    Duplicate(String),
    NotFound(String),
}

/// ペイロードなしの分類（フィードバックのディスパッチ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    Success,
    Duplicate,
    NotFound,
}

impl ScanOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ScanOutcome::Success(_) => OutcomeKind::Success,
            ScanOutcome::Duplicate(_) => OutcomeKind::Duplicate,
            ScanOutcome::NotFound(_) => OutcomeKind::NotFound,
        }
    }

    /// 照合に使われたコード
    pub fn code(&self) -> &str {
        match self {
            ScanOutcome::Success(item) => &item.product_id,
            ScanOutcome::Duplicate(code) | ScanOutcome::NotFound(code) => code,
        }
    }
}

/// 現在時刻でスキャンを適用
pub fn apply_scan(items: &[ScanItem], code: &str) -> (Vec<ScanItem>, ScanOutcome) {
    apply_scan_at(items, code, Local::now().naive_local())
}

/// 指定時刻でスキャンを適用
///
/// 入力一覧は変更せず、新しいスナップショットを返す。
/// 変化するのは高々1アイテムの `status` のみ。
pub fn apply_scan_at(
    items: &[ScanItem],
    code: &str,
    at: NaiveDateTime,
) -> (Vec<ScanItem>, ScanOutcome) {
    if items
        .iter()
        .any(|item| item.product_id == code && item.is_scanned())
    {
        return (items.to_vec(), ScanOutcome::Duplicate(code.to_string()));
    }

    let Some(index) = items
        .iter()
        .position(|item| item.product_id == code && !item.is_scanned())
    else {
        return (items.to_vec(), ScanOutcome::NotFound(code.to_string()));
    };

    let mut updated = items.to_vec();
    updated[index].status = ScanStatus::Scanned { at };
    let outcome = ScanOutcome::Success(updated[index].clone());
    (updated, outcome)
}
