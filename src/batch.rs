//! 一括処理
//!
//! - `replay`: コード一覧を順番どおりに照合（`apply` コマンド）
//! - `summarize_rows`: 書き出し済み結果ファイルの集計（`stats` コマンド）

use serde::Serialize;
use stock_check_common::excel::SheetRow;
use stock_check_common::types::SCANNED_LABEL;
use stock_check_common::{OutcomeKind, ScanItem, ScanOutcome, ScanSession, ScanStats};

/// 照合結果のまとめ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub outcomes: Vec<ScanOutcome>,
    pub stats: ScanStats,
    pub success: usize,
    pub duplicate: usize,
    pub not_found: usize,
    #[serde(skip)]
    pub items: Vec<ScanItem>,
}

/// コードファイルの中身を1行1コードに分解
///
/// 空行と `#` で始まる行は読み飛ばす。コード自体は加工しない。
pub fn parse_codes(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// コードを順に照合
///
/// ファイル上の各行は別々の読み取りとして扱う（クールダウンなし）。
pub fn replay(items: Vec<ScanItem>, codes: &[String]) -> ReplayReport {
    let mut session = ScanSession::new();
    session.load(items);
    session.start();

    let mut outcomes = Vec::with_capacity(codes.len());
    for code in codes {
        let event = session.event(code.as_str());
        match session.handle(&event) {
            Ok(outcome) => outcomes.push(outcome),
            Err(dropped) => tracing::warn!(code = %code, ?dropped, "scan dropped during replay"),
        }
    }

    let count = |kind: OutcomeKind| outcomes.iter().filter(|o| o.kind() == kind).count();
    ReplayReport {
        success: count(OutcomeKind::Success),
        duplicate: count(OutcomeKind::Duplicate),
        not_found: count(OutcomeKind::NotFound),
        stats: session.stats(),
        items: session.items().to_vec(),
        outcomes,
    }
}

/// 結果ファイルの行を集計（状態列が「Đã quét」の行をスキャン済みとする）
pub fn summarize_rows(rows: &[SheetRow]) -> ScanStats {
    let scanned = rows
        .iter()
        .filter(|row| row.status.as_deref().map(str::trim) == Some(SCANNED_LABEL))
        .count();

    ScanStats {
        total: rows.len(),
        scanned,
        remaining: rows.len() - scanned,
    }
}
