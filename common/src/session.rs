//! スキャンセッション
//!
//! 1回のスキャン作業の間、アイテム一覧を所有する。
//! 一覧の変更はすべて `handle` → `apply_scan` を経由し、
//! 表示側は `items()` で借用するだけ。

use crate::engine::{apply_scan_at, ScanOutcome};
use crate::types::{ScanItem, ScanStats};
use chrono::{Local, NaiveDateTime};

/// 画面の状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppState {
    #[default]
    FileUpload,
    Scanning,
}

/// デコーダーから届いた読み取りイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    /// 読み取り時点のセッション世代
    pub generation: u64,
    pub code: String,
}

/// イベントを適用しなかった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropped {
    /// リセット前のセッションのイベント
    Stale,
    /// スキャン停止中
    NotScanning,
}

#[derive(Debug, Default)]
pub struct ScanSession {
    state: AppState,
    items: Vec<ScanItem>,
    scanning: bool,
    generation: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn items(&self) -> &[ScanItem] {
        &self.items
    }

    pub fn stats(&self) -> ScanStats {
        ScanStats::from_items(&self.items)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// 一覧を丸ごと置き換えてスキャン画面へ
    ///
    /// スキャンは停止状態から始まる。
    pub fn load(&mut self, items: Vec<ScanItem>) {
        self.items = items;
        self.state = AppState::Scanning;
        self.scanning = false;
        self.generation += 1;
        tracing::debug!(generation = self.generation, items = self.items.len(), "session loaded");
    }

    /// 一覧を破棄してアップロード画面へ戻る
    pub fn reset(&mut self) {
        self.items.clear();
        self.state = AppState::FileUpload;
        self.scanning = false;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "session reset");
    }

    /// スキャン開始（アップロード画面では何もしない）
    pub fn start(&mut self) -> bool {
        if self.state != AppState::Scanning {
            return false;
        }
        self.scanning = true;
        true
    }

    pub fn stop(&mut self) {
        self.scanning = false;
    }

    /// 開始/停止を切り替え、切り替え後の状態を返す
    pub fn toggle(&mut self) -> bool {
        if self.scanning {
            self.stop();
            false
        } else {
            self.start()
        }
    }

    /// 現在の世代でイベントを作る
    pub fn event(&self, code: impl Into<String>) -> DecodedEvent {
        DecodedEvent {
            generation: self.generation,
            code: code.into(),
        }
    }

    /// 読み取りイベントを現在時刻で適用
    pub fn handle(&mut self, event: &DecodedEvent) -> Result<ScanOutcome, Dropped> {
        self.handle_at(event, Local::now().naive_local())
    }

    /// 読み取りイベントを適用
    ///
    /// 古い世代のイベントと停止中のイベントは捨てる（キューに溜めない）。
    pub fn handle_at(
        &mut self,
        event: &DecodedEvent,
        at: NaiveDateTime,
    ) -> Result<ScanOutcome, Dropped> {
        if event.generation != self.generation {
            tracing::debug!(
                event_generation = event.generation,
                generation = self.generation,
                "dropping stale scan event"
            );
            return Err(Dropped::Stale);
        }
        if !self.scanning {
            tracing::debug!(code = %event.code, "dropping scan event while stopped");
            return Err(Dropped::NotScanning);
        }

        let (items, outcome) = apply_scan_at(&self.items, &event.code, at);
        self.items = items;
        tracing::debug!(code = %event.code, kind = ?outcome.kind(), "scan applied");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OutcomeKind;
    use crate::types::Quantity;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn sample() -> Vec<ScanItem> {
        vec![
            ScanItem::new(0, "DH1", "A", "Áo", Quantity::whole(1)),
            ScanItem::new(1, "DH2", "A", "Áo", Quantity::whole(1)),
            ScanItem::new(2, "DH3", "B", "Quần", Quantity::whole(2)),
        ]
    }

    fn scanning_session() -> ScanSession {
        let mut session = ScanSession::new();
        session.load(sample());
        session.start();
        session
    }

    #[test]
    fn test_new_session_is_on_upload_screen() {
        let session = ScanSession::new();
        assert_eq!(session.state(), AppState::FileUpload);
        assert!(session.items().is_empty());
        assert!(!session.is_scanning());
    }

    #[test]
    fn test_cannot_start_without_items() {
        let mut session = ScanSession::new();
        assert!(!session.start());
        assert!(!session.is_scanning());
    }

    #[test]
    fn test_scan_sequence() {
        let mut session = scanning_session();

        let kinds: Vec<OutcomeKind> = ["A", "A", "A", "C"]
            .iter()
            .map(|code| {
                let event = session.event(*code);
                session.handle_at(&event, at()).unwrap().kind()
            })
            .collect();

        assert_eq!(
            kinds,
            vec![
                OutcomeKind::Success,
                OutcomeKind::Duplicate,
                OutcomeKind::Duplicate,
                OutcomeKind::NotFound,
            ]
        );
        assert_eq!(session.stats().scanned, 1);
        assert_eq!(session.stats().remaining, 2);
    }

    #[test]
    fn test_events_dropped_while_stopped() {
        let mut session = scanning_session();
        session.stop();

        let event = session.event("B");
        assert_eq!(session.handle_at(&event, at()), Err(Dropped::NotScanning));
        assert_eq!(session.stats().scanned, 0);

        // 再開後も停止中のイベントは再生されない
        session.start();
        assert_eq!(session.stats().scanned, 0);
    }

    #[test]
    fn test_stale_events_dropped_after_reset() {
        let mut session = scanning_session();
        let stale = session.event("B");

        session.reset();
        session.load(sample());
        session.start();

        assert_eq!(session.handle_at(&stale, at()), Err(Dropped::Stale));
        assert_eq!(session.stats().scanned, 0);
    }

    #[test]
    fn test_reload_replaces_list() {
        let mut session = scanning_session();
        let event = session.event("B");
        session.handle_at(&event, at()).unwrap();

        session.load(vec![ScanItem::new(0, "DH9", "Z", "Mũ", Quantity::whole(1))]);
        assert_eq!(session.items().len(), 1);
        assert_eq!(session.stats().scanned, 0);
        assert!(!session.is_scanning());
    }

    #[test]
    fn test_reset_discards_items() {
        let mut session = scanning_session();
        session.reset();
        assert_eq!(session.state(), AppState::FileUpload);
        assert!(session.items().is_empty());
        assert!(!session.is_scanning());
    }

    #[test]
    fn test_toggle() {
        let mut session = ScanSession::new();
        session.load(sample());
        assert!(session.toggle());
        assert!(!session.toggle());
    }
}
