//! スキャン結果のフィードバック
//!
//! エンジンの外側で、結果の種類ごとにトースト・音声・振動を決める。
//! 実際の再生（音声合成、ベル）は呼び出し側の責務。

use crate::engine::{OutcomeKind, ScanOutcome};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// トーストの既定表示時間（3秒）
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackKind {
    Success,
    Error,
    Warning,
}

/// ユーザーに見せるメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Error, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Warning, message: message.into() }
    }

    /// スキャン結果からトーストを作る
    pub fn for_outcome(outcome: &ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Success(item) => {
                Self::success(format!("Quét thành công: {}", item.product_id))
            }
            ScanOutcome::Duplicate(code) => {
                Self::warning(format!("Sản phẩm {} đã được quét rồi.", code))
            }
            ScanOutcome::NotFound(code) => {
                Self::error(format!("Sai! Không tìm thấy sản phẩm {}.", code))
            }
        }
    }

    /// 読み込み成功
    pub fn loaded(count: usize) -> Self {
        Self::success(format!("Tải lên {} mục thành công!", count))
    }

    /// 読み込み失敗
    pub fn load_failed(reason: impl std::fmt::Display) -> Self {
        Self::error(format!("Lỗi khi đọc file: {}", reason))
    }
}

/// 音声・振動の合図
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    /// 読み上げるテキスト
    pub speech: &'static str,
    /// 振動時間（なしの場合は None）
    pub vibrate: Option<Duration>,
}

/// 結果の種類 → 合図のディスパッチテーブル
pub fn cue_for(kind: OutcomeKind) -> Cue {
    match kind {
        OutcomeKind::Success => Cue { speech: "Quét thành công", vibrate: None },
        OutcomeKind::Duplicate => Cue { speech: "Đã quét rồi", vibrate: None },
        OutcomeKind::NotFound => Cue {
            speech: "Sai",
            vibrate: Some(Duration::from_millis(200)),
        },
    }
}

/// 同時に1件だけ表示するトースト
///
/// 新しいメッセージは古いものを置き換え、一定時間で自動的に消える。
#[derive(Debug, Clone)]
pub struct ToastSlot {
    duration: Duration,
    current: Option<(Feedback, Instant)>,
}

impl Default for ToastSlot {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastSlot {
    pub fn new(duration: Duration) -> Self {
        Self { duration, current: None }
    }

    pub fn show(&mut self, feedback: Feedback, now: Instant) {
        self.current = Some((feedback, now));
    }

    /// 表示中のトースト（期限切れなら None）
    pub fn current(&self, now: Instant) -> Option<&Feedback> {
        self.current
            .as_ref()
            .filter(|(_, shown_at)| now.duration_since(*shown_at) < self.duration)
            .map(|(feedback, _)| feedback)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Quantity, ScanItem};

    #[test]
    fn test_feedback_for_each_outcome() {
        let item = ScanItem::new(0, "DH1", "SP9", "Áo", Quantity::whole(1));

        let ok = Feedback::for_outcome(&ScanOutcome::Success(item));
        assert_eq!(ok.kind, FeedbackKind::Success);
        assert_eq!(ok.message, "Quét thành công: SP9");

        let dup = Feedback::for_outcome(&ScanOutcome::Duplicate("SP9".into()));
        assert_eq!(dup.kind, FeedbackKind::Warning);
        assert!(dup.message.contains("đã được quét rồi"));

        let missing = Feedback::for_outcome(&ScanOutcome::NotFound("X1".into()));
        assert_eq!(missing.kind, FeedbackKind::Error);
        assert_eq!(missing.message, "Sai! Không tìm thấy sản phẩm X1.");
    }

    #[test]
    fn test_only_not_found_vibrates() {
        assert_eq!(cue_for(OutcomeKind::Success).vibrate, None);
        assert_eq!(cue_for(OutcomeKind::Duplicate).vibrate, None);
        assert_eq!(
            cue_for(OutcomeKind::NotFound).vibrate,
            Some(Duration::from_millis(200))
        );
    }

    #[test]
    fn test_cue_speech_text() {
        assert_eq!(cue_for(OutcomeKind::Success).speech, "Quét thành công");
        assert_eq!(cue_for(OutcomeKind::Duplicate).speech, "Đã quét rồi");
        assert_eq!(cue_for(OutcomeKind::NotFound).speech, "Sai");
    }

    #[test]
    fn test_toast_expires() {
        let mut toast = ToastSlot::new(Duration::from_secs(3));
        let t0 = Instant::now();
        toast.show(Feedback::success("a"), t0);

        assert!(toast.current(t0 + Duration::from_millis(2999)).is_some());
        assert!(toast.current(t0 + Duration::from_secs(3)).is_none());
    }

    #[test]
    fn test_newest_toast_replaces_oldest() {
        let mut toast = ToastSlot::default();
        let t0 = Instant::now();
        toast.show(Feedback::success("first"), t0);
        toast.show(Feedback::warning("second"), t0 + Duration::from_secs(2));

        // 2件目の表示時刻から数える
        let shown = toast.current(t0 + Duration::from_secs(4)).unwrap();
        assert_eq!(shown.message, "second");
    }

    #[test]
    fn test_dismiss() {
        let mut toast = ToastSlot::default();
        let t0 = Instant::now();
        toast.show(Feedback::error("x"), t0);
        toast.dismiss();
        assert!(toast.current(t0).is_none());
    }

    #[test]
    fn test_load_messages() {
        assert_eq!(Feedback::loaded(12).message, "Tải lên 12 mục thành công!");
        let failed = Feedback::load_failed("hỏng");
        assert_eq!(failed.kind, FeedbackKind::Error);
        assert_eq!(failed.message, "Lỗi khi đọc file: hỏng");
    }
}
