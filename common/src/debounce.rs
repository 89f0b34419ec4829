//! デコーダーのクールダウン
//!
//! カメラ/スキャナーは1回の読み取りで同じコードを連続して出すことがあるため、
//! 読み取りを受け付けたら一定時間は次の読み取りを捨てる（一時停止→再開）。

use std::time::{Duration, Instant};

/// 既定のクールダウン（1.5秒）
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct ScanCooldown {
    cooldown: Duration,
    paused_until: Option<Instant>,
}

impl Default for ScanCooldown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl ScanCooldown {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            paused_until: None,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// 読み取りを受け付けるか判定
    ///
    /// 受け付けた場合はその時点から `cooldown` の間一時停止する。
    /// 一時停止中の読み取りはコードに関係なく捨てる。
    pub fn accept(&mut self, now: Instant) -> bool {
        if self.is_paused(now) {
            return false;
        }
        self.paused_until = Some(now + self.cooldown);
        true
    }

    pub fn is_paused(&self, now: Instant) -> bool {
        matches!(self.paused_until, Some(until) if now < until)
    }

    /// 停止・リセット時に一時停止を解除
    pub fn clear(&mut self) {
        self.paused_until = None;
    }
}
