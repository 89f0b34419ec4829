//! スキャナー入力（デコーダー）
//!
//! キーボード入力モードのバーコード/QRスキャナーは読み取り1回につき1行を送ってくる。
//! 入力タスクが標準入力を1行ずつ読み、受信時刻とセッション世代を付けてチャネルへ流す。
//! 受信側は届いた順に1件ずつ処理する。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use stock_check_common::{DecodedEvent, ScanCooldown};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 入力1行
#[derive(Debug, Clone)]
pub struct ScannerLine {
    pub text: String,
    /// 読み取り時点のセッション世代
    pub generation: u64,
    pub received: Instant,
}

/// 入力タスクと共有するセッション世代
#[derive(Debug, Clone, Default)]
pub struct GenerationHandle(Arc<AtomicU64>);

impl GenerationHandle {
    pub fn publish(&self, generation: u64) {
        self.0.store(generation, Ordering::SeqCst);
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// 行を読み続けてチャネルへ送る（受信側が閉じたら終了）
pub async fn forward_lines<R>(
    reader: R,
    generation: GenerationHandle,
    tx: mpsc::Sender<ScannerLine>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.strip_suffix('\r').unwrap_or(&line).to_string();
        let line = ScannerLine {
            text,
            generation: generation.current(),
            received: Instant::now(),
        };
        if tx.send(line).await.is_err() {
            break;
        }
    }
    tracing::debug!("scanner input closed");
    Ok(())
}

/// 標準入力の読み取りタスクを起動
pub fn spawn_stdin(generation: GenerationHandle, tx: mpsc::Sender<ScannerLine>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        if let Err(e) = forward_lines(reader, generation, tx).await {
            tracing::warn!(error = %e, "failed to read scanner input");
        }
    })
}

/// 入力行 → 読み取りイベント
///
/// 空行は無視し、直前の読み取りからクールダウン中の行は捨てる。
/// コードは行末の改行以外は加工しない。
#[derive(Debug, Default)]
pub struct Decoder {
    cooldown: ScanCooldown,
}

impl Decoder {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown: ScanCooldown::new(cooldown) }
    }

    pub fn decode(&mut self, line: &ScannerLine) -> Option<DecodedEvent> {
        if line.text.trim().is_empty() {
            return None;
        }
        if !self.cooldown.accept(line.received) {
            tracing::debug!(code = %line.text, "read dropped during cooldown");
            return None;
        }
        Some(DecodedEvent {
            generation: line.generation,
            code: line.text.clone(),
        })
    }

    /// 停止・リセット時に一時停止を解除
    pub fn resume(&mut self) {
        self.cooldown.clear();
    }
}
