//! 対話式スキャン
//!
//! ## 変更履歴
//! - 2026-10-16: 初期作成
//!
//! アップロード画面では入力行をファイルパスとして、スキャン画面では
//! 読み取ったコードとして扱う。`:` で始まる行は操作コマンド。
//! `:` で始まるコードは `::` と入力すると先頭の `:` を1つ外してそのまま照合する。
//! スキャン画面では、コマンド名にない `:xxx` もコードとして扱う。
//! 入力はすべて1本のチャネルから届いた順に1件ずつ処理する。

use crate::announce::Announcer;
use crate::config::Config;
use crate::decoder::{self, Decoder, GenerationHandle, ScannerLine};
use crate::error::{Result, StockCheckError};
use crate::io::{self, Overwrite};
use crate::view;
use std::path::{Path, PathBuf};
use std::time::Instant;
use stock_check_common::{AppState, Dropped, Feedback, ImportError, ScanSession, ToastSlot};
use tokio::sync::mpsc;

/// 操作コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Export,
    Stats,
    List,
    Reset,
    Load(PathBuf),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// `:` で始まる行をコマンドとして解釈（それ以外と `::` で始まる行は None）
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(':')?;
        if rest.starts_with(':') {
            return None;
        }
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "start" => Command::Start,
            "stop" => Command::Stop,
            "toggle" | "t" => Command::Toggle,
            "export" | "x" => Command::Export,
            "stats" => Command::Stats,
            "list" | "ls" => Command::List,
            "reset" => Command::Reset,
            "load" if !arg.is_empty() => Command::Load(PathBuf::from(arg)),
            "help" | "h" => Command::Help,
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown(rest.to_string()),
        };
        Some(command)
    }
}

/// `::X` → `:X`（それ以外はそのまま）
pub fn literal_code(text: &str) -> &str {
    match text.trim_start().strip_prefix(':') {
        Some(rest) if rest.starts_with(':') => rest,
        _ => text,
    }
}

/// ループを続けるか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ScanApp {
    session: ScanSession,
    decoder: Decoder,
    toast: ToastSlot,
    announcer: Announcer,
    generation: GenerationHandle,
    output_dir: PathBuf,
}

impl ScanApp {
    pub fn new(config: &Config, announcer: Announcer, output_dir: PathBuf) -> Self {
        Self {
            session: ScanSession::new(),
            decoder: Decoder::new(config.cooldown()),
            toast: ToastSlot::new(config.toast_duration()),
            announcer,
            generation: GenerationHandle::default(),
            output_dir,
        }
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn generation_handle(&self) -> GenerationHandle {
        self.generation.clone()
    }

    /// 表示中のトースト
    pub fn toast(&self, now: Instant) -> Option<&Feedback> {
        self.toast.current(now)
    }

    fn notify(&mut self, feedback: Feedback) {
        println!("{}", view::render_feedback(&feedback));
        self.toast.show(feedback, Instant::now());
    }

    /// ファイルを読み込んでスキャン画面へ（失敗時はアップロード画面のまま）
    pub async fn load(&mut self, path: &Path) {
        println!("Đang xử lý file... {}", path.display());
        match io::load_items(path).await {
            Ok(items) => {
                let count = items.len();
                self.session.load(items);
                self.generation.publish(self.session.generation());
                self.decoder.resume();
                self.notify(Feedback::loaded(count));
                println!("{}", view::render_stats(&self.session.stats()));
                println!("Gõ :start để bắt đầu quét, :help để xem lệnh.");
            }
            Err(e) => {
                let feedback = load_error_feedback(&e);
                self.notify(feedback);
            }
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.generation.publish(self.session.generation());
        self.decoder.resume();
        self.toast.dismiss();
        println!("Nhập đường dẫn file Excel (.xlsx, .xls):");
    }

    /// 現在の一覧を日付入りファイル名で書き出す（同名ファイルは残す）
    pub fn export(&mut self) -> Result<PathBuf> {
        let path = io::write_results(self.session.items(), &self.output_dir, Overwrite::KeepBoth)?;
        println!("✔ Đã xuất: {}", path.display());
        Ok(path)
    }

    /// 入力1行を処理
    pub async fn handle_line(&mut self, line: ScannerLine) -> Flow {
        let scanning = self.session.state() == AppState::Scanning;
        match Command::parse(&line.text) {
            Some(Command::Unknown(_)) if scanning => {}
            Some(command) => return self.run_command(command).await,
            None => {}
        }

        if scanning {
            let text = literal_code(&line.text).to_string();
            self.handle_code(&ScannerLine { text, ..line });
        } else {
            let path = line.text.trim();
            if !path.is_empty() {
                self.load(Path::new(path)).await;
            }
        }
        Flow::Continue
    }

    fn handle_code(&mut self, line: &ScannerLine) {
        if !self.session.is_scanning() {
            if !line.text.trim().is_empty() {
                println!("(Đang dừng quét, gõ :start để quét)");
            }
            return;
        }

        let Some(event) = self.decoder.decode(line) else {
            return;
        };

        match self.session.handle(&event) {
            Ok(outcome) => {
                self.notify(Feedback::for_outcome(&outcome));
                self.announcer.announce(outcome.kind());
                let stats = self.session.stats();
                println!("  {}", view::render_stats(&stats));
                if stats.is_complete() {
                    println!("✔ Đã quét đủ tất cả sản phẩm. Gõ :export để xuất Excel.");
                }
            }
            Err(Dropped::Stale) | Err(Dropped::NotScanning) => {}
        }
    }

    async fn run_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Start => {
                if self.session.start() {
                    self.decoder.resume();
                    println!("▶ Bắt đầu quét");
                } else {
                    println!("Chưa có danh sách. Nhập đường dẫn file Excel trước.");
                }
            }
            Command::Stop => {
                self.session.stop();
                self.decoder.resume();
                println!("⏸ Dừng quét");
            }
            Command::Toggle => {
                if self.session.state() != AppState::Scanning {
                    println!("Chưa có danh sách. Nhập đường dẫn file Excel trước.");
                } else {
                    let running = self.session.toggle();
                    self.decoder.resume();
                    println!("{}", if running { "▶ Bắt đầu quét" } else { "⏸ Dừng quét" });
                }
            }
            Command::Export => {
                if self.session.state() != AppState::Scanning {
                    println!("Chưa có danh sách để xuất.");
                } else if let Err(e) = self.export() {
                    self.notify(Feedback::error(e.to_string()));
                }
            }
            Command::Stats => {
                println!("{}", view::render_stats(&self.session.stats()));
                if let Some(feedback) = self.toast(Instant::now()) {
                    println!("{}", view::render_feedback(feedback));
                }
            }
            Command::List => println!("{}", view::render_table(self.session.items())),
            Command::Reset => self.reset(),
            Command::Load(path) => {
                self.reset();
                self.load(&path).await;
            }
            Command::Help => println!("{}", view::HELP),
            Command::Quit => return Flow::Quit,
            Command::Unknown(name) => println!("Lệnh không hợp lệ: :{} (gõ :help)", name),
        }
        Flow::Continue
    }
}

/// 読み込み失敗のトースト
///
/// 拡張子違いはそのメッセージだけ、それ以外は「Lỗi khi đọc file: ...」。
fn load_error_feedback(error: &StockCheckError) -> Feedback {
    match error.as_import_error() {
        Some(ImportError::UnsupportedFileType(_)) => Feedback::error(error.to_string()),
        Some(_) => {
            tracing::debug!(error = %error, "spreadsheet rejected");
            Feedback::load_failed(error)
        }
        None => {
            tracing::warn!(error = %error, "failed to read spreadsheet file");
            Feedback::load_failed(error)
        }
    }
}

/// 対話式スキャンを実行
pub async fn run_scan(
    input: Option<PathBuf>,
    config: &Config,
    output_dir: PathBuf,
    speech: bool,
) -> Result<()> {
    println!("📦 Trình quét QR Code Kho hàng\n");

    let announcer = Announcer::from_config(config, speech);
    let mut app = ScanApp::new(config, announcer, output_dir);

    let (tx, mut rx) = mpsc::channel(64);
    let reader = decoder::spawn_stdin(app.generation_handle(), tx);

    match input {
        Some(path) => app.load(&path).await,
        None => println!("Nhập đường dẫn file Excel (.xlsx, .xls):"),
    }

    while let Some(line) = rx.recv().await {
        if app.handle_line(line).await == Flow::Quit {
            break;
        }
    }

    reader.abort();

    let stats = app.session().stats();
    if stats.scanned > 0 {
        println!("\n{}", view::render_stats(&stats));
    }
    println!("Tạm biệt!");
    Ok(())
}
