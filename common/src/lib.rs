//! Stock Check Common Library
//!
//! CLIと他のフロントエンドで共有される型・照合エンジン・スプレッドシート入出力

pub mod types;
pub mod engine;
pub mod session;
pub mod debounce;
pub mod feedback;
pub mod error;

#[cfg(feature = "excel")]
pub mod excel;

pub use types::{Quantity, ScanItem, ScanStats, ScanStatus};
pub use engine::{apply_scan, apply_scan_at, OutcomeKind, ScanOutcome};
pub use session::{AppState, DecodedEvent, Dropped, ScanSession};
pub use debounce::ScanCooldown;
pub use feedback::{cue_for, Cue, Feedback, FeedbackKind, ToastSlot};
pub use error::{Error, ImportError, InvalidQuantity, Result};
