//! 端末表示
//!
//! 表示は一覧を借用するだけで変更しない。

use stock_check_common::{Feedback, FeedbackKind, ScanItem, ScanStats};

pub const HELP: &str = "\
Lệnh: :start  bắt đầu quét      :stop   dừng quét
      :toggle bật/tắt quét      :export xuất Excel
      :stats  thống kê          :list   danh sách
      :reset  tải file khác     :load <file>
      :quit   thoát
Mã bắt đầu bằng ':' thì gõ thêm một ':' (ví dụ ::A-01 để quét :A-01).";

/// トースト1行
pub fn render_feedback(feedback: &Feedback) -> String {
    let icon = match feedback.kind {
        FeedbackKind::Success => "✔",
        FeedbackKind::Error => "✖",
        FeedbackKind::Warning => "⚠",
    };
    format!("{} {}", icon, feedback.message)
}

/// カウンター
pub fn render_stats(stats: &ScanStats) -> String {
    format!(
        "Tổng cộng: {}  |  Đã quét: {}  |  Còn lại: {}",
        stats.total, stats.scanned, stats.remaining
    )
}

/// アイテム一覧の表
pub fn render_table(items: &[ScanItem]) -> String {
    let headers = ["Mã ĐH", "Mã SP", "Tên sản phẩm", "SL", "Trạng thái"];
    let rows: Vec<[String; 5]> = items
        .iter()
        .map(|item| {
            [
                item.order_id.clone(),
                item.product_id.clone(),
                item.product_name.clone(),
                item.quantity.to_string(),
                item.status.label().to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String], marker: char| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect();
        format!("{} {}", marker, padded.join("  ").trim_end())
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![format_row(header_cells.as_slice(), ' ')];
    for (item, row) in items.iter().zip(&rows) {
        let marker = if item.is_scanned() { '✔' } else { ' ' };
        lines.push(format_row(row.as_slice(), marker));
    }
    lines.join("\n")
}

/// 文字数で右側を埋める（全角幅は考慮しない）
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}
