use clap::Parser;
use qr_stock_check::{batch, cli, config, error, io, logging, scan, view};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use stock_check_common::Feedback;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Scan { input, output, no_speech } => {
            let output_dir = config.output_dir(output.as_deref());
            scan::run_scan(input, &config, output_dir, !no_speech).await?;
        }

        Commands::Apply { input, codes, output, force, json } => {
            if !json {
                println!("📦 stock-check - đối chiếu\n");
                println!("[1/3] Đang đọc danh sách...");
            }
            let items = io::load_items(&input).await?;
            if !json {
                println!("✔ {}\n", Feedback::loaded(items.len()).message);
            }

            let content = tokio::fs::read_to_string(&codes).await?;
            let codes = batch::parse_codes(&content);

            if !json {
                println!("[2/3] Đang đối chiếu {} mã...", codes.len());
            }
            let report = batch::replay(items, &codes);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for outcome in &report.outcomes {
                    println!("  {}", view::render_feedback(&Feedback::for_outcome(outcome)));
                }
                println!(
                    "✔ Thành công: {}  |  Đã quét rồi: {}  |  Không tìm thấy: {}\n",
                    report.success, report.duplicate, report.not_found
                );
                println!("[3/3] Đang xuất kết quả...");
            }

            let output_dir = config.output_dir(output.as_deref());
            let path = io::write_results(&report.items, &output_dir, io::Overwrite::from_force(force))?;

            if json {
                tracing::info!(path = %path.display(), "results written");
            } else {
                println!("✔ Đã xuất: {}", path.display());
                println!("\n{}", view::render_stats(&report.stats));
            }
        }

        Commands::Stats { input } => {
            let rows = io::load_result_rows(&input).await?;
            let stats = batch::summarize_rows(&rows);
            println!("{}", view::render_stats(&stats));
            if stats.is_complete() {
                println!("✔ Đã quét đủ tất cả sản phẩm.");
            }
        }

        Commands::Template { output, force } => {
            let path = io::write_template(&output, io::Overwrite::from_force(force))?;
            println!("✔ Đã tạo file mẫu: {}", path.display());
        }

        Commands::Config {
            set_speech_command,
            clear_speech_command,
            set_cooldown_ms,
            set_bell,
            set_export_dir,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(command) = set_speech_command {
                config.speech_command = Some(command);
                changed = true;
            }
            if clear_speech_command {
                config.speech_command = None;
                changed = true;
            }
            if let Some(ms) = set_cooldown_ms {
                config.cooldown_ms = ms;
                changed = true;
            }
            if let Some(bell) = set_bell {
                config.bell = bell;
                changed = true;
            }
            if let Some(dir) = set_export_dir {
                config.export_dir = Some(dir);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ Đã lưu cấu hình: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Cấu hình:");
                println!(
                    "  Lệnh đọc: {}",
                    config.speech_command.as_deref().unwrap_or("(chưa đặt)")
                );
                println!("  Ngôn ngữ: {}", config.speech_lang);
                println!("  Tạm dừng sau khi quét: {}ms", config.cooldown_ms);
                println!("  Thời gian thông báo: {}s", config.toast_seconds);
                println!("  Chuông: {}", if config.bell { "bật" } else { "tắt" });
                println!("  Thư mục xuất: {}", config.output_dir(None).display());
            }
        }
    }

    Ok(())
}
