use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stock-check")]
#[command(about = "Trình quét QR Code Kho hàng - đối chiếu danh sách Excel với mã quét", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式スキャン（1行 = 1回の読み取り）
    Scan {
        /// 期待一覧のExcelファイル（省略時は起動後にパスを入力）
        input: Option<PathBuf>,

        /// 書き出し先ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 読み上げを無効化
        #[arg(long)]
        no_speech: bool,
    },

    /// コード一覧ファイルを順に照合して結果を書き出し
    Apply {
        /// 期待一覧のExcelファイル
        #[arg(required = true)]
        input: PathBuf,

        /// コード一覧（1行1コード）
        #[arg(short, long, required = true)]
        codes: PathBuf,

        /// 出力ファイル/ディレクトリ（省略時は日付入りファイル名）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 既存ファイルを確認なしで上書き
        #[arg(short, long)]
        force: bool,

        /// 各スキャン結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 書き出し済み結果ファイルの集計を表示
    Stats {
        /// 結果Excelファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 読み込み用の空テンプレートを作成
    Template {
        /// 出力ファイル
        #[arg(short, long, default_value = "mau-danh-sach.xlsx")]
        output: PathBuf,

        /// 既存ファイルを確認なしで上書き
        #[arg(short, long)]
        force: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 読み上げコマンドを設定（例: "espeak-ng -v vi"）
        #[arg(long)]
        set_speech_command: Option<String>,

        /// 読み上げコマンドを削除
        #[arg(long)]
        clear_speech_command: bool,

        /// 読み取り後の一時停止（ミリ秒）
        #[arg(long)]
        set_cooldown_ms: Option<u64>,

        /// 端末ベルの有効/無効
        #[arg(long)]
        set_bell: Option<bool>,

        /// 既定の書き出し先
        #[arg(long)]
        set_export_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
