use clap::{Parser, Subcommand};
use kenshin_common::VariantKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kenshin-convert")]
#[command(about = "健診データ（タブ区切り）を提出先フォーマットへ変換するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時は ~/.config/kenshin-convert/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力ファイルを会社別に変換
    Convert {
        /// 入力ファイル（タブ区切り）
        #[arg(required = true)]
        input: PathBuf,

        /// 提出先 (kenpo/sangyoui/jinji/kumiai)
        #[arg(short, long, default_value = "kenpo")]
        format: VariantKind,

        /// 出力先フォルダ（省略時は設定ファイルの値、なければカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 名簿にテンプレート行を含めない
        #[arg(long)]
        no_roster_template: bool,
    },

    /// 提出先フォーマットの一覧
    Formats,

    /// 会社一覧を表示
    Companies,

    /// 設定を表示
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定の設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}
