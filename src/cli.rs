use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "monster-compo")]
#[command(about = "モンスター名解決・編成検索サーバ", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// HTTPサーバを起動
    Serve {
        /// 待ち受けアドレス（デフォルト: 設定ファイルの値）
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// モンスター名を解決してJSONを出力
    Resolve {
        /// モンスター名（"Lushen (2A)" などの2A表記も可）
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// 検索ボックスと同じ検索を実行
    Search {
        /// 検索文字列
        #[arg(required = true)]
        query: String,

        /// 利用可能モンスター名（複数指定可）
        #[arg(short, long)]
        available: Vec<String>,
    },

    /// 設定を表示
    Config {
        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
