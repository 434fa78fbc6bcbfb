use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use monster_compo::cli::{Cli, Commands};
use monster_compo::config::Config;
use monster_compo::resolver::Resolver;
use monster_compo::server;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let log_json = std::env::var("MONSTER_COMPO_LOG_JSON")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
        .unwrap_or(false);

    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Serve { bind } => {
            server::serve(&config, bind.as_deref()).await?;
        }

        Commands::Resolve { names } => {
            let resolver = Resolver::from_config(&config)?;

            let pb = if names.len() > 1 {
                ProgressBar::new_spinner()
            } else {
                ProgressBar::hidden()
            };
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed}]")
                    .context("プログレスバーの書式が不正")?,
            );
            pb.set_message(format!("{}件を解決中...", names.len()));
            pb.enable_steady_tick(Duration::from_millis(100));

            let results = resolver.resolve_batch(&names).await;
            pb.finish_and_clear();

            let found = results.values().filter(|r| r.found).count();
            eprintln!("✔ {}/{}件を解決", found, results.len());
            println!("{}", serde_json::to_string_pretty(&results)?);
        }

        Commands::Search { query, available } => {
            let resolver = Resolver::from_config(&config)?;
            resolver.set_available(available).await;

            let hits = resolver.search(&query).await;
            eprintln!("✔ {}件ヒット", hits.len());
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }

        Commands::Config { show } => {
            if show {
                let path = Config::config_path()?;
                println!("設定:");
                println!("  ファイル: {}", path.display());
                println!("  モンスターDB: {}", config.api_base_url);
                println!("  画像ベース: {}", config.static_base_url);
                println!("  待ち受け: {}", config.bind);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  解決時の取得件数: {}", config.resolve_limit);
                println!("  検索時の取得件数: {}", config.search_limit);
                println!(
                    "  エイリアスファイル: {}",
                    config
                        .alias_file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "なし".into())
                );
            } else {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
