//! # filegate ヘルスチェッカー
//!
//! Gatewayの `/health` を定期的に取得し、200以外または通信失敗をSNSトピックへ通知する。
//!
//! ## 実行モード
//! - `--interval-secs` 未指定: 1回だけチェックして終了（スケジューラからの起動用）
//! - `--interval-secs N`: N秒ごとにチェックを繰り返す（Ctrl-Cで終了）

mod notify;
mod probe;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::notify::{Notifier, SnsNotifier};
use crate::probe::{Prober, Target};

#[derive(Parser)]
#[command(name = "filegate-healthcheck", about = "Poll /health endpoints and alert on failure")]
struct Cli {
    /// 監視対象（NAME=URL、複数指定可）
    #[arg(long = "target", required = true)]
    targets: Vec<Target>,

    /// 障害通知先のSNSトピックARN（未指定の場合はログ出力のみ）
    #[arg(long)]
    topic_arn: Option<String>,

    /// SNSのリージョン
    #[arg(long, default_value = "us-east-1")]
    region: String,

    /// チェック間隔（秒）
    #[arg(long)]
    interval_secs: Option<u64>,

    /// 1リクエストあたりのタイムアウト（秒）
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let notifier: Option<Box<dyn Notifier>> = match cli.topic_arn {
        Some(topic_arn) => Some(Box::new(SnsNotifier::from_region(&cli.region, topic_arn).await)),
        None => {
            tracing::warn!("--topic-arnが未指定です。障害はログ出力のみ行います");
            None
        }
    };
    let prober = Prober::new(Duration::from_secs(cli.timeout_secs), notifier)?;

    let Some(interval_secs) = cli.interval_secs else {
        let report = prober.sweep(&cli.targets).await;
        let failures = report.iter().filter(|(_, o)| !o.is_healthy()).count();
        tracing::info!(targets = report.len(), failures, "チェック完了");
        return Ok(());
    };

    tracing::info!(
        targets = cli.targets.len(),
        interval_secs,
        "定期チェックを開始します"
    );
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                prober.sweep(&cli.targets).await;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("終了します");
                break;
            }
        }
    }

    Ok(())
}
