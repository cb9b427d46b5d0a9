//! # ヘルスチェック実行
//!
//! 各ターゲットの `/health` を1回ずつ取得し、200以外または通信失敗を障害として通知する。

use std::time::Duration;

use crate::notify::{Notifier, ALERT_SUBJECT};

/// 監視対象（表示名とURL）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub url: String,
}

impl std::str::FromStr for Target {
    type Err = String;

    /// `NAME=URL` 形式を解釈する。名前に `=` は使えない。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, url) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=URL, got '{s}'"))?;
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return Err(format!("expected NAME=URL, got '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            url: url.to_string(),
        })
    }
}

/// 1ターゲットに対するチェック結果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// HTTP 200
    Healthy,
    /// 200以外のステータス
    UnexpectedStatus(u16),
    /// 接続失敗・タイムアウト等
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy)
    }
}

/// 障害通知の本文を組み立てる。
pub fn alert_message(name: &str, status_code: Option<u16>, error: Option<&str>) -> String {
    let mut message = format!("HEALTH >> FAIL ({name})");
    if let Some(code) = status_code {
        message.push_str(&format!(" - Status Code: {code}"));
    }
    if let Some(error) = error {
        message.push_str(&format!(" - Error: {error}"));
    }
    message
}

/// ヘルスチェック実行器。
pub struct Prober {
    client: reqwest::Client,
    /// Noneの場合はログ出力のみ
    notifier: Option<Box<dyn Notifier>>,
}

impl Prober {
    pub fn new(timeout: Duration, notifier: Option<Box<dyn Notifier>>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, notifier })
    }

    /// 1ターゲットをチェックし、障害であれば通知する。
    pub async fn check(&self, target: &Target) -> ProbeOutcome {
        let outcome = match self.client.get(&target.url).send().await {
            Ok(response) if response.status().as_u16() == 200 => ProbeOutcome::Healthy,
            Ok(response) => ProbeOutcome::UnexpectedStatus(response.status().as_u16()),
            Err(e) => ProbeOutcome::Unreachable(e.to_string()),
        };

        let message = match &outcome {
            ProbeOutcome::Healthy => {
                tracing::info!("HEALTH >> OK ({})", target.name);
                return outcome;
            }
            ProbeOutcome::UnexpectedStatus(code) => alert_message(&target.name, Some(*code), None),
            ProbeOutcome::Unreachable(error) => alert_message(&target.name, None, Some(error)),
        };
        tracing::warn!("{message}");

        if let Some(notifier) = &self.notifier {
            // 通知の失敗でチェック全体は止めない
            if let Err(e) = notifier.notify(ALERT_SUBJECT, &message).await {
                tracing::error!(name = %target.name, error = %e, "障害通知に失敗");
            }
        }

        outcome
    }

    /// 全ターゲットを順にチェックする。
    pub async fn sweep(&self, targets: &[Target]) -> Vec<(String, ProbeOutcome)> {
        let mut report = Vec::with_capacity(targets.len());
        for target in targets {
            report.push((target.name.clone(), self.check(target).await));
        }
        report
    }
}
