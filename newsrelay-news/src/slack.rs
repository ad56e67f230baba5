//! Slack incoming-webhook notification delivery

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use newsrelay_core::{redact, Article, Delivery, ResearchItem};

/// A single entry of the notification body
///
/// Both article and research results collapse into this shape; research
/// items carry no date.
#[derive(Debug, Clone)]
pub struct MessageLine {
    pub title: String,
    pub link: String,
    pub date: Option<NaiveDate>,
    pub keyword: Option<String>,
}

impl From<&Article> for MessageLine {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            link: article.link.clone(),
            date: Some(article.published_date),
            keyword: article.source_keyword.clone(),
        }
    }
}

impl From<&ResearchItem> for MessageLine {
    fn from(item: &ResearchItem) -> Self {
        Self {
            title: item.title.clone(),
            link: item.link.clone(),
            date: None,
            keyword: item.matched_keyword.clone(),
        }
    }
}

/// Posts aggregated results to a configured Slack incoming webhook
///
/// Delivery is strictly best-effort: a missing webhook skips I/O entirely
/// and any network or HTTP failure is downgraded to a [`Delivery`] record.
pub struct SlackNotifier {
    client: Client,
    webhook_url: Option<String>,
}

impl SlackNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            webhook_url,
        }
    }

    /// Deliver one notification; single attempt, never an error.
    pub async fn notify(
        &self,
        label: &str,
        lines: &[MessageLine],
        period: Option<&str>,
    ) -> Delivery {
        let Some(webhook_url) = &self.webhook_url else {
            warn!("SLACK_WEBHOOK_URL not configured, skipping notification");
            return Delivery::not_configured();
        };

        let message = build_message(label, lines, period);
        info!(
            "Sending Slack notification: label='{}', items={}",
            label,
            lines.len()
        );

        match self.client.post(webhook_url).json(&message).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Slack notification delivered");
                Delivery::sent(format!("Sent {} results to Slack", lines.len()))
            }
            Ok(response) => {
                let status = response.status().as_u16();
                error!("Slack webhook returned status {}", status);
                Delivery::failed(format!("Slack webhook returned status {status}"))
            }
            Err(e) if e.is_timeout() => {
                error!("Slack webhook call timed out");
                Delivery::failed("Slack webhook call timed out")
            }
            Err(e) => {
                let detail = redact(&e.to_string());
                error!("Slack webhook request failed: {}", detail);
                Delivery::failed(format!("Slack webhook request failed: {detail}"))
            }
        }
    }
}

/// Build the Block Kit payload: header, metadata section, result list.
fn build_message(label: &str, lines: &[MessageLine], period: Option<&str>) -> Value {
    let body = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut entry = format!("{}. ", i + 1);
            if let Some(keyword) = &line.keyword {
                entry.push_str(&format!("[{keyword}] "));
            }
            entry.push_str(&format!("<{}|{}>", line.link, line.title));
            if let Some(date) = line.date {
                entry.push_str(&format!(" ({})", date.format("%Y-%m-%d")));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n");

    let meta = match period {
        Some(period) => format!("*기간:* {}\n*검색 결과:* {}개", period, lines.len()),
        None => format!("*검색 결과:* {}개", lines.len()),
    };

    json!({
        "text": format!("📰 뉴스 알림: '{label}'"),
        "blocks": [
            {
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("📰 뉴스 알림: '{label}'")
                }
            },
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": meta }
            },
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": format!("*뉴스 목록:*\n{body}") }
            }
        ]
    })
}
