//! Google News RSS client for per-keyword feed search

use chrono::NaiveDate;
use reqwest::Client;
use tracing::{info, warn};

use newsrelay_core::{redact, Article, RelayError, RelayResult, RssLocale};

use crate::sanitize::{normalize_pub_date, strip_tags};

const PROVIDER: &str = "Google News RSS";
const DEFAULT_BASE_URL: &str = "https://news.google.com/rss/search";

/// Client for the Google News RSS search feed
///
/// Unauthenticated; the locale triple pins the feed edition. Results keep
/// feed order and are never re-ranked.
pub struct GoogleNewsRssClient {
    client: Client,
    base_url: String,
    locale: RssLocale,
}

impl GoogleNewsRssClient {
    /// Create a new client against the production feed
    pub fn new(locale: RssLocale) -> Self {
        Self::with_base_url(locale, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom feed URL (used by tests)
    pub fn with_base_url(locale: RssLocale, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            locale,
        }
    }

    /// Fetch the feed for a term, capped to `max_results` in feed order.
    ///
    /// A feed that fetches but does not parse as RSS yields an empty list
    /// rather than an error; item-level records missing a title or link are
    /// skipped. `today` is the publication-date fallback.
    pub async fn search(
        &self,
        term: &str,
        max_results: usize,
        today: NaiveDate,
    ) -> RelayResult<Vec<Article>> {
        let url = format!(
            "{}?q={}&hl={}&gl={}&ceid={}",
            self.base_url,
            urlencoding::encode(term),
            self.locale.language,
            self.locale.region,
            self.locale.edition,
        );

        info!("Google News RSS search: term='{}', limit={}", term, max_results);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::upstream(
                PROVIDER,
                Some(status.as_u16()),
                format!("feed fetch returned status {}", status.as_u16()),
            ));
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| RelayError::upstream(PROVIDER, None, redact(&e.to_string())))?;

        let channel = match rss::Channel::read_from(&content[..]) {
            Ok(channel) => channel,
            Err(e) => {
                warn!("Unparsable Google News feed for '{}': {}", term, e);
                return Ok(Vec::new());
            }
        };

        let mut articles: Vec<Article> = channel
            .items()
            .iter()
            .filter_map(|item| {
                let title = strip_tags(item.title()?);
                let link = item.link()?.to_string();
                Some(Article {
                    title,
                    link,
                    published_date: normalize_pub_date(item.pub_date(), today),
                    source_keyword: None,
                })
            })
            .collect();
        articles.truncate(max_results);

        info!(
            "Google News RSS returned {} items for '{}'",
            articles.len(),
            term
        );
        Ok(articles)
    }
}

fn map_transport_error(e: reqwest::Error) -> RelayError {
    if e.is_timeout() {
        RelayError::timeout(PROVIDER)
    } else {
        RelayError::upstream(PROVIDER, None, redact(&e.to_string()))
    }
}
