//! Naver news search API client

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::info;

use newsrelay_core::{redact, Article, NaverCredentials, RelayError, RelayResult, SortBy};

use crate::rank::{relevance_score, select_top, RankedCandidate};
use crate::sanitize::{normalize_pub_date, strip_tags};

const PROVIDER: &str = "Naver news API";
const DEFAULT_ENDPOINT: &str = "https://openapi.naver.com/v1/search/news.json";

/// Hard page-size limit of the search endpoint
const MAX_PAGE_SIZE: usize = 100;
/// Candidate pool fetched when relevance ranking is requested
const RANKING_POOL_SIZE: usize = 30;

/// Client for the Naver news search endpoint
pub struct NaverNewsClient {
    client: Client,
    endpoint: String,
    credentials: NaverCredentials,
}

#[derive(Debug, Deserialize)]
struct NaverNewsResponse {
    #[serde(default)]
    items: Vec<NaverNewsItem>,
}

#[derive(Debug, Deserialize)]
struct NaverNewsItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    link: String,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
}

impl NaverNewsClient {
    /// Create a new client with the production endpoint
    pub fn new(credentials: NaverCredentials) -> Self {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT.to_string())
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_endpoint(credentials: NaverCredentials, endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
            credentials,
        }
    }

    /// Search news for a single term.
    ///
    /// With `rank_by_relevance` a fixed candidate pool is fetched and
    /// re-scored against title + description before truncation to
    /// `max_results`; otherwise the endpoint's own ordering is kept. The
    /// pool size caps the achievable result count when ranking is on.
    ///
    /// `today` is the fallback publication date for records whose upstream
    /// date is absent or unparsable.
    pub async fn search(
        &self,
        term: &str,
        max_results: usize,
        sort: SortBy,
        rank_by_relevance: bool,
        today: NaiveDate,
    ) -> RelayResult<Vec<Article>> {
        let display_count = if rank_by_relevance {
            RANKING_POOL_SIZE.min(MAX_PAGE_SIZE)
        } else {
            max_results.min(MAX_PAGE_SIZE)
        };
        let sort_param = match sort {
            SortBy::Relevance => "sim",
            SortBy::Latest => "date",
        };

        info!(
            "Naver news search: term='{}', display={}, sort={}, relevance_filter={}",
            term, display_count, sort_param, rank_by_relevance
        );

        let display_param = display_count.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header("X-Naver-Client-Id", &self.credentials.client_id)
            .header("X-Naver-Client-Secret", &self.credentials.client_secret)
            .query(&[
                ("query", term),
                ("display", display_param.as_str()),
                ("sort", sort_param),
                ("start", "1"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        let data: NaverNewsResponse = response.json().await.map_err(|e| {
            RelayError::upstream(PROVIDER, None, redact(&format!("unreadable response: {e}")))
        })?;

        let candidates: Vec<RankedCandidate> = data
            .items
            .into_iter()
            .map(|item| {
                let title = strip_tags(&item.title);
                let description = strip_tags(&item.description);
                let score = if rank_by_relevance {
                    relevance_score(term, &title, &description)
                } else {
                    0
                };
                RankedCandidate {
                    score,
                    article: Article {
                        title,
                        link: item.link,
                        published_date: normalize_pub_date(item.pub_date.as_deref(), today),
                        source_keyword: None,
                    },
                }
            })
            .collect();

        let articles = select_top(candidates, max_results, rank_by_relevance);
        info!(
            "Naver news search returned {} articles for '{}'",
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

fn map_status_error(status: StatusCode, body: &str) -> RelayError {
    match status.as_u16() {
        401 => RelayError::auth_failed(PROVIDER),
        429 => RelayError::rate_limited(PROVIDER),
        code => {
            let snippet: String = body.chars().take(200).collect();
            RelayError::upstream(PROVIDER, Some(code), redact(&snippet))
        }
    }
}
