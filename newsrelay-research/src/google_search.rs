//! Google Custom Search JSON API client

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use newsrelay_core::{
    redact, DateWindow, GoogleSearchCredentials, RelayError, RelayResult, ResearchItem,
};

const PROVIDER: &str = "Google Custom Search";
const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Fixed page size of the endpoint
const PAGE_SIZE: usize = 10;
/// Page offsets 1, 11, 21: three pages, 30 results at most
const MAX_PAGES: usize = 3;

/// Coarse relative date restriction accepted by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateRestrict {
    #[serde(rename = "d1")]
    PastDay,
    #[serde(rename = "w1")]
    PastWeek,
    #[serde(rename = "m1")]
    PastMonth,
    #[serde(rename = "y1")]
    PastYear,
}

impl DateRestrict {
    fn as_param(self) -> &'static str {
        match self {
            DateRestrict::PastDay => "d1",
            DateRestrict::PastWeek => "w1",
            DateRestrict::PastMonth => "m1",
            DateRestrict::PastYear => "y1",
        }
    }
}

/// Client for the Custom Search endpoint
pub struct GoogleSearchClient {
    client: Client,
    endpoint: String,
    credentials: GoogleSearchCredentials,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleSearchClient {
    /// Create a new client with the production endpoint
    pub fn new(credentials: GoogleSearchCredentials) -> Self {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT.to_string())
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_endpoint(credentials: GoogleSearchCredentials, endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
            credentials,
        }
    }

    /// Search the web for a single term, up to `max_results` items.
    ///
    /// Pages are requested sequentially (start offsets 1, 11, 21) until the
    /// requested total is reached or a short page signals exhaustion. An
    /// explicit `window` is translated to the endpoint's date-range sort
    /// expression and silently takes precedence over `date_restrict` when
    /// both are supplied.
    pub async fn search(
        &self,
        term: &str,
        max_results: usize,
        language: Option<&str>,
        window: Option<&DateWindow>,
        date_restrict: Option<DateRestrict>,
    ) -> RelayResult<Vec<ResearchItem>> {
        let sort_expr = window.map(|w| {
            format!(
                "date:r:{}:{}",
                w.start.format("%Y%m%d"),
                w.end.format("%Y%m%d")
            )
        });
        let language_restrict = language.map(|code| {
            if code.starts_with("lang_") {
                code.to_string()
            } else {
                format!("lang_{code}")
            }
        });

        info!(
            "Google search: term='{}', max_results={}, sort={:?}, date_restrict={:?}",
            term, max_results, sort_expr, date_restrict
        );

        let mut items: Vec<ResearchItem> = Vec::new();
        for page in 0..MAX_PAGES {
            if items.len() >= max_results {
                break;
            }
            let start = page * PAGE_SIZE + 1;
            let page_items = self
                .fetch_page(
                    term,
                    start,
                    language_restrict.as_deref(),
                    sort_expr.as_deref(),
                    date_restrict,
                )
                .await?;
            let page_len = page_items.len();
            items.extend(page_items);

            // A short page means the index is exhausted
            if page_len < PAGE_SIZE {
                break;
            }
        }
        items.truncate(max_results);

        info!(
            "Google search returned {} items for '{}'",
            items.len(),
            term
        );
        Ok(items)
    }

    async fn fetch_page(
        &self,
        term: &str,
        start: usize,
        language_restrict: Option<&str>,
        sort_expr: Option<&str>,
        date_restrict: Option<DateRestrict>,
    ) -> RelayResult<Vec<ResearchItem>> {
        let num_param = PAGE_SIZE.to_string();
        let start_param = start.to_string();
        let mut request = self.client.get(&self.endpoint).query(&[
            ("key", self.credentials.api_key.as_str()),
            ("cx", self.credentials.engine_id.as_str()),
            ("q", term),
            ("num", num_param.as_str()),
            ("start", start_param.as_str()),
        ]);
        if let Some(lr) = language_restrict {
            request = request.query(&[("lr", lr)]);
        }
        if let Some(sort) = sort_expr {
            request = request.query(&[("sort", sort)]);
        } else if let Some(restrict) = date_restrict {
            request = request.query(&[("dateRestrict", restrict.as_param())]);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        let data: SearchResponse = response.json().await.map_err(|e| {
            RelayError::upstream(PROVIDER, None, redact(&format!("unreadable response: {e}")))
        })?;

        Ok(data
            .items
            .into_iter()
            .map(|item| ResearchItem {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
                matched_keyword: None,
            })
            .collect())
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
        // The Custom Search API returns 403 for projects without billing
        // enabled, even within the free quota. This is a setup problem, not
        // a transient failure, so it gets its own guidance.
        403 => RelayError::forbidden(
            PROVIDER,
            "the API key's Google Cloud project must have billing enabled, \
             even under the free quota",
        ),
        429 => RelayError::rate_limited(PROVIDER),
        code => {
            let snippet: String = body.chars().take(200).collect();
            RelayError::upstream(PROVIDER, Some(code), redact(&snippet))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> GoogleSearchCredentials {
        GoogleSearchCredentials {
            api_key: "test-key".to_string(),
            engine_id: "test-cx".to_string(),
        }
    }

    fn page_body(count: usize, offset: usize) -> serde_json::Value {
        let items: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "title": format!("result {}", offset + i),
                    "link": format!("https://example.com/{}", offset + i),
                    "snippet": "snippet text",
                })
            })
            .collect();
        serde_json::json!({ "items": items })
    }

    #[tokio::test]
    async fn test_short_page_stops_pagination() {
        let server = MockServer::start().await;
        for (start, count) in [(1, 10), (11, 10), (21, 7)] {
            Mock::given(method("GET"))
                .and(query_param("start", start.to_string()))
                .and(query_param("num", "10"))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_body(count, start)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = GoogleSearchClient::with_endpoint(credentials(), server.uri());
        let items = client.search("ai", 30, None, None, None).await.unwrap();

        assert_eq!(items.len(), 27);
        assert_eq!(items[0].title, "result 1");
        assert_eq!(items[26].title, "result 27");
    }

    #[tokio::test]
    async fn test_stops_once_requested_total_reached() {
        let server = MockServer::start().await;
        for start in [1, 11] {
            Mock::given(method("GET"))
                .and(query_param("start", start.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_body(10, start)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = GoogleSearchClient::with_endpoint(credentials(), server.uri());
        let items = client.search("ai", 15, None, None, None).await.unwrap();

        // Two pages fetched, truncated to the requested total
        assert_eq!(items.len(), 15);
    }

    #[tokio::test]
    async fn test_explicit_window_beats_date_restrict() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("sort", "date:r:20250601:20250610"))
            .and(query_param_is_missing("dateRestrict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(2, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let window = DateWindow {
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        };
        let client = GoogleSearchClient::with_endpoint(credentials(), server.uri());
        let items = client
            .search("ai", 10, None, Some(&window), Some(DateRestrict::PastWeek))
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_date_restrict_used_without_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("dateRestrict", "m1"))
            .and(query_param_is_missing("sort"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleSearchClient::with_endpoint(credentials(), server.uri());
        let items = client
            .search("ai", 10, None, None, Some(DateRestrict::PastMonth))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_language_code_gets_lang_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("lr", "lang_ko"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleSearchClient::with_endpoint(credentials(), server.uri());
        client.search("ai", 10, Some("ko"), None, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_billing_guidance() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string(
                "{\"error\": {\"code\": 403, \"message\": \"Project blocked\"}}",
            ))
            .mount(&server)
            .await;

        let client = GoogleSearchClient::with_endpoint(credentials(), server.uri());
        let err = client.search("ai", 10, None, None, None).await.unwrap_err();
        match err {
            RelayError::UpstreamForbidden { message, .. } => {
                assert!(message.contains("billing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_body_is_redacted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string(
                "failed url https://www.googleapis.com/customsearch/v1?key=AIzaSecret&cx=engine123",
            ))
            .mount(&server)
            .await;

        let client = GoogleSearchClient::with_endpoint(credentials(), server.uri());
        let err = client.search("ai", 10, None, None, None).await.unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("AIzaSecret"));
        assert!(!msg.contains("engine123"));
    }
}
