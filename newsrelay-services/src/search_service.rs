//! Keyword search orchestration
//!
//! Drives the full request pipeline: parse keywords, resolve the date
//! window, fan out across the chosen provider, merge, and relay the result
//! set to Slack. Provider errors fail the request; delivery failures never
//! do.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use newsrelay_core::{
    parse_keywords, AppConfig, Article, Clock, DateWindow, Delivery, RelayError, RelayResult,
    ResearchItem, SortBy,
};
use newsrelay_news::{GoogleNewsRssClient, MessageLine, NaverNewsClient, SlackNotifier};
use newsrelay_research::{DateRestrict, GoogleSearchClient};

use crate::aggregator::aggregate_terms;

/// Per-keyword result count for the news providers
const NEWS_RESULTS_PER_KEYWORD: usize = 10;
/// Default and bounds for the research per-keyword count
const RESEARCH_DEFAULT_RESULTS: usize = 10;
const RESEARCH_MAX_RESULTS: usize = 30;

/// Which news provider a search fans out across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NewsProvider {
    #[default]
    Naver,
    Rss,
}

/// Inbound news-search request
#[derive(Debug, Clone, Deserialize)]
pub struct NewsSearchRequest {
    /// Raw keyword text; comma- and/or newline-separated terms
    pub keyword: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default = "default_relevance_filter")]
    pub use_relevance_filter: bool,
    #[serde(default)]
    pub provider: NewsProvider,
}

fn default_relevance_filter() -> bool {
    true
}

/// Aggregated news-search result
#[derive(Debug, Clone, Serialize)]
pub struct NewsSearchResponse {
    pub keywords_used: Vec<String>,
    pub period: String,
    pub news_count: usize,
    pub news: Vec<Article>,
    pub delivery: Delivery,
}

/// Inbound research request
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchSearchRequest {
    /// Raw keyword text; comma- and/or newline-separated terms
    pub keyword: String,
    /// Locale code for the `lr` language restrict, e.g. `ko`
    pub language: Option<String>,
    /// Per-keyword result count, 1..=30
    pub max_results: Option<usize>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub date_restrict: Option<DateRestrict>,
}

/// Aggregated research result
#[derive(Debug, Clone, Serialize)]
pub struct ResearchSearchResponse {
    pub keywords_used: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub result_count: usize,
    pub results: Vec<ResearchItem>,
    pub delivery: Delivery,
}

/// The aggregation pipeline service
///
/// Holds one client per provider; providers whose credentials are absent
/// stay `None` and surface a configuration error when requested.
pub struct SearchService {
    naver: Option<NaverNewsClient>,
    rss: GoogleNewsRssClient,
    research: Option<GoogleSearchClient>,
    notifier: SlackNotifier,
    clock: Arc<dyn Clock>,
}

impl SearchService {
    /// Build the service from process configuration
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            naver: config.naver.clone().map(NaverNewsClient::new),
            rss: GoogleNewsRssClient::new(config.rss_locale.clone()),
            research: config.google_search.clone().map(GoogleSearchClient::new),
            notifier: SlackNotifier::new(config.slack_webhook_url.clone()),
            clock,
        }
    }

    /// Build the service from pre-constructed clients (used by tests)
    pub fn with_clients(
        naver: Option<NaverNewsClient>,
        rss: GoogleNewsRssClient,
        research: Option<GoogleSearchClient>,
        notifier: SlackNotifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            naver,
            rss,
            research,
            notifier,
            clock,
        }
    }

    /// Run the news pipeline: fan keywords out across the chosen provider,
    /// merge, and relay the result to Slack.
    pub async fn search_news(
        &self,
        request: &NewsSearchRequest,
    ) -> RelayResult<NewsSearchResponse> {
        let keywords = parse_keywords(&request.keyword);
        if keywords.is_empty() {
            return Err(RelayError::invalid_input("missing keyword"));
        }

        let now = self.clock.now();
        let today = now.date_naive();
        let window = DateWindow::resolve(
            request.start_date.as_deref(),
            request.end_date.as_deref(),
            now,
        )?;

        info!(
            "News search: keywords={:?}, period={}, provider={:?}",
            keywords,
            window.label(),
            request.provider
        );

        let news = match request.provider {
            NewsProvider::Naver => {
                let client = self.naver.as_ref().ok_or_else(|| {
                    RelayError::config(
                        "Naver API credentials are not configured; \
                         set NAVER_CLIENT_ID and NAVER_CLIENT_SECRET",
                    )
                })?;
                let sort = request.sort_by;
                let rank = request.use_relevance_filter;
                aggregate_terms(&keywords, |term| async move {
                    client
                        .search(&term, NEWS_RESULTS_PER_KEYWORD, sort, rank, today)
                        .await
                })
                .await?
            }
            NewsProvider::Rss => {
                let client = &self.rss;
                aggregate_terms(&keywords, |term| async move {
                    client.search(&term, NEWS_RESULTS_PER_KEYWORD, today).await
                })
                .await?
            }
        };

        let label = keywords.join(", ");
        let period = window.label();
        let lines: Vec<MessageLine> = news.iter().map(MessageLine::from).collect();
        let delivery = self.notifier.notify(&label, &lines, Some(&period)).await;

        info!(
            "News search complete: {} items, delivered={}",
            news.len(),
            delivery.sent
        );

        Ok(NewsSearchResponse {
            keywords_used: keywords,
            period,
            news_count: news.len(),
            news,
            delivery,
        })
    }

    /// Run the research pipeline against the web-search provider.
    pub async fn search_research(
        &self,
        request: &ResearchSearchRequest,
    ) -> RelayResult<ResearchSearchResponse> {
        let keywords = parse_keywords(&request.keyword);
        if keywords.is_empty() {
            return Err(RelayError::invalid_input("missing keyword"));
        }

        let client = self.research.as_ref().ok_or_else(|| {
            RelayError::config(
                "Google search credentials are not configured; \
                 set GOOGLE_API_KEY and GOOGLE_SEARCH_ENGINE_ID",
            )
        })?;

        let max_results = request.max_results.unwrap_or(RESEARCH_DEFAULT_RESULTS);
        if max_results < 1 || max_results > RESEARCH_MAX_RESULTS {
            return Err(RelayError::invalid_input(format!(
                "max_results must be between 1 and {RESEARCH_MAX_RESULTS} (got: {max_results})"
            )));
        }

        // A window is only resolved when the caller supplies at least one
        // bound; otherwise the coarse date_restrict (if any) rides alone.
        let window = if request.start_date.is_some() || request.end_date.is_some() {
            Some(DateWindow::resolve(
                request.start_date.as_deref(),
                request.end_date.as_deref(),
                self.clock.now(),
            )?)
        } else {
            None
        };

        info!(
            "Research search: keywords={:?}, max_results={}, window={:?}, date_restrict={:?}",
            keywords, max_results, window, request.date_restrict
        );

        let language = request.language.as_deref();
        let window_ref = window.as_ref();
        let date_restrict = request.date_restrict;
        let results = aggregate_terms(&keywords, |term| async move {
            client
                .search(&term, max_results, language, window_ref, date_restrict)
                .await
        })
        .await?;

        let label = keywords.join(", ");
        let period = window.map(|w| w.label());
        let lines: Vec<MessageLine> = results.iter().map(MessageLine::from).collect();
        let delivery = self.notifier.notify(&label, &lines, period.as_deref()).await;

        info!(
            "Research search complete: {} items, delivered={}",
            results.len(),
            delivery.sent
        );

        Ok(ResearchSearchResponse {
            keywords_used: keywords,
            period,
            result_count: results.len(),
            results,
            delivery,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use newsrelay_core::{kst, FixedClock, RssLocale};
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            kst().with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap(),
        ))
    }

    fn service_without_providers() -> SearchService {
        SearchService::with_clients(
            None,
            GoogleNewsRssClient::new(RssLocale::default()),
            None,
            SlackNotifier::new(None),
            test_clock(),
        )
    }

    fn news_request(keyword: &str, provider: NewsProvider) -> NewsSearchRequest {
        NewsSearchRequest {
            keyword: keyword.to_string(),
            start_date: None,
            end_date: None,
            sort_by: SortBy::Relevance,
            use_relevance_filter: true,
            provider,
        }
    }

    fn feed_item(title: &str) -> String {
        format!(
            "<item><title>{title}</title><link>https://news.example.com/{title}</link>\
             <pubDate>Tue, 10 Jun 2025 08:00:00 +0900</pubDate></item>"
        )
    }

    #[tokio::test]
    async fn test_empty_keyword_is_invalid_input() {
        let service = service_without_providers();
        let err = service
            .search_news(&news_request("  ", NewsProvider::Rss))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
        assert!(err.to_string().contains("missing keyword"));
    }

    #[tokio::test]
    async fn test_naver_without_credentials_is_config_error() {
        let service = service_without_providers();
        let err = service
            .search_news(&news_request("AI", NewsProvider::Naver))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[tokio::test]
    async fn test_research_without_credentials_is_config_error() {
        let service = service_without_providers();
        let request = ResearchSearchRequest {
            keyword: "AI".to_string(),
            language: None,
            max_results: None,
            start_date: None,
            end_date: None,
            date_restrict: None,
        };
        let err = service.search_research(&request).await.unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[tokio::test]
    async fn test_bad_date_fails_before_any_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let service = SearchService::with_clients(
            None,
            GoogleNewsRssClient::with_base_url(RssLocale::default(), server.uri()),
            None,
            SlackNotifier::new(None),
            test_clock(),
        );
        let mut request = news_request("AI", NewsProvider::Rss);
        request.start_date = Some("06/01/2025".to_string());
        let err = service.search_news(&request).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_rss_pipeline_merges_and_tags_keywords() {
        let server = MockServer::start().await;
        for (term, items) in [
            ("AI", vec!["a1"]),
            ("5G", vec!["b1", "b2"]),
        ] {
            let body = format!(
                "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel>\
                 <title>feed</title><link>x</link><description>d</description>{}\
                 </channel></rss>",
                items.iter().map(|t| feed_item(t)).collect::<String>()
            );
            Mock::given(method("GET"))
                .and(query_param("q", term))
                .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/rss+xml"))
                .expect(1)
                .mount(&server)
                .await;
        }

        let service = SearchService::with_clients(
            None,
            GoogleNewsRssClient::with_base_url(RssLocale::default(), server.uri()),
            None,
            SlackNotifier::new(None),
            test_clock(),
        );
        let response = service
            .search_news(&news_request("AI, 5G", NewsProvider::Rss))
            .await
            .unwrap();

        assert_eq!(response.keywords_used, vec!["AI", "5G"]);
        assert_eq!(response.period, "2025-06-03 ~ 2025-06-10");
        assert_eq!(response.news_count, 3);
        let got: Vec<(&str, &str)> = response
            .news
            .iter()
            .map(|a| (a.title.as_str(), a.source_keyword.as_deref().unwrap()))
            .collect();
        assert_eq!(got, vec![("a1", "AI"), ("b1", "5G"), ("b2", "5G")]);
        // No webhook configured: delivery reported, request still succeeds
        assert!(!response.delivery.attempted);
        assert!(!response.delivery.sent);
    }

    #[tokio::test]
    async fn test_research_max_results_out_of_range() {
        let server = MockServer::start().await;
        let service = SearchService::with_clients(
            None,
            GoogleNewsRssClient::new(RssLocale::default()),
            Some(GoogleSearchClient::with_endpoint(
                newsrelay_core::GoogleSearchCredentials {
                    api_key: "k".to_string(),
                    engine_id: "e".to_string(),
                },
                server.uri(),
            )),
            SlackNotifier::new(None),
            test_clock(),
        );
        let request = ResearchSearchRequest {
            keyword: "AI".to_string(),
            language: None,
            max_results: Some(31),
            start_date: None,
            end_date: None,
            date_restrict: None,
        };
        let err = service.search_research(&request).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
    }
}
