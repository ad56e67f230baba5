//! Normalized result records shared across providers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A news article normalized from any upstream provider
///
/// Titles are HTML-stripped and `published_date` is always the civil date in
/// the service's fixed +09:00 zone, regardless of the upstream timezone.
/// Constructed once per upstream record and immutable afterwards, apart from
/// the keyword tag attached during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published_date: NaiveDate,
    /// The search term that produced this article
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_keyword: Option<String>,
}

/// A web-search result from the research provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// The search term that produced this item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_keyword: Option<String>,
}

/// Outcome of a notification delivery attempt
///
/// Delivery failure never fails the overall request; callers receive this
/// record instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub attempted: bool,
    pub sent: bool,
    pub message: String,
}

impl Delivery {
    /// Delivery skipped because no webhook is configured
    pub fn not_configured() -> Self {
        Self {
            attempted: false,
            sent: false,
            message: "Slack webhook not configured, notification skipped".to_string(),
        }
    }

    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            attempted: true,
            sent: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            attempted: true,
            sent: false,
            message: message.into(),
        }
    }
}

/// Result records that can be tagged with the keyword that produced them
pub trait KeywordTagged {
    fn tag_keyword(&mut self, term: &str);
}

impl KeywordTagged for Article {
    fn tag_keyword(&mut self, term: &str) {
        self.source_keyword = Some(term.to_string());
    }
}

impl KeywordTagged for ResearchItem {
    fn tag_keyword(&mut self, term: &str) {
        self.matched_keyword = Some(term.to_string());
    }
}

/// Result ordering requested from the commercial news provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Relevance,
    Latest,
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Relevance
    }
}
