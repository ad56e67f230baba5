//! News provider clients for keyword search
//!
//! This crate provides clients for fetching news from:
//! - Naver news search API: keyed search with optional relevance ranking
//! - Google News RSS: unauthenticated per-keyword feed search
//!
//! plus the Slack webhook delivery used to relay aggregated results.

pub mod google_rss;
pub mod naver;
pub mod rank;
pub mod sanitize;
pub mod slack;

pub use google_rss::GoogleNewsRssClient;
pub use naver::NaverNewsClient;
pub use rank::RankedCandidate;
pub use slack::{MessageLine, SlackNotifier};
