//! Aggregation service layer for newsrelay
//!
//! Orchestrates keyword parsing, date-window resolution, per-keyword
//! provider fan-out, relevance selection, and Slack delivery into the two
//! request pipelines (news search and web research).

pub mod aggregator;
pub mod search_service;

pub use aggregator::{aggregate_terms, MAX_TOTAL_RESULTS};
pub use search_service::{
    NewsProvider, NewsSearchRequest, NewsSearchResponse, ResearchSearchRequest,
    ResearchSearchResponse, SearchService,
};
