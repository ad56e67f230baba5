//! Web research client for the newsrelay aggregator
//!
//! Wraps the Google Custom Search JSON API: keyed, truly paginated, with
//! either an explicit date range or a coarse relative restriction.

pub mod google_search;

pub use google_search::{DateRestrict, GoogleSearchClient};
