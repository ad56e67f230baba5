//! Core types for the newsrelay keyword news aggregator
//!
//! This crate defines the shared data structures used across the service,
//! including normalized article records, the error taxonomy, process-wide
//! configuration, and the fixed-offset clock that anchors all date handling.

pub mod article;
pub mod clock;
pub mod config;
pub mod error;
pub mod keyword;
pub mod redact;
pub mod window;

pub use article::{Article, Delivery, KeywordTagged, ResearchItem, SortBy};
pub use clock::{kst, Clock, FixedClock, SystemClock};
pub use config::{AppConfig, GoogleSearchCredentials, NaverCredentials, RssLocale};
pub use error::{RelayError, RelayResult};
pub use keyword::{extract_keywords, parse_keywords};
pub use redact::redact;
pub use window::DateWindow;
