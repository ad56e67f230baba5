//! Process-wide configuration
//!
//! Read once at startup from the environment into an immutable struct that
//! is passed explicitly into each component's constructor. Nothing in the
//! pipeline reads ambient environment state at call time.

use std::env;

use tracing::warn;

/// Credentials for the Naver news search API
#[derive(Debug, Clone)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Credentials for the Google Custom Search JSON API
#[derive(Debug, Clone)]
pub struct GoogleSearchCredentials {
    pub api_key: String,
    pub engine_id: String,
}

/// Locale triple for the Google News RSS feed
#[derive(Debug, Clone)]
pub struct RssLocale {
    /// Interface language (`hl`)
    pub language: String,
    /// Geographic region (`gl`)
    pub region: String,
    /// Combined edition identifier (`ceid`)
    pub edition: String,
}

impl Default for RssLocale {
    fn default() -> Self {
        Self {
            language: "ko".to_string(),
            region: "KR".to_string(),
            edition: "KR:ko".to_string(),
        }
    }
}

/// Immutable process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Naver credentials; `None` disables the commercial news provider
    pub naver: Option<NaverCredentials>,
    /// Google search credentials; `None` disables the research provider
    pub google_search: Option<GoogleSearchCredentials>,
    /// Slack incoming webhook URL; `None` disables notifications
    pub slack_webhook_url: Option<String>,
    pub rss_locale: RssLocale,
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Expects:
    /// - `NAVER_CLIENT_ID` / `NAVER_CLIENT_SECRET`: Naver API credentials
    /// - `GOOGLE_API_KEY` / `GOOGLE_SEARCH_ENGINE_ID`: Custom Search credentials
    /// - `SLACK_WEBHOOK_URL`: notification webhook
    /// - `RSS_LANGUAGE` / `RSS_REGION` / `RSS_EDITION`: feed locale overrides
    /// - `SERVER_PORT`: HTTP listen port
    ///
    /// Credential pairs are only honored when both halves are present; a
    /// half-configured pair is treated as absent.
    pub fn from_env() -> Self {
        let naver = match (env::var("NAVER_CLIENT_ID"), env::var("NAVER_CLIENT_SECRET")) {
            (Ok(client_id), Ok(client_secret)) => Some(NaverCredentials {
                client_id,
                client_secret,
            }),
            (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
                warn!("Only one of NAVER_CLIENT_ID/NAVER_CLIENT_SECRET is set, Naver search disabled");
                None
            }
            _ => None,
        };

        let google_search = match (
            env::var("GOOGLE_API_KEY"),
            env::var("GOOGLE_SEARCH_ENGINE_ID"),
        ) {
            (Ok(api_key), Ok(engine_id)) => Some(GoogleSearchCredentials { api_key, engine_id }),
            (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
                warn!(
                    "Only one of GOOGLE_API_KEY/GOOGLE_SEARCH_ENGINE_ID is set, research search disabled"
                );
                None
            }
            _ => None,
        };

        let defaults = RssLocale::default();
        let rss_locale = RssLocale {
            language: env::var("RSS_LANGUAGE").unwrap_or(defaults.language),
            region: env::var("RSS_REGION").unwrap_or(defaults.region),
            edition: env::var("RSS_EDITION").unwrap_or(defaults.edition),
        };

        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Self {
            naver,
            google_search,
            slack_webhook_url: env::var("SLACK_WEBHOOK_URL").ok(),
            rss_locale,
            server_port,
        }
    }
}
