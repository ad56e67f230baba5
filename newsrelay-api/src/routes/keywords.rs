//! Keyword extraction endpoint

use axum::{response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};

use newsrelay_core::extract_keywords;

use crate::AppState;

const TOP_KEYWORDS: usize = 5;

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct ExtractResponse {
    keywords: Vec<String>,
    count: usize,
}

/// POST /extract-keywords - top words by frequency from free text
async fn extract(Json(request): Json<ExtractRequest>) -> Json<ExtractResponse> {
    let keywords = extract_keywords(&request.text, TOP_KEYWORDS);
    Json(ExtractResponse {
        count: keywords.len(),
        keywords,
    })
}

/// Create keyword routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/extract-keywords", post(extract))
}
