//! Web research endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::info;

use newsrelay_services::ResearchSearchRequest;

use crate::routes::error_response;
use crate::AppState;

/// POST /research/search - aggregated web search with Slack relay
async fn search_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchSearchRequest>,
) -> impl IntoResponse {
    info!("Research search request: keyword='{}'", request.keyword);

    match state.search_service.search_research(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// Create research routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/research/search", post(search_research))
}
