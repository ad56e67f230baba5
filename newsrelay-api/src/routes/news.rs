//! News endpoints: sample headlines and the aggregated search pipeline

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use newsrelay_services::NewsSearchRequest;

use crate::routes::error_response;
use crate::AppState;

/// Canned headlines per category for the demo endpoint
static SAMPLE_HEADLINES: &[(&str, [&str; 3])] = &[
    (
        "정치",
        [
            "정치인 비리 폭로, 충격적인 진실 공개",
            "정치권 대규모 부패 스캔들 발생",
            "정치 개혁을 위한 새로운 법안 통과",
        ],
    ),
    (
        "경제",
        [
            "경제 위기로 인한 대규모 실업 발생",
            "경제 성장률 역대 최고치 기록",
            "경제 정책 변경으로 인한 시장 혼란",
        ],
    ),
    (
        "기술",
        [
            "기술 혁신으로 인한 일자리 대량 감소",
            "기술 기업의 독점 심화 우려",
            "기술 발전이 가져올 미래의 변화",
        ],
    ),
    (
        "건강",
        [
            "건강 관리의 새로운 방법 발견",
            "건강 식품의 효과 입증",
            "건강 검진 결과 충격적인 발견",
        ],
    ),
    (
        "환경",
        [
            "환경 오염으로 인한 생태계 파괴",
            "환경 보호를 위한 새로운 정책 발표",
            "환경 문제 해결을 위한 긴급 조치",
        ],
    ),
];

#[derive(Debug, Deserialize)]
struct SampleQuery {
    keyword: String,
}

#[derive(Debug, Serialize)]
struct SampleItem {
    title: String,
    keyword: String,
}

#[derive(Debug, Serialize)]
struct SampleResponse {
    keyword: String,
    news: Vec<SampleItem>,
}

/// GET /news - canned headlines for a keyword (demo data, no upstream call)
async fn sample_news(Query(params): Query<SampleQuery>) -> Json<SampleResponse> {
    let keyword = params.keyword;
    let titles: Vec<String> = match SAMPLE_HEADLINES
        .iter()
        .find(|(category, _)| *category == keyword)
    {
        Some((_, titles)) => titles.iter().map(|t| t.to_string()).collect(),
        None => vec![
            format!("{keyword} 관련 충격적인 소식 전해져"),
            format!("{keyword}로 인한 파장 계속 확산"),
            format!("{keyword}에 대한 새로운 사실 밝혀져"),
        ],
    };

    let news = titles
        .into_iter()
        .map(|title| SampleItem {
            title,
            keyword: keyword.clone(),
        })
        .collect();

    Json(SampleResponse { keyword, news })
}

/// POST /news/search - aggregated keyword news search with Slack relay
async fn search_news(
    State(state): State<AppState>,
    Json(request): Json<NewsSearchRequest>,
) -> impl IntoResponse {
    info!("News search request: keyword='{}'", request.keyword);

    match state.search_service.search_news(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(sample_news))
        .route("/news/search", post(search_news))
}
