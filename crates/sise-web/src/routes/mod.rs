//! 페이지와 API 엔드포인트.

pub mod export;
pub mod forecast;
pub mod quote;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::page;
use crate::state::AppState;

/// 전체 라우터를 구성합니다.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/quote", get(quote::quote))
        .route("/api/forecast", get(forecast::forecast))
        .route("/api/export.xlsx", get(export::export_xlsx))
        .route("/api/chart.html", get(export::chart_html))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(120)))
        .with_state(state)
}

/// 대화형 조회 페이지.
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render_index(&state.config.display_name))
}

/// 헬스 체크.
async fn health() -> &'static str {
    "OK"
}
