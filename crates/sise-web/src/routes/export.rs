//! 다운로드 엔드포인트 (xlsx, 단독 차트 HTML).
//!
//! 다운로드는 페이지 상태를 공유하지 않고 같은 파라미터로
//! 해석/수집을 다시 수행합니다.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use sise_data::export::write_price_series_xlsx;

use crate::error::{ApiError, ApiResult};
use crate::page;
use crate::routes::quote::{resolve_and_fetch, QuoteQuery};
use crate::state::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/export.xlsx
pub async fn export_xlsx(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<impl IntoResponse> {
    let request = query.validate()?;
    let (ticker, series) = resolve_and_fetch(&state, &request).await?;
    if series.is_empty() {
        return Err(ApiError::empty_result());
    }

    let bytes = write_price_series_xlsx(&series)?;

    tracing::info!(ticker = %ticker, rows = series.len(), "xlsx 내보내기");

    // 첨부 파일명은 헤더 값 제약 때문에 ASCII로 유지합니다.
    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}_price.xlsx\"", ticker),
        ),
    ];
    Ok((headers, bytes))
}

/// GET /api/chart.html
///
/// 브라우저에서 바로 열리는 단독 인터랙티브 캔들 차트를 내려줍니다.
pub async fn chart_html(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<impl IntoResponse> {
    let request = query.validate()?;
    let (ticker, series) = resolve_and_fetch(&state, &request).await?;
    if series.is_empty() {
        return Err(ApiError::empty_result());
    }

    let html = page::standalone_chart_html(&request.q, ticker.as_str(), &series);

    let headers = [
        (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}_chart.html\"", ticker),
        ),
    ];
    Ok((headers, html))
}
