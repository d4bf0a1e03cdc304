//! 종가 예측 엔드포인트.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sise_core::types::ForecastPoint;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// 오버레이용 최근 관측 종가를 확보하기 위한 재조회 구간 (달력일).
/// 주말/휴장일을 감안해 표시 행 수보다 넉넉히 잡습니다.
const CONTEXT_LOOKBACK_DAYS: u64 = 60;

/// 예측 쿼리 파라미터.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// 회사명 또는 6자리 종목코드
    #[serde(default)]
    pub q: String,
}

/// 차트 오버레이용 관측 종가.
#[derive(Debug, Serialize)]
pub struct ObservedPoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// 예측 응답.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    /// 해석된 종목코드
    pub ticker: String,
    /// 최근 관측 종가 (오래된 것부터)
    pub observed: Vec<ObservedPoint>,
    /// 예측 종가 (영업일, 정수 원화)
    pub forecast: Vec<ForecastPoint>,
}

/// GET /api/forecast
///
/// 예측 실패는 이 엔드포인트의 에러로만 나타나고, 시세 조회
/// 경로에는 영향을 주지 않습니다.
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ForecastQuery>,
) -> ApiResult<Json<ForecastResponse>> {
    if query.q.is_empty() {
        return Err(ApiError::invalid_input(
            "회사명 또는 종목코드를 입력하세요.",
        ));
    }

    let ticker = state.resolver.resolve(&query.q).await?;
    let result = state.forecaster.forecast(&ticker).await?;

    // 점선 예측선 앞에 깔아줄 최근 관측 구간
    let today = Local::now().date_naive();
    let start = today - Days::new(CONTEXT_LOOKBACK_DAYS);
    let context = state.provider.fetch_daily(&ticker, start, today).await?;
    let observed = context
        .tail(state.config.forecast.context_rows)
        .iter()
        .map(|r| ObservedPoint {
            date: r.date,
            close: r.close,
        })
        .collect();

    tracing::info!(ticker = %ticker, points = result.len(), "예측 완료");

    Ok(Json(ForecastResponse {
        ticker: ticker.to_string(),
        observed,
        forecast: result.points().to_vec(),
    }))
}
