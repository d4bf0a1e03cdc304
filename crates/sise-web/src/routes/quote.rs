//! 시세 조회 엔드포인트.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use sise_core::types::{DailyPrice, PriceSeries, TickerCode};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// 조회 페이지가 최근 표에 보여주는 행 수.
pub(crate) const RECENT_ROWS: usize = 10;

/// 시세 조회 쿼리 파라미터.
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    /// 회사명 또는 6자리 종목코드
    #[serde(default)]
    pub q: String,
    /// 조회 시작일 (생략 시 오늘)
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub start: Option<NaiveDate>,
    /// 조회 종료일 (생략 시 오늘)
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub end: Option<NaiveDate>,
}

/// HTML date input은 비어 있으면 `start=` 같은 빈 문자열을 보냅니다.
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// 검증을 통과한 조회 요청.
pub(crate) struct QuoteRequest {
    pub q: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl QuoteQuery {
    /// 입력을 검증하고 기본값을 채웁니다.
    ///
    /// 회사명은 가공하지 않고 그대로 씁니다. 공백 정리나 대소문자
    /// 정규화를 하면 목록의 정확 일치 의미가 달라집니다.
    pub(crate) fn validate(self) -> Result<QuoteRequest, ApiError> {
        if self.q.is_empty() {
            return Err(ApiError::invalid_input(
                "회사명 또는 종목코드를 입력하세요.",
            ));
        }

        let today = Local::now().date_naive();
        let start = self.start.unwrap_or(today);
        let end = self.end.unwrap_or(today);
        if start > end {
            return Err(ApiError::invalid_input(
                "시작일이 종료일보다 늦을 수 없습니다.",
            ));
        }

        Ok(QuoteRequest {
            q: self.q,
            start,
            end,
        })
    }
}

/// 입력을 해석하고 해당 구간의 일봉을 수집합니다.
pub(crate) async fn resolve_and_fetch(
    state: &AppState,
    request: &QuoteRequest,
) -> ApiResult<(TickerCode, PriceSeries)> {
    let ticker = state.resolver.resolve(&request.q).await?;
    let series = state
        .provider
        .fetch_daily(&ticker, request.start, request.end)
        .await?;
    Ok((ticker, series))
}

/// 시세 조회 응답.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// 조회한 원본 입력
    pub query: String,
    /// 해석된 종목코드
    pub ticker: String,
    /// 구간에 거래일이 없었는지 여부
    pub empty: bool,
    /// 구간 전체 일봉 (날짜 오름차순)
    pub rows: Vec<DailyPrice>,
    /// 표에 보여줄 최근 행
    pub recent: Vec<DailyPrice>,
}

/// GET /api/quote
pub async fn quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<Json<QuoteResponse>> {
    let request = query.validate()?;
    let (ticker, series) = resolve_and_fetch(&state, &request).await?;

    tracing::info!(
        query = %request.q,
        ticker = %ticker,
        rows = series.len(),
        "시세 조회 완료"
    );

    // 빈 구간은 에러가 아니라 정보성 결과입니다.
    let recent = series.tail(RECENT_ROWS).to_vec();
    Ok(Json(QuoteResponse {
        query: request.q,
        ticker: ticker.to_string(),
        empty: series.is_empty(),
        rows: series.rows().to_vec(),
        recent,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_query() {
        let query = QuoteQuery {
            q: String::new(),
            start: None,
            end: None,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let query = QuoteQuery {
            q: "삼성전자".to_string(),
            start: Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            end: Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_validate_defaults_to_today() {
        let query = QuoteQuery {
            q: "005930".to_string(),
            start: None,
            end: None,
        };
        let request = query.validate().unwrap();
        let today = Local::now().date_naive();
        assert_eq!(request.start, today);
        assert_eq!(request.end, today);
    }

    #[test]
    fn test_empty_date_string_deserializes_to_none() {
        let query: QuoteQuery =
            serde_urlencoded::from_str("q=005930&start=&end=2024-03-05").unwrap();
        assert!(query.start.is_none());
        assert_eq!(query.end, NaiveDate::from_ymd_opt(2024, 3, 5));
    }
}
