//! 네이버 금융 일봉 시세 Provider.
//!
//! 일봉 캔들 엔드포인트(`/siseJson.naver`)에서 티커와 닫힌 날짜
//! 구간(양끝 포함, `YYYYMMDD`)으로 OHLC 시세를 조회합니다.
//!
//! 응답은 작은따옴표가 섞인 유사 JSON 배열-의-배열이라 정규화 후
//! 파싱합니다. 조회 결과가 비어 있으면 빈 시계열을 반환하며
//! 이는 에러가 아닙니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sise_core::provider::{DailyPriceProvider, FetchError};
use sise_core::types::{DailyPrice, PriceSeries, TickerCode};
use tracing::debug;

const SISE_PATH: &str = "/siseJson.naver";

/// 네이버 금융 일봉 Provider.
#[derive(Debug, Clone)]
pub struct NaverDailyProvider {
    client: reqwest::Client,
    base_url: String,
}

impl NaverDailyProvider {
    /// 베이스 URL과 타임아웃으로 Provider를 생성합니다.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl DailyPriceProvider for NaverDailyProvider {
    async fn fetch_daily(
        &self,
        ticker: &TickerCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        let url = format!("{}{}", self.base_url, SISE_PATH);
        let start_param = start.format("%Y%m%d").to_string();
        let end_param = end.format("%Y%m%d").to_string();

        debug!(ticker = %ticker, start = %start_param, end = %end_param, "일봉 시세 조회");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", ticker.as_str()),
                ("requestType", "1"),
                ("startTime", &start_param),
                ("endTime", &end_param),
                ("timeframe", "day"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Http(format!("HTTP {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        parse_sise_json(&body)
    }
}

/// 일봉 캔들 응답 본문을 파싱합니다.
///
/// 본문은 `[['날짜', '시가', ...], ["20240102", 78000, ...], ...]`
/// 형태입니다. 헤더 행과 형식이 맞지 않는 행은 건너뜁니다.
pub fn parse_sise_json(body: &str) -> Result<PriceSeries, FetchError> {
    // 작은따옴표 정규화 후 JSON으로 파싱
    let normalized = body.trim().replace('\'', "\"");
    if normalized.is_empty() {
        return Ok(PriceSeries::empty());
    }

    let raw: Vec<Vec<serde_json::Value>> = serde_json::from_str(&normalized)
        .map_err(|e| FetchError::Parse(format!("유사 JSON 파싱 실패: {}", e)))?;

    let mut rows = Vec::new();
    for entry in raw {
        let date = match entry.first().and_then(|v| v.as_str()) {
            Some(s) if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) => {
                NaiveDate::parse_from_str(s, "%Y%m%d")
                    .map_err(|e| FetchError::Parse(format!("날짜 파싱 실패 '{}': {}", s, e)))?
            }
            // 헤더 행 또는 빈 꼬리 행
            _ => continue,
        };

        let mut ohlc = [Decimal::ZERO; 4];
        let mut valid = true;
        for (i, slot) in ohlc.iter_mut().enumerate() {
            match entry.get(i + 1).and_then(|v| v.as_f64()) {
                Some(f) => {
                    *slot = Decimal::try_from(f)
                        .map_err(|e| FetchError::Parse(format!("가격 변환 실패: {}", e)))?;
                }
                None => {
                    valid = false;
                    break;
                }
            }
        }
        if !valid {
            continue;
        }

        rows.push(DailyPrice {
            date,
            open: ohlc[0],
            high: ohlc[1],
            low: ohlc[2],
            close: ohlc[3],
        });
    }

    Ok(PriceSeries::from_rows(rows))
}
