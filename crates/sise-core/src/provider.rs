//! 일봉 시세 Provider trait.
//!
//! 표시/내보내기 경로와 예측기가 같은 trait을 통해 시세를 가져옵니다.
//! 예측기는 자체적으로 긴 구간을 다시 조회하므로 구체 구현이 아닌
//! trait에 의존합니다 (테스트에서도 mock으로 대체).

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{PriceSeries, TickerCode};

/// 시세 조회 에러.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 요청 실패
    #[error("시세 요청 실패: {0}")]
    Http(String),

    /// 응답 본문 파싱 실패
    #[error("시세 응답 파싱 실패: {0}")]
    Parse(String),
}

/// 일봉 OHLC 시세 Provider.
#[async_trait]
pub trait DailyPriceProvider: Send + Sync {
    /// `start`~`end` (양끝 포함)의 일봉 시세를 날짜 오름차순으로 조회합니다.
    ///
    /// 해당 기간에 거래 데이터가 없으면 빈 시계열을 반환합니다.
    /// 빈 결과는 에러가 아닙니다.
    async fn fetch_daily(
        &self,
        ticker: &TickerCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError>;
}
