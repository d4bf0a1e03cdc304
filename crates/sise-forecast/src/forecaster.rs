//! 예측 파이프라인 오케스트레이션.
//!
//! 표시용 조회와는 독립적으로 긴 구간을 다시 조회해 학습합니다.
//! (표시 구간이 짧아도 차수 탐색에 충분한 이력을 확보하기 위함.)
//! 호출마다 모든 것을 처음부터 다시 계산하며 중간 상태를 저장하지
//! 않습니다.

use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use sise_core::calendar::business_days_after;
use sise_core::config::ForecastConfig;
use sise_core::provider::DailyPriceProvider;
use sise_core::types::{ForecastPoint, ForecastSeries, TickerCode};
use tracing::info;

use crate::error::ForecastError;
use crate::search::{stepwise_search, MAX_P, MAX_Q};
use crate::stationarity::choose_differencing;

/// 학습에 필요한 최소 관측치 수.
const MIN_OBSERVATIONS: usize = 30;

/// 차분 차수 상한.
const MAX_D: usize = 2;

/// 종가 예측기.
pub struct Forecaster {
    provider: Arc<dyn DailyPriceProvider>,
    config: ForecastConfig,
}

impl Forecaster {
    /// Provider와 설정으로 예측기를 생성합니다.
    pub fn new(provider: Arc<dyn DailyPriceProvider>, config: ForecastConfig) -> Self {
        Self { provider, config }
    }

    /// 설정된 horizon으로 예측합니다.
    pub async fn forecast(&self, ticker: &TickerCode) -> Result<ForecastSeries, ForecastError> {
        self.forecast_with_horizon(ticker, self.config.horizon).await
    }

    /// 지정한 horizon만큼 미래 영업일 종가를 예측합니다.
    ///
    /// 반환되는 시계열은 정확히 `horizon`개이며, 날짜는 마지막
    /// 학습일 이후의 영업일(월~금)로 강한 오름차순입니다.
    pub async fn forecast_with_horizon(
        &self,
        ticker: &TickerCode,
        horizon: usize,
    ) -> Result<ForecastSeries, ForecastError> {
        let today = Local::now().date_naive();
        let (closes, last_date) = self.fetch_training_window(ticker, today).await?;

        let d = choose_differencing(&closes, MAX_D);
        let fit = stepwise_search(&closes, d, MAX_P, MAX_Q)
            .ok_or(ForecastError::NoViableModel)?;

        info!(ticker = %ticker, order = %fit.order(), observations = closes.len(), "예측 모형 적합 완료");

        let values = fit.forecast(horizon);
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::Fit("예측값이 유한하지 않습니다".to_string()));
        }

        let dates = business_days_after(last_date, horizon);
        let points = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| ForecastPoint {
                date,
                // 원화 종가는 소수점 이하 단위가 없어 버림
                close: value.trunc() as i64,
            })
            .collect();

        Ok(ForecastSeries::new(points))
    }

    /// 학습용 종가 시계열 재조회.
    ///
    /// 오늘로부터 `lookback_days`를 거슬러 조회한 뒤 최근
    /// `train_days`만 남깁니다.
    async fn fetch_training_window(
        &self,
        ticker: &TickerCode,
        today: NaiveDate,
    ) -> Result<(Vec<f64>, NaiveDate), ForecastError> {
        let start = today - Days::new(self.config.lookback_days.max(0) as u64);
        let series = self.provider.fetch_daily(ticker, start, today).await?;

        let cutoff = today - Days::new(self.config.train_days.max(0) as u64);
        let train: Vec<_> = series
            .rows()
            .iter()
            .filter(|r| r.date >= cutoff)
            .collect();

        if train.len() < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: train.len(),
            });
        }

        let closes: Vec<f64> = train.iter().filter_map(|r| r.close.to_f64()).collect();
        if closes.len() < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: closes.len(),
            });
        }

        let last_date = train.last().expect("비어 있지 않음").date;
        Ok((closes, last_date))
    }
}
