//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! `Arc`로 래핑되어 요청 간에 공유되지만, 파이프라인 자체는
//! 요청마다 모든 것을 새로 수집하므로 가변 상태는 없습니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sise_core::config::AppConfig;
use sise_core::provider::DailyPriceProvider;
use sise_data::{KindDirectoryClient, NaverDailyProvider, TickerResolver};
use sise_forecast::Forecaster;

/// 애플리케이션 공유 상태.
pub struct AppState {
    /// 기동 시 로드된 설정
    pub config: AppConfig,
    /// 회사명/종목코드 해석기
    pub resolver: TickerResolver,
    /// 일봉 시세 Provider
    pub provider: Arc<dyn DailyPriceProvider>,
    /// 종가 예측기
    pub forecaster: Forecaster,
}

impl AppState {
    /// 설정으로부터 상태를 구성합니다.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.data.http_timeout_secs);

        let directory_client = KindDirectoryClient::new(&config.data.kind_base_url, timeout)
            .context("KIND 클라이언트 생성 실패")?;
        let resolver = TickerResolver::new(directory_client);

        let provider: Arc<dyn DailyPriceProvider> = Arc::new(
            NaverDailyProvider::new(&config.data.naver_base_url, timeout)
                .context("시세 Provider 생성 실패")?,
        );
        let forecaster = Forecaster::new(provider.clone(), config.forecast.clone());

        Ok(Self {
            config,
            resolver,
            provider,
            forecaster,
        })
    }
}
