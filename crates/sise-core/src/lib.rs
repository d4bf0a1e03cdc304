//! 주가 조회/예측 서비스의 핵심 타입과 공용 인프라.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 도메인 타입 (티커 코드, 일봉 시세, 예측 시계열)
//! - 시세 Provider trait 및 에러 타입
//! - 애플리케이션 설정
//! - tracing 기반 로깅 초기화
//! - 영업일(월~금) 달력 유틸리티

pub mod calendar;
pub mod config;
pub mod logging;
pub mod provider;
pub mod types;

// 자주 사용되는 타입 재내보내기
pub use config::{AppConfig, DataConfig, ForecastConfig, ServerConfig};
pub use provider::{DailyPriceProvider, FetchError};
pub use types::{DailyPrice, ForecastPoint, ForecastSeries, PriceSeries, TickerCode};
