//! 자동 ARIMA 기반 단기 종가 예측.
//!
//! 예측 파이프라인은 한 번의 선형 패스입니다:
//!
//! ```text
//! 시세 재조회 (≈800일)
//!        │
//!        ▼
//! 학습 구간 절단 (최근 ≈700일)
//!        │
//!        ▼
//! 차분 차수 선택 (KPSS) ──► stepwise (p,q) 탐색 (AIC)
//!        │
//!        ▼
//! Hannan–Rissanen 적합 ──► horizon 스텝 점 예측
//!        │
//!        ▼
//! 영업일 매핑 + 원 단위 버림
//! ```
//!
//! 탐색 범위는 `p ≤ 5`, `q ≤ 5`, `d ≤ 2`이며 비계절 모형만
//! 다룹니다. 적합에 실패한 후보는 탐색을 중단시키지 않고 조용히
//! 버려집니다.

pub mod arima;
pub mod error;
pub mod forecaster;
pub mod search;
pub mod stationarity;

pub use arima::{ArimaFit, ModelOrder};
pub use error::ForecastError;
pub use forecaster::Forecaster;
pub use search::stepwise_search;
pub use stationarity::{choose_differencing, kpss_level};
