//! 예측 모듈 에러 타입.
//!
//! 예측 단계의 모든 실패는 하나의 에러 계열로 수렴합니다.
//! 이 에러는 이미 렌더링된 시세 표시/내보내기 경로에 영향을
//! 주지 않습니다.

use sise_core::provider::FetchError;
use thiserror::Error;

/// 예측 단계에서 발생할 수 있는 에러.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// 학습용 시세 재조회 실패
    #[error("시세 재조회 실패: {0}")]
    Refetch(#[from] FetchError),

    /// 학습에 필요한 관측치 부족
    #[error("예측에 필요한 데이터 부족: {required}개 필요, {actual}개 수집")]
    InsufficientData {
        /// 필요한 최소 관측치 수
        required: usize,
        /// 실제 수집된 관측치 수
        actual: usize,
    },

    /// 모든 후보 차수가 적합에 실패
    #[error("적합 가능한 ARIMA 모형을 찾지 못했습니다")]
    NoViableModel,

    /// 모형 적합/예측 계산 실패
    #[error("모형 적합 실패: {0}")]
    Fit(String),
}
