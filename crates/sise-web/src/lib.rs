//! 주가 조회/예측 웹 서버.
//!
//! Axum 기반의 작은 대화형 페이지를 제공합니다:
//! - 회사명/종목코드 + 날짜 구간 조회 (최근 10행 표, 캔들 차트)
//! - xlsx 내보내기와 단독 인터랙티브 차트 HTML 다운로드
//! - 14영업일 종가 예측 차트 (최근 관측 종가 위에 점선 오버레이)
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: 페이지와 API 엔드포인트
//! - [`error`]: 통합 API 에러 응답
//! - [`page`]: HTML 렌더링

pub mod error;
pub mod page;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::router;
pub use state::AppState;
