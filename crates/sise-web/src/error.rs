//! 통합 API 에러 응답 타입.
//!
//! 단계별 에러(목록 수집, 해석, 시세 조회, 내보내기, 예측)를
//! 일관된 `{ code, message }` JSON으로 변환합니다. 단계 에러는
//! 서로 격리됩니다: 예측 실패는 자신의 엔드포인트에서만 보이고
//! 이미 렌더링된 시세 경로를 건드리지 않습니다.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sise_core::provider::FetchError;
use sise_data::error::{ExportError, ResolveError};
use sise_forecast::ForecastError;

/// API 에러 응답 본문.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "NOT_FOUND", "FETCH", "FORECAST")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

/// 상태 코드가 붙은 API 에러.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP 상태 코드
    pub status: StatusCode,
    /// 응답 본문
    pub body: ApiErrorResponse,
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 상태/코드/메시지로 에러를 생성합니다.
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorResponse {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// 잘못된 입력 (400).
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
    }

    /// 해당 기간에 거래 데이터 없음 (정보성).
    pub fn empty_result() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "EMPTY",
            "해당 기간의 주가 데이터가 없습니다.",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match &err {
            ResolveError::DirectoryFetch(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "DIRECTORY_FETCH", err.to_string())
            }
            ResolveError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "FETCH", err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "EXPORT", err.to_string())
    }
}

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "FORECAST", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_mapping() {
        let err: ApiError = ResolveError::NotFound {
            input: "Unknown Co".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.body.code, "NOT_FOUND");
        assert!(err.body.message.contains("Unknown Co"));

        let err: ApiError = ResolveError::DirectoryFetch("timeout".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.body.code, "DIRECTORY_FETCH");
    }

    #[test]
    fn test_forecast_error_mapping() {
        let err: ApiError = ForecastError::NoViableModel.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.code, "FORECAST");
    }

    #[test]
    fn test_empty_result_is_informational() {
        let err = ApiError::empty_result();
        assert_eq!(err.body.code, "EMPTY");
        assert!(err.body.message.contains("주가 데이터가 없습니다"));
    }
}
