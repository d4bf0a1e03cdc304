//! 설정 관리.
//!
//! 설정은 기동 시 환경 변수에서 한 번 로드되어 명시적으로 전달됩니다.
//! import 시점에 전역 상태를 읽는 패턴을 쓰지 않습니다.

use serde::{Deserialize, Serialize};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 페이지 헤더에 표시할 제작자 이름 (`MY_NAME`)
    pub display_name: String,
    /// 데이터 소스 설정
    pub data: DataConfig,
    /// 예측 설정
    pub forecast: ForecastConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// KIND 상장법인 목록 베이스 URL
    pub kind_base_url: String,
    /// 네이버 금융 시세 베이스 URL
    pub naver_base_url: String,
    /// HTTP 요청 타임아웃 (초)
    pub http_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            kind_base_url: "http://kind.krx.co.kr".to_string(),
            naver_base_url: "https://api.finance.naver.com".to_string(),
            http_timeout_secs: 30,
        }
    }
}

/// 예측 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastConfig {
    /// 재조회할 과거 구간 (달력일 기준)
    pub lookback_days: i64,
    /// 학습에 사용할 최근 구간 (달력일 기준)
    pub train_days: i64,
    /// 예측 horizon (영업일 수)
    pub horizon: usize,
    /// 예측 차트에 함께 표시할 최근 관측 종가 수
    pub context_rows: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            lookback_days: 800,
            train_days: 700,
            horizon: 14,
            context_rows: 22,
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 설정을 로드합니다.
    ///
    /// # 환경변수
    /// - `MY_NAME`: 페이지 헤더에 표시할 이름
    /// - `SISE_HOST`, `SISE_PORT`: 서버 바인딩
    /// - `SISE_KIND_BASE_URL`, `SISE_NAVER_BASE_URL`: 데이터 소스 (테스트용)
    /// - `SISE_HTTP_TIMEOUT_SECS`: HTTP 타임아웃
    /// - `SISE_FORECAST_HORIZON`: 예측 horizon
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                host: env_or("SISE_HOST", defaults.server.host),
                port: env_parse_or("SISE_PORT", defaults.server.port),
            },
            display_name: env_or("MY_NAME", "이름 없음".to_string()),
            data: DataConfig {
                kind_base_url: env_or("SISE_KIND_BASE_URL", defaults.data.kind_base_url),
                naver_base_url: env_or("SISE_NAVER_BASE_URL", defaults.data.naver_base_url),
                http_timeout_secs: env_parse_or(
                    "SISE_HTTP_TIMEOUT_SECS",
                    defaults.data.http_timeout_secs,
                ),
            },
            forecast: ForecastConfig {
                lookback_days: env_parse_or("SISE_FORECAST_LOOKBACK_DAYS", 800),
                train_days: env_parse_or("SISE_FORECAST_TRAIN_DAYS", 700),
                horizon: env_parse_or("SISE_FORECAST_HORIZON", 14),
                context_rows: env_parse_or("SISE_FORECAST_CONTEXT_ROWS", 22),
            },
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
