//! 종목 코드 타입.

use serde::{Deserialize, Serialize};

/// KRX 6자리 종목 코드.
///
/// 항상 0으로 패딩된 숫자 6자리를 보장합니다 (예: "005930").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerCode(String);

impl TickerCode {
    /// 입력이 정확히 숫자 6자리인 경우에만 티커 코드로 인정합니다.
    pub fn parse(input: &str) -> Option<Self> {
        if Self::is_valid(input) {
            Some(Self(input.to_string()))
        } else {
            None
        }
    }

    /// 숫자 문자열을 6자리로 0 패딩하여 생성합니다.
    ///
    /// KIND 상장법인 목록의 종목코드 컬럼은 앞자리 0이 잘린 채
    /// 내려오는 경우가 있어 패딩이 필요합니다.
    pub fn from_numeric(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 6 || !trimmed.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        Some(Self(format!("{:0>6}", trimmed)))
    }

    /// 정확히 숫자 6자리인지 검사합니다.
    pub fn is_valid(input: &str) -> bool {
        input.len() == 6 && input.chars().all(|c| c.is_ascii_digit())
    }

    /// 코드 문자열 반환.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TickerCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
