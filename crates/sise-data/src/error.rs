//! 데이터 계층 에러 타입.

use thiserror::Error;

/// 종목 코드 해석 에러.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 상장법인 목록 수집 실패 (네트워크/파싱)
    #[error("상장사 명단을 불러오는 데 실패했습니다: {0}")]
    DirectoryFetch(String),

    /// 회사명이 목록에 없음
    #[error("'{input}'을 찾을 수 없습니다. 종목코드 6자리를 직접 입력해보세요.")]
    NotFound {
        /// 사용자가 입력한 원본 문자열
        input: String,
    },
}

/// 스프레드시트 내보내기 에러.
#[derive(Debug, Error)]
pub enum ExportError {
    /// 워크북 생성/저장 실패
    #[error("엑셀 파일 생성 실패: {0}")]
    Workbook(String),

    /// 숫자 변환 실패
    #[error("가격 값 변환 실패: {0}")]
    Value(String),
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Workbook(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mentions_input() {
        let err = ResolveError::NotFound {
            input: "Unknown Co".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Unknown Co"));
        assert!(msg.contains("종목코드 6자리"));
    }
}
