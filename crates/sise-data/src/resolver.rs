//! 회사명/종목코드 입력을 6자리 티커로 해석.

use sise_core::types::TickerCode;
use tracing::debug;

use crate::directory::KindDirectoryClient;
use crate::error::ResolveError;

/// 종목 코드 해석기.
///
/// 입력이 이미 숫자 6자리면 네트워크 접근 없이 그대로 반환하고,
/// 그 외에는 상장법인 목록을 새로 수집하여 회사명 정확 일치로
/// 찾습니다. 재시도/캐싱/유사 검색은 하지 않습니다.
#[derive(Debug, Clone)]
pub struct TickerResolver {
    directory_client: KindDirectoryClient,
}

impl TickerResolver {
    /// 디렉토리 클라이언트로 해석기를 생성합니다.
    pub fn new(directory_client: KindDirectoryClient) -> Self {
        Self { directory_client }
    }

    /// 입력을 티커 코드로 해석합니다.
    ///
    /// # Errors
    /// - [`ResolveError::DirectoryFetch`]: 목록 수집 실패
    /// - [`ResolveError::NotFound`]: 회사명이 목록에 없음
    pub async fn resolve(&self, input: &str) -> Result<TickerCode, ResolveError> {
        // 숫자 6자리는 이미 유효한 티커로 간주 (네트워크 접근 없음)
        if let Some(code) = TickerCode::parse(input) {
            debug!(ticker = %code, "입력이 종목코드 형식, 목록 조회 생략");
            return Ok(code);
        }

        let directory = self.directory_client.fetch().await?;

        directory
            .lookup(input)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                input: input.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const LISTING_PATH: &str = "/corpgeneral/corpList.do?method=download&searchType=13";

    const SAMPLE: &str = r#"
        <table>
            <tr><th>회사명</th><th>종목코드</th></tr>
            <tr><td>Acme Corp</td><td>123456</td></tr>
        </table>
    "#;

    fn resolver(base_url: &str) -> TickerResolver {
        TickerResolver::new(
            KindDirectoryClient::new(base_url, Duration::from_secs(5)).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_six_digit_input_skips_directory_fetch() {
        let mut server = mockito::Server::new_async().await;
        // 목록 엔드포인트가 호출되면 테스트 실패
        let mock = server
            .mock("GET", LISTING_PATH)
            .expect(0)
            .create_async()
            .await;

        let code = resolver(&server.url()).resolve("005930").await.unwrap();

        assert_eq!(code.as_str(), "005930");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_known_name_resolves_to_code() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", LISTING_PATH)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(SAMPLE)
            .create_async()
            .await;

        let code = resolver(&server.url()).resolve("Acme Corp").await.unwrap();
        assert_eq!(code.as_str(), "123456");
    }

    #[tokio::test]
    async fn test_unknown_name_is_not_found_with_input() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", LISTING_PATH)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(SAMPLE)
            .create_async()
            .await;

        let err = resolver(&server.url())
            .resolve("Unknown Co")
            .await
            .unwrap_err();

        match err {
            ResolveError::NotFound { input } => assert_eq!(input, "Unknown Co"),
            other => panic!("NotFound가 아닌 에러: {other}"),
        }
    }

    #[tokio::test]
    async fn test_directory_failure_propagates_typed_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", LISTING_PATH)
            .with_status(503)
            .create_async()
            .await;

        let err = resolver(&server.url()).resolve("삼성전자").await.unwrap_err();
        assert!(matches!(err, ResolveError::DirectoryFetch(_)));
    }
}
