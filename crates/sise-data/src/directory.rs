//! KIND 상장법인 목록 수집.
//!
//! 한국거래소 KIND의 상장법인 다운로드 페이지를 크롤링하여
//! 회사명 → 6자리 종목코드 매핑을 만듭니다.
//!
//! ## 데이터 소스
//! - `GET /corpgeneral/corpList.do?method=download&searchType=13`
//! - 응답은 EUC-KR로 인코딩된 HTML 테이블 (헤더 행 포함)
//! - 회사명/종목코드 컬럼만 사용하고 나머지는 버립니다
//!
//! 매 조회마다 새로 수집하며 캐싱하지 않습니다.

use std::time::Duration;

use scraper::{Html, Selector};
use sise_core::types::TickerCode;
use tracing::info;

use crate::error::ResolveError;

const LISTING_PATH: &str = "/corpgeneral/corpList.do?method=download&searchType=13";

/// 회사 한 곳의 목록 항목.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyEntry {
    /// 회사 표시명
    pub name: String,
    /// 6자리 종목코드
    pub code: TickerCode,
}

/// 회사명 → 종목코드 디렉토리.
///
/// 목록 페이지의 행 순서를 유지합니다. 조회는 대소문자를 구분하는
/// 정확 일치이며 공백 정규화나 유사 검색은 하지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct CompanyDirectory {
    entries: Vec<CompanyEntry>,
}

impl CompanyDirectory {
    /// 항목 목록으로부터 생성합니다.
    pub fn new(entries: Vec<CompanyEntry>) -> Self {
        Self { entries }
    }

    /// 회사명 정확 일치 조회.
    pub fn lookup(&self, name: &str) -> Option<&TickerCode> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.code)
    }

    /// 항목 개수.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// KIND 상장법인 목록 클라이언트.
#[derive(Debug, Clone)]
pub struct KindDirectoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl KindDirectoryClient {
    /// 베이스 URL과 타임아웃으로 클라이언트를 생성합니다.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .map_err(|e| ResolveError::DirectoryFetch(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// 상장법인 목록을 수집하여 디렉토리를 만듭니다.
    pub async fn fetch(&self) -> Result<CompanyDirectory, ResolveError> {
        let url = format!("{}{}", self.base_url, LISTING_PATH);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ResolveError::DirectoryFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResolveError::DirectoryFetch(format!(
                "HTTP {}",
                response.status()
            )));
        }

        // KIND 다운로드 페이지는 EUC-KR 고정이며 Content-Type에
        // charset이 없는 경우가 있어 명시적으로 지정합니다.
        let html = response
            .text_with_charset("EUC-KR")
            .await
            .map_err(|e| ResolveError::DirectoryFetch(e.to_string()))?;

        let directory = parse_listing_html(&html)?;
        info!("상장법인 목록 수집 완료: {}개", directory.len());
        Ok(directory)
    }
}

/// 상장법인 목록 HTML 테이블을 파싱합니다.
///
/// 헤더 행에서 회사명/종목코드 컬럼 위치를 찾고, 그 두 컬럼만
/// 유지합니다. 종목코드는 6자리로 0 패딩합니다.
pub fn parse_listing_html(html: &str) -> Result<CompanyDirectory, ResolveError> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("table tr")
        .map_err(|e| ResolveError::DirectoryFetch(format!("셀렉터 오류: {}", e)))?;
    let cell_selector = Selector::parse("td, th")
        .map_err(|e| ResolveError::DirectoryFetch(format!("셀렉터 오류: {}", e)))?;

    let mut name_col: Option<usize> = None;
    let mut code_col: Option<usize> = None;
    let mut entries = Vec::new();

    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();

        if cells.is_empty() {
            continue;
        }

        // 헤더 행에서 컬럼 인덱스 결정. 두 컬럼이 같은 행에 있을
        // 때만 확정하고, 한쪽만 있는 행은 헤더로 보지 않습니다.
        if name_col.is_none() || code_col.is_none() {
            let name_idx = cells.iter().position(|c| c == "회사명");
            let code_idx = cells.iter().position(|c| c == "종목코드");
            if let (Some(n), Some(c)) = (name_idx, code_idx) {
                name_col = Some(n);
                code_col = Some(c);
            }
            continue;
        }

        let (name_idx, code_idx) = (name_col.unwrap(), code_col.unwrap());
        let name = match cells.get(name_idx) {
            Some(n) if !n.is_empty() => n.clone(),
            _ => continue,
        };
        let code = match cells.get(code_idx).and_then(|c| TickerCode::from_numeric(c)) {
            Some(c) => c,
            None => continue,
        };

        entries.push(CompanyEntry { name, code });
    }

    if name_col.is_none() || code_col.is_none() {
        return Err(ResolveError::DirectoryFetch(
            "회사명/종목코드 컬럼을 찾을 수 없습니다".to_string(),
        ));
    }

    Ok(CompanyDirectory::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html><body><table>
            <tr><th>회사명</th><th>종목코드</th><th>업종</th><th>상장일</th></tr>
            <tr><td>삼성전자</td><td>5930</td><td>전자</td><td>1975-06-11</td></tr>
            <tr><td>SK하이닉스</td><td>660</td><td>반도체</td><td>1996-12-26</td></tr>
            <tr><td>카카오</td><td>035720</td><td>서비스</td><td>2017-07-10</td></tr>
        </table></body></html>
    "#;

    #[test]
    fn test_parse_keeps_name_and_padded_code() {
        let directory = parse_listing_html(SAMPLE).unwrap();
        assert_eq!(directory.len(), 3);
        assert_eq!(directory.lookup("삼성전자").unwrap().as_str(), "005930");
        assert_eq!(directory.lookup("SK하이닉스").unwrap().as_str(), "000660");
        assert_eq!(directory.lookup("카카오").unwrap().as_str(), "035720");
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let directory = parse_listing_html(SAMPLE).unwrap();
        assert!(directory.lookup("삼성전자 ").is_none());
        assert!(directory.lookup("sk하이닉스").is_none());
        assert!(directory.lookup("없는회사").is_none());
    }

    #[test]
    fn test_parse_without_header_fails() {
        let html = "<table><tr><td>삼성전자</td><td>5930</td></tr></table>";
        assert!(parse_listing_html(html).is_err());
    }

    #[test]
    fn test_partial_header_row_does_not_latch_columns() {
        // 진짜 헤더보다 앞에 회사명만 들어간 안내 행이 있어도
        // 두 컬럼이 같은 행에 나타날 때까지 헤더로 취급하지 않는다
        let html = r#"
            <table>
                <tr><td>회사명</td><td>검색 안내</td></tr>
                <tr><th>회사명</th><th>종목코드</th></tr>
                <tr><td>삼성전자</td><td>5930</td></tr>
            </table>
        "#;
        let directory = parse_listing_html(html).unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.lookup("삼성전자").unwrap().as_str(), "005930");
    }

    #[tokio::test]
    async fn test_fetch_parses_served_table() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", LISTING_PATH)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(SAMPLE)
            .create_async()
            .await;

        let client =
            KindDirectoryClient::new(server.url(), std::time::Duration::from_secs(5)).unwrap();
        let directory = client.fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(directory.lookup("삼성전자").unwrap().as_str(), "005930");
    }

    #[tokio::test]
    async fn test_fetch_http_error_is_directory_fetch() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", LISTING_PATH)
            .with_status(500)
            .create_async()
            .await;

        let client =
            KindDirectoryClient::new(server.url(), std::time::Duration::from_secs(5)).unwrap();
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, ResolveError::DirectoryFetch(_)));
    }
}
