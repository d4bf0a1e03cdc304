//! 데이터 계층 - 종목 코드 해석, 일봉 시세 조회, 스프레드시트 내보내기.
//!
//! # 모듈 구성
//!
//! - [`directory`]: KIND 상장법인 목록 수집 (회사명 → 종목코드)
//! - [`resolver`]: 회사명/종목코드 입력을 6자리 티커로 해석
//! - [`provider`]: 네이버 금융 일봉 시세 Provider
//! - [`export`]: xlsx 내보내기

pub mod directory;
pub mod error;
pub mod export;
pub mod provider;
pub mod resolver;

pub use directory::{CompanyDirectory, KindDirectoryClient};
pub use error::{ExportError, ResolveError};
pub use provider::NaverDailyProvider;
pub use resolver::TickerResolver;
