//! 일봉 시세 Provider 구현.

pub mod naver;

pub use naver::NaverDailyProvider;
