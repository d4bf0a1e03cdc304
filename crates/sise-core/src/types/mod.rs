//! 도메인 타입.

pub mod forecast;
pub mod price;
pub mod ticker;

pub use forecast::{ForecastPoint, ForecastSeries};
pub use price::{DailyPrice, PriceSeries};
pub use ticker::TickerCode;
