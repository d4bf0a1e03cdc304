//! 일봉 시세 타입.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 하루치 OHLC 시세.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
}

/// 거래일 오름차순 일봉 시계열.
///
/// 불변식: 날짜 오름차순, 중복 날짜 없음. 비거래일은 빠져 있습니다.
/// 조회 결과가 비어 있는 것은 에러가 아니며 호출자가 분기합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    rows: Vec<DailyPrice>,
}

impl PriceSeries {
    /// 빈 시계열 생성.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 임의 순서의 행들로부터 시계열을 구성합니다.
    ///
    /// 날짜 오름차순으로 정렬하고 중복 날짜는 먼저 나온 행만 남깁니다.
    pub fn from_rows(mut rows: Vec<DailyPrice>) -> Self {
        rows.sort_by_key(|r| r.date);
        rows.dedup_by_key(|r| r.date);
        Self { rows }
    }

    /// 모든 행 반환 (날짜 오름차순).
    pub fn rows(&self) -> &[DailyPrice] {
        &self.rows
    }

    /// 행 개수.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 마지막 거래일.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// 종가만 추출합니다 (날짜 오름차순).
    pub fn closes(&self) -> Vec<Decimal> {
        self.rows.iter().map(|r| r.close).collect()
    }

    /// 가장 최근 `n`개 행을 반환합니다.
    pub fn tail(&self, n: usize) -> &[DailyPrice] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(date: &str, close: Decimal) -> DailyPrice {
        DailyPrice {
            date: date.parse().unwrap(),
            open: close,
            high: close,
            low: close,
            close,
        }
    }

    #[test]
    fn test_from_rows_sorts_and_dedups() {
        let series = PriceSeries::from_rows(vec![
            row("2024-01-03", dec!(300)),
            row("2024-01-02", dec!(200)),
            row("2024-01-03", dec!(999)),
            row("2024-01-01", dec!(100)),
        ]);

        let dates: Vec<_> = series.rows().iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        // 중복 날짜는 먼저 나온 행 유지
        assert_eq!(series.rows()[2].close, dec!(300));
    }

    #[test]
    fn test_tail_clamps_to_len() {
        let series = PriceSeries::from_rows(vec![
            row("2024-01-01", dec!(100)),
            row("2024-01-02", dec!(200)),
        ]);
        assert_eq!(series.tail(10).len(), 2);
        assert_eq!(series.tail(1)[0].close, dec!(200));
    }

    #[test]
    fn test_empty_series_is_not_an_error() {
        let series = PriceSeries::empty();
        assert!(series.is_empty());
        assert_eq!(series.last_date(), None);
        assert!(series.closes().is_empty());
    }
}
