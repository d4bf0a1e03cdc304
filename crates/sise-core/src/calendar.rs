//! 영업일(월~금) 달력 유틸리티.
//!
//! 예측 horizon을 미래 영업일에 대응시킬 때 사용합니다.
//! 공휴일은 고려하지 않습니다 (주말만 제외).

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// 주말(토/일)인지 여부.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `date` 다음의 첫 영업일.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Days::new(1);
    while is_weekend(next) {
        next = next + Days::new(1);
    }
    next
}

/// `after` 이후의 영업일 `n`개를 순서대로 반환합니다.
///
/// 반환된 날짜는 모두 `after`보다 뒤이고 강한 오름차순이며
/// 토/일을 포함하지 않습니다.
pub fn business_days_after(after: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(n);
    let mut current = after;
    for _ in 0..n {
        current = next_business_day(current);
        days.push(current);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_next_business_day_skips_weekend() {
        // 2024-01-05는 금요일
        assert_eq!(next_business_day(date("2024-01-05")), date("2024-01-08"));
        // 토요일 다음도 월요일
        assert_eq!(next_business_day(date("2024-01-06")), date("2024-01-08"));
        // 평일 중간은 하루 뒤
        assert_eq!(next_business_day(date("2024-01-08")), date("2024-01-09"));
    }

    #[test]
    fn test_business_days_after_properties() {
        let start = date("2024-02-14");
        let days = business_days_after(start, 14);

        assert_eq!(days.len(), 14);
        assert!(days[0] > start);
        for pair in days.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for d in &days {
            assert!(!is_weekend(*d));
        }
    }

    #[test]
    fn test_business_days_after_zero() {
        assert!(business_days_after(date("2024-02-14"), 0).is_empty());
    }
}
