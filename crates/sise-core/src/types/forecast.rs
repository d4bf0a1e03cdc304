//! 예측 시계열 타입.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 하루치 예측 종가.
///
/// 원화 종가는 소수점 이하 단위가 없으므로 정수로 유지합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 예측 대상 영업일
    pub date: NaiveDate,
    /// 예측 종가 (원, 버림)
    pub close: i64,
}

/// 영업일 기준 예측 시계열.
///
/// 불변식: 길이는 요청한 horizon과 정확히 일치하고, 날짜는 마지막
/// 관측일 이후로 강한 오름차순이며 토/일이 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// 포인트 목록으로부터 생성합니다.
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    /// 모든 예측 포인트 반환.
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// 포인트 개수 (= horizon).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
