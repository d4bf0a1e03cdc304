//! ARIMA(p,d,q) 적합과 점 예측.
//!
//! 적합은 Hannan–Rissanen 2단계 최소제곱으로 수행합니다:
//! 1. 긴 AR 모형을 OLS로 적합해 잔차 근사치를 얻고,
//! 2. 시차 값과 시차 잔차에 대한 OLS로 (φ, θ)를 추정합니다.
//!
//! `d < 2`일 때는 차분 시계열의 평균을 상수항으로 포함합니다.
//! 우도는 조건부 제곱합 근사로 계산하며, AIC는 후보 차수 간
//! 상대 비교에만 사용합니다.

use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::stationarity::difference;

/// 자동 탐색이 고른 (p, d, q) 차수.
///
/// 내부용이며 호출자에게 노출되거나 저장되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOrder {
    /// AR 차수
    pub p: usize,
    /// 차분 차수
    pub d: usize,
    /// MA 차수
    pub q: usize,
}

impl ModelOrder {
    /// 새 차수 생성.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl std::fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// 개별 후보 적합 실패.
///
/// stepwise 탐색은 이 에러를 받은 후보를 조용히 버리고 계속합니다.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FitFailure {
    /// 차분 후 남은 관측치가 부족
    #[error("관측치 부족")]
    TooShort,

    /// 회귀 행렬이 특이 (상수 구간 등)
    #[error("특이 회귀 행렬")]
    Singular,

    /// 계수 또는 분산이 비정상 (발산 포함)
    #[error("비정상 계수")]
    NonFinite,
}

/// 적합된 ARIMA 모형.
#[derive(Debug, Clone)]
pub struct ArimaFit {
    order: ModelOrder,
    /// 차분 시계열 평균 (d == 2이면 0)
    mean: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    sigma2: f64,
    aic: f64,
    /// 평균 제거한 차분 시계열 전체
    centered: Vec<f64>,
    /// 재귀 계산한 모형 잔차 (centered와 같은 길이)
    residuals: Vec<f64>,
    /// 적분 복원용: k차 차분 시계열의 마지막 값 (k = 0..d)
    last_levels: Vec<f64>,
}

impl ArimaFit {
    /// 선택된 차수.
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// 조건부 AIC (후보 간 상대 비교용).
    pub fn aic(&self) -> f64 {
        self.aic
    }

    /// 잔차 분산.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// AR 계수.
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// `horizon` 스텝의 점 예측을 가격 수준으로 반환합니다.
    ///
    /// 미래 잔차는 0으로 두고 재귀식을 전개한 뒤 차분을 적분해
    /// 복원합니다. 신뢰구간은 계산하지 않습니다.
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        let (p, q) = (self.order.p, self.order.q);
        let n = self.centered.len();

        let mut w_ext = self.centered.clone();
        let mut e_ext = self.residuals.clone();

        for _ in 0..horizon {
            let t = w_ext.len();
            let mut value = 0.0;
            for i in 1..=p {
                value += self.ar[i - 1] * w_ext[t - i];
            }
            for j in 1..=q {
                value += self.ma[j - 1] * e_ext[t - j];
            }
            w_ext.push(value);
            // 미래 잔차는 0
            e_ext.push(0.0);
        }

        let future_w: Vec<f64> = w_ext[n..].iter().map(|w| w + self.mean).collect();
        integrate(&future_w, &self.last_levels)
    }
}

/// 주어진 차수로 ARIMA 모형을 적합합니다.
pub fn fit(series: &[f64], order: ModelOrder) -> Result<ArimaFit, FitFailure> {
    let ModelOrder { p, d, q } = order;

    if series.len() <= d {
        return Err(FitFailure::TooShort);
    }

    // 적분 복원용 마지막 수준값 기록
    let mut last_levels = Vec::with_capacity(d);
    {
        let mut cur = series.to_vec();
        for _ in 0..d {
            last_levels.push(*cur.last().expect("비어 있지 않음"));
            cur = crate::stationarity::diff1(&cur);
        }
    }

    let w = difference(series, d);
    let n = w.len();

    // 1단계 긴 AR 차수
    let m = if q > 0 { (2 * (p + q)).max(10) } else { 0 };
    let min_len = m + p + q + 10;
    if n < min_len {
        return Err(FitFailure::TooShort);
    }

    // 과도 차분(d == 2) 시 상수항은 2차 추세를 만들므로 제외
    let include_mean = d < 2;
    let mean = if include_mean {
        w.iter().sum::<f64>() / n as f64
    } else {
        0.0
    };
    let centered: Vec<f64> = w.iter().map(|v| v - mean).collect();

    let (ar, ma) = estimate_coefficients(&centered, p, q, m)?;

    if ar.iter().chain(ma.iter()).any(|c| !c.is_finite()) {
        return Err(FitFailure::NonFinite);
    }

    // 전체 구간에 대해 잔차를 재귀 계산 (사전 시차는 0으로 처리)
    let mut residuals = Vec::with_capacity(n);
    for t in 0..n {
        let mut pred = 0.0;
        for i in 1..=p {
            if t >= i {
                pred += ar[i - 1] * centered[t - i];
            }
        }
        for j in 1..=q {
            if t >= j {
                pred += ma[j - 1] * residuals[t - j];
            }
        }
        residuals.push(centered[t] - pred);
    }

    let burn_in = p.max(q);
    let n_eff = n - burn_in;
    let sse: f64 = residuals[burn_in..].iter().map(|e| e * e).sum();
    let sigma2 = (sse / n_eff as f64).max(1e-12);
    if !sigma2.is_finite() {
        return Err(FitFailure::NonFinite);
    }

    // 파라미터 수: φ + θ + 상수항 + 분산
    let k = p + q + usize::from(include_mean) + 1;
    let aic = n_eff as f64 * sigma2.ln() + 2.0 * k as f64;

    let fitted = ArimaFit {
        order,
        mean,
        ar,
        ma,
        sigma2,
        aic,
        centered,
        residuals,
        last_levels,
    };

    // 발산 가드: 비정상 AR 근을 가진 후보를 버림
    let max_abs = fitted
        .centered
        .iter()
        .fold(0.0f64, |acc, v| acc.max(v.abs()));
    let probe = fitted.forecast(50);
    let bound = 1e3 * (1.0 + max_abs) + fitted.mean.abs() * 100.0
        + fitted.last_levels.first().map(|v| v.abs()).unwrap_or(0.0) * 10.0;
    if probe.iter().any(|v| !v.is_finite() || v.abs() > bound) {
        return Err(FitFailure::NonFinite);
    }

    Ok(fitted)
}

/// Hannan–Rissanen 계수 추정.
fn estimate_coefficients(
    centered: &[f64],
    p: usize,
    q: usize,
    m: usize,
) -> Result<(Vec<f64>, Vec<f64>), FitFailure> {
    let n = centered.len();

    if p == 0 && q == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    if q == 0 {
        // 순수 AR: 시차 값에 대한 OLS
        let beta = ols_lagged(centered, None, p, 0, p)?;
        return Ok((beta, Vec::new()));
    }

    // 1단계: 긴 AR(m)으로 잔차 근사
    let long_ar = ols_lagged(centered, None, m, 0, m)?;
    let mut proxy = vec![0.0; n];
    for t in m..n {
        let mut pred = 0.0;
        for (i, coef) in long_ar.iter().enumerate() {
            pred += coef * centered[t - 1 - i];
        }
        proxy[t] = centered[t] - pred;
    }

    // 2단계: 시차 값 + 시차 잔차에 대한 OLS
    let start = (m + q).max(p);
    let beta = ols_lagged(centered, Some(&proxy), p, q, start)?;
    let ar = beta[..p].to_vec();
    let ma = beta[p..].to_vec();
    Ok((ar, ma))
}

/// 시차 회귀 OLS.
///
/// `y[t] = Σ β_i y[t-i] (i=1..p) + Σ β_{p+j} e[t-j] (j=1..q)`를
/// `t = start..n`에서 정규방정식으로 풉니다.
fn ols_lagged(
    y: &[f64],
    e: Option<&[f64]>,
    p: usize,
    q: usize,
    start: usize,
) -> Result<Vec<f64>, FitFailure> {
    let n = y.len();
    let cols = p + q;
    if start >= n || n - start <= cols {
        return Err(FitFailure::TooShort);
    }
    let rows = n - start;

    let mut x = Array2::<f64>::zeros((rows, cols));
    let mut target = Array1::<f64>::zeros(rows);
    for (row, t) in (start..n).enumerate() {
        for i in 1..=p {
            x[(row, i - 1)] = y[t - i];
        }
        if let Some(e) = e {
            for j in 1..=q {
                x[(row, p + j - 1)] = e[t - j];
            }
        }
        target[row] = y[t];
    }

    let xtx = x.t().dot(&x);
    let xty = x.t().dot(&target);
    solve_symmetric(xtx, xty).ok_or(FitFailure::Singular)
}

/// 부분 피벗 가우스 소거로 정규방정식을 풉니다.
///
/// 계수 행렬 차원은 `p + q ≤ 10`으로 작아 직접 소거로 충분합니다.
fn solve_symmetric(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        // 부분 피벗
        let mut pivot_row = col;
        let mut pivot_val = a[(col, col)].abs();
        for row in (col + 1)..n {
            let v = a[(row, col)].abs();
            if v > pivot_val {
                pivot_row = row;
                pivot_val = v;
            }
        }
        if pivot_val < 1e-10 {
            return None;
        }
        if pivot_row != col {
            for k in 0..n {
                let tmp = a[(col, k)];
                a[(col, k)] = a[(pivot_row, k)];
                a[(pivot_row, k)] = tmp;
            }
            b.swap(col, pivot_row);
        }

        for row in (col + 1)..n {
            let factor = a[(row, col)] / a[(col, col)];
            for k in col..n {
                a[(row, k)] -= factor * a[(col, k)];
            }
            b[row] -= factor * b[col];
        }
    }

    // 후방 대입
    let mut solution = vec![0.0; n];
    for col in (0..n).rev() {
        let mut acc = b[col];
        for k in (col + 1)..n {
            acc -= a[(col, k)] * solution[k];
        }
        solution[col] = acc / a[(col, col)];
    }

    if solution.iter().all(|v| v.is_finite()) {
        Some(solution)
    } else {
        None
    }
}

/// 차분 예측값을 가격 수준으로 적분 복원합니다.
///
/// `last_levels[k]`는 k차 차분 시계열의 마지막 관측값입니다.
fn integrate(forecast_w: &[f64], last_levels: &[f64]) -> Vec<f64> {
    let mut values = forecast_w.to_vec();
    for &level in last_levels.iter().rev() {
        let mut acc = level;
        for v in values.iter_mut() {
            acc += *v;
            *v = acc;
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 테스트용 결정적 의사난수 (LCG, Knuth 상수).
    pub(crate) fn lcg_noise(n: usize, seed: u64, scale: f64) -> Vec<f64> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let u = (state >> 11) as f64 / (1u64 << 53) as f64;
                (u - 0.5) * scale
            })
            .collect()
    }

    #[test]
    fn test_integrate_first_difference() {
        // 제곱수 수열의 다음 차분 예측 [9, 11] → [34, 45]
        assert_eq!(integrate(&[9.0, 11.0], &[25.0]), vec![34.0, 45.0]);
    }

    #[test]
    fn test_integrate_second_difference() {
        // 제곱수: 2차 차분은 상수 2, 복원하면 36, 49
        assert_eq!(integrate(&[2.0, 2.0], &[25.0, 9.0]), vec![36.0, 49.0]);
    }

    #[test]
    fn test_solve_known_system() {
        let a = ndarray::arr2(&[[2.0, 1.0], [1.0, 3.0]]);
        let b = ndarray::arr1(&[5.0, 10.0]);
        let x = solve_symmetric(a, b).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-9);
        assert!((x[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_singular_returns_none() {
        let a = ndarray::arr2(&[[1.0, 2.0], [2.0, 4.0]]);
        let b = ndarray::arr1(&[1.0, 2.0]);
        assert!(solve_symmetric(a, b).is_none());
    }

    #[test]
    fn test_mean_model_forecasts_the_mean() {
        let series: Vec<f64> = (0..100)
            .map(|t| 500.0 + if t % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let fit = fit(&series, ModelOrder::new(0, 0, 0)).unwrap();
        let forecast = fit.forecast(5);
        assert_eq!(forecast.len(), 5);
        for v in forecast {
            assert!((v - 500.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_constant_series_rejects_ar_terms() {
        let series = vec![70000.0; 200];
        // 상수 구간에서 AR 회귀 행렬은 특이
        assert_eq!(
            fit(&series, ModelOrder::new(2, 0, 2)).unwrap_err(),
            FitFailure::Singular
        );
        // 평균 모형은 항상 적합 가능
        let mean_fit = fit(&series, ModelOrder::new(0, 0, 0)).unwrap();
        assert!((mean_fit.forecast(3)[0] - 70000.0).abs() < 1e-9);
    }

    #[test]
    fn test_ar1_coefficient_recovery() {
        // x_t = 0.7 x_{t-1} + e_t
        let noise = lcg_noise(1200, 42, 2.0);
        let mut series = vec![0.0f64];
        for e in &noise {
            let prev = *series.last().unwrap();
            series.push(0.7 * prev + e);
        }

        let fitted = fit(&series, ModelOrder::new(1, 0, 0)).unwrap();
        let phi = fitted.ar()[0];
        assert!(
            (phi - 0.7).abs() < 0.15,
            "AR(1) 계수 복원 실패: {phi}"
        );
    }

    #[test]
    fn test_too_short_series_fails() {
        let series = vec![1.0, 2.0, 3.0];
        assert_eq!(
            fit(&series, ModelOrder::new(1, 0, 1)).unwrap_err(),
            FitFailure::TooShort
        );
    }

    #[test]
    fn test_forecast_length_matches_horizon() {
        let noise = lcg_noise(400, 7, 10.0);
        let series: Vec<f64> = noise.iter().map(|e| 1000.0 + e).collect();
        let fitted = fit(&series, ModelOrder::new(2, 0, 1)).unwrap();
        assert_eq!(fitted.forecast(14).len(), 14);
    }
}
