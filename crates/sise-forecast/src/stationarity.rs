//! KPSS 수준 정상성 검정과 차분 차수 선택.
//!
//! 차분 차수 `d`는 KPSS 검정을 반복 적용해 고릅니다: 통계량이
//! 5% 임계값(0.463) 아래로 내려가는 최소 차수를 선택하고,
//! 상한(2)에 도달하면 그대로 2를 씁니다.

/// KPSS 수준 검정의 5% 임계값.
pub const KPSS_CRITICAL_5PCT: f64 = 0.463;

/// 1차 차분.
pub fn diff1(x: &[f64]) -> Vec<f64> {
    x.windows(2).map(|w| w[1] - w[0]).collect()
}

/// `d`차 차분.
pub fn difference(x: &[f64], d: usize) -> Vec<f64> {
    let mut w = x.to_vec();
    for _ in 0..d {
        w = diff1(&w);
    }
    w
}

/// KPSS 수준 정상성 통계량.
///
/// 평균을 제거한 잔차의 부분합 제곱합을 Bartlett 커널 장기분산으로
/// 나눕니다. 지연 수는 `⌈12 (n/100)^{1/4}⌉`. 분산이 0에 가까운
/// (사실상 상수) 시계열은 완전 정상으로 보고 0을 반환합니다.
pub fn kpss_level(x: &[f64]) -> f64 {
    let n = x.len();
    if n < 3 {
        return 0.0;
    }
    let nf = n as f64;

    let mean = x.iter().sum::<f64>() / nf;
    let e: Vec<f64> = x.iter().map(|v| v - mean).collect();

    let gamma0 = e.iter().map(|v| v * v).sum::<f64>() / nf;
    if gamma0 < 1e-12 {
        return 0.0;
    }

    // 부분합 제곱합
    let mut acc = 0.0;
    let mut numerator = 0.0;
    for v in &e {
        acc += v;
        numerator += acc * acc;
    }

    // Bartlett 커널 장기분산
    let lags = ((12.0 * (nf / 100.0).powf(0.25)).ceil() as usize).min(n - 1);
    let mut lrv = gamma0;
    for l in 1..=lags {
        let gamma_l = e[l..]
            .iter()
            .zip(&e[..n - l])
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / nf;
        let weight = 1.0 - l as f64 / (lags as f64 + 1.0);
        lrv += 2.0 * weight * gamma_l;
    }
    // 강한 음의 자기상관에서 추정 장기분산이 0 이하로 내려갈 수 있음
    if lrv <= 1e-12 {
        lrv = gamma0;
    }

    numerator / (nf * nf * lrv)
}

/// KPSS 검정을 반복 적용해 차분 차수를 고릅니다 (0..=max_d).
pub fn choose_differencing(x: &[f64], max_d: usize) -> usize {
    let mut w = x.to_vec();
    for d in 0..max_d {
        if kpss_level(&w) < KPSS_CRITICAL_5PCT {
            return d;
        }
        w = diff1(&w);
    }
    max_d
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 테스트용 결정적 의사난수 (LCG, Knuth 상수).
    fn lcg_noise(n: usize, seed: u64, scale: f64) -> Vec<f64> {
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
    fn test_difference_known_values() {
        let squares = [1.0, 4.0, 9.0, 16.0, 25.0];
        assert_eq!(diff1(&squares), vec![3.0, 5.0, 7.0, 9.0]);
        assert_eq!(difference(&squares, 2), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_constant_series_is_stationary() {
        let x = vec![70000.0; 200];
        assert_eq!(kpss_level(&x), 0.0);
        assert_eq!(choose_differencing(&x, 2), 0);
    }

    #[test]
    fn test_bounded_oscillation_is_stationary() {
        // 부분합이 유계인 교대 수열은 수준 정상
        let x: Vec<f64> = (0..500).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();
        assert!(kpss_level(&x) < KPSS_CRITICAL_5PCT);
        assert_eq!(choose_differencing(&x, 2), 0);
    }

    #[test]
    fn test_linear_trend_needs_one_difference() {
        let x: Vec<f64> = (0..500).map(|t| t as f64).collect();
        assert!(kpss_level(&x) > 1.0);
        // 1차 차분하면 상수
        assert_eq!(choose_differencing(&x, 2), 1);
    }

    #[test]
    fn test_random_walk_exceeds_critical_value() {
        // 확률적 추세: 잡음의 누적합은 수준 비정상이고,
        // 1차 차분하면 원래 잡음으로 돌아가 정상이 된다
        let noise = lcg_noise(500, 42, 1.0);
        let mut walk = Vec::with_capacity(noise.len());
        let mut acc = 0.0;
        for e in &noise {
            acc += e;
            walk.push(acc);
        }

        assert!(kpss_level(&walk) > KPSS_CRITICAL_5PCT);
        assert!(kpss_level(&noise) < KPSS_CRITICAL_5PCT);
        assert_eq!(choose_differencing(&walk, 2), 1);
    }

    #[test]
    fn test_trend_statistic_dominates_oscillation() {
        let trend: Vec<f64> = (0..400).map(|t| t as f64 * 3.0).collect();
        let osc: Vec<f64> = (0..400).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();
        assert!(kpss_level(&trend) > kpss_level(&osc));
    }
}
