//! Stepwise (p, q) 차수 탐색.
//!
//! Hyndman–Khandakar 방식의 탐욕 탐색입니다: 시작 후보
//! (2,2), (0,0), (1,0), (0,1)에서 출발해 현재 최적 주변의
//! ±1 이웃을 AIC로 평가하고, 개선이 없으면 멈춥니다.
//! 전수 탐색이 아니며, 적합에 실패한 후보는 조용히 버립니다.

use std::collections::HashSet;

use tracing::debug;

use crate::arima::{fit, ArimaFit, ModelOrder};

/// 탐색 범위 상한.
pub const MAX_P: usize = 5;
/// 탐색 범위 상한.
pub const MAX_Q: usize = 5;

/// 차분 차수 `d`를 고정하고 (p, q)를 stepwise로 탐색합니다.
///
/// 모든 후보가 적합에 실패하면 `None`을 반환합니다.
pub fn stepwise_search(series: &[f64], d: usize, max_p: usize, max_q: usize) -> Option<ArimaFit> {
    let mut tried: HashSet<(usize, usize)> = HashSet::new();
    let mut best: Option<ArimaFit> = None;

    let starts = [(2, 2), (0, 0), (1, 0), (0, 1)];
    for (p, q) in starts {
        try_candidate(series, d, p.min(max_p), q.min(max_q), &mut tried, &mut best);
    }

    loop {
        let current = match &best {
            Some(fit) => fit.order(),
            // 시작 후보가 전부 실패
            None => return None,
        };
        let (p, q) = (current.p, current.q);
        let before = best.as_ref().map(|f| f.aic());

        let neighbors = [
            (p + 1, q),
            (p.wrapping_sub(1), q),
            (p, q + 1),
            (p, q.wrapping_sub(1)),
            (p + 1, q + 1),
            (p.wrapping_sub(1), q.wrapping_sub(1)),
        ];
        for (np, nq) in neighbors {
            if np > max_p || nq > max_q {
                continue;
            }
            try_candidate(series, d, np, nq, &mut tried, &mut best);
        }

        let after = best.as_ref().map(|f| f.aic());
        match (before, after) {
            (Some(b), Some(a)) if a < b - 1e-9 => continue,
            _ => break,
        }
    }

    if let Some(fit) = &best {
        debug!(order = %fit.order(), aic = fit.aic(), "차수 탐색 완료");
    }
    best
}

fn try_candidate(
    series: &[f64],
    d: usize,
    p: usize,
    q: usize,
    tried: &mut HashSet<(usize, usize)>,
    best: &mut Option<ArimaFit>,
) {
    if !tried.insert((p, q)) {
        return;
    }

    match fit(series, ModelOrder::new(p, d, q)) {
        Ok(candidate) => {
            let better = best
                .as_ref()
                .map(|b| candidate.aic() < b.aic())
                .unwrap_or(true);
            if better {
                *best = Some(candidate);
            }
        }
        // 실패한 후보는 탐색을 중단시키지 않음
        Err(failure) => {
            debug!(p, d, q, %failure, "후보 차수 적합 실패, 건너뜀");
        }
    }
}
