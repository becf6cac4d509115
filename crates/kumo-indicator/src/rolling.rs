//! Sliding window extrema.
//!
//! Each function walks the input once, keeping a monotonic deque of candidate
//! indices, so a full recomputation stays linear in the series length.

use std::collections::VecDeque;

/// Rolling maximum over a closed window of exactly `window` values.
///
/// Position `i` is `None` while fewer than `window` values exist (`i + 1 <
/// window`). A zero window yields all `None`.
#[must_use]
pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, window, |kept, incoming| kept > incoming)
}

/// Rolling minimum over a closed window of exactly `window` values.
///
/// Same windowing rules as [`rolling_max`].
#[must_use]
pub fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, window, |kept, incoming| kept < incoming)
}

/// Midpoint of the rolling high and rolling low: `(max(highs) + min(lows)) / 2`.
///
/// `highs` and `lows` must have the same length.
#[must_use]
pub fn rolling_midpoint(highs: &[f64], lows: &[f64], window: usize) -> Vec<Option<f64>> {
    debug_assert_eq!(highs.len(), lows.len(), "highs and lows must be aligned");

    rolling_max(highs, window)
        .into_iter()
        .zip(rolling_min(lows, window))
        .map(|(high, low)| Some((high? + low?) / 2.0))
        .collect()
}

/// `dominates(kept, incoming)` is true when `kept` must stay ahead of
/// `incoming` in the deque.
fn rolling_extreme(
    values: &[f64],
    window: usize,
    dominates: impl Fn(f64, f64) -> bool,
) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut candidates: VecDeque<usize> = VecDeque::with_capacity(window);
    let mut out = Vec::with_capacity(values.len());

    for (i, &value) in values.iter().enumerate() {
        while candidates
            .back()
            .is_some_and(|&back| !dominates(values[back], value))
        {
            candidates.pop_back();
        }
        candidates.push_back(i);

        while candidates.front().is_some_and(|&front| front + window <= i) {
            candidates.pop_front();
        }

        let full = i + 1 >= window;
        out.push(
            candidates
                .front()
                .filter(|_| full)
                .map(|&front| values[front]),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(values: &[f64], window: usize, max: bool) -> Vec<Option<f64>> {
        (0..values.len())
            .map(|i| {
                if window == 0 || i + 1 < window {
                    return None;
                }
                let slice = &values[i + 1 - window..=i];
                let fold = if max { f64::max } else { f64::min };
                slice.iter().copied().reduce(fold)
            })
            .collect()
    }

    #[test]
    fn test_window_not_full() {
        let values = [3.0, 1.0];
        assert_eq!(rolling_max(&values, 3), vec![None, None]);
        assert_eq!(rolling_min(&values, 3), vec![None, None]);
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let values = [3.0, 1.0, 2.0];
        assert_eq!(rolling_max(&values, 1), vec![Some(3.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_zero_window() {
        assert_eq!(rolling_min(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn test_matches_naive_scan() {
        let values = [
            5.0, 3.0, 8.0, 8.0, 1.0, 7.0, 2.0, 9.0, 4.0, 4.0, 6.0, 0.5, 3.3, 8.8, 2.2,
        ];
        for window in 1..=6 {
            assert_eq!(rolling_max(&values, window), naive(&values, window, true));
            assert_eq!(rolling_min(&values, window), naive(&values, window, false));
        }
    }

    #[test]
    fn test_midpoint() {
        let highs: Vec<f64> = (1..=9).map(f64::from).collect();
        let lows = highs.clone();
        let mid = rolling_midpoint(&highs, &lows, 9);
        assert_eq!(mid[7], None);
        assert_eq!(mid[8], Some(5.0));
    }
}
