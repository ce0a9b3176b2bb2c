//! Stage 3: centered 12-month trend.
//!
//! The trend is built from two rolling means over the regularized values:
//!
//! 1. a trailing 12-month mean, moved back 6 positions, so that
//!    `ma12[t] = mean(value[t-5 ..= t+6])`;
//! 2. a trailing 2-point mean of `ma12`, moved back 1 position, so that
//!    `trend[t] = (ma12[t] + ma12[t+1]) / 2`.
//!
//! Positions where either window does not fit inside the series have no
//! trend. A series of `n` months has a trend for `5 <= t <= n - 8`, so at
//! least 13 months are needed.

use season_model::{MONTHS_PER_YEAR, Series};

/// Length of the seasonal moving-average window.
pub const TREND_WINDOW: usize = MONTHS_PER_YEAR as usize;

/// Positions the 12-month mean is moved back to center it.
const TREND_WINDOW_SHIFT: usize = TREND_WINDOW / 2;

/// Shortest series that yields at least one trend point.
pub const MIN_TREND_LENGTH: usize = TREND_WINDOW + 1;

/// Trailing rolling mean over a sequence of optional values.
///
/// Yields one item per input position; the item is `None` until a full
/// window is available or when any value inside the window is `None`.
#[derive(Debug, Clone)]
pub struct RollingMean<'a> {
    values: &'a [Option<f64>],
    window: usize,
    position: usize,
}

impl<'a> RollingMean<'a> {
    pub fn new(values: &'a [Option<f64>], window: usize) -> Self {
        Self {
            values,
            window,
            position: 0,
        }
    }
}

impl Iterator for RollingMean<'_> {
    type Item = Option<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.values.len() {
            return None;
        }
        let end = self.position + 1;
        self.position = end;
        if self.window == 0 || end < self.window {
            return Some(None);
        }
        let sum: Option<f64> = self.values[end - self.window..end].iter().copied().sum();
        Some(sum.map(|total| total / self.window as f64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RollingMean<'_> {}

/// Move every value `lead` positions back; the tail is padded with `None`.
fn shift_back(values: &[Option<f64>], lead: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|idx| values.get(idx + lead).copied().flatten())
        .collect()
}

/// Moving-average components for one regularized observation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrendPoint {
    /// Centered 12-month mean.
    pub ma12: Option<f64>,
    /// 2x12 centered trend.
    pub trend: Option<f64>,
}

/// Compute the centered trend for every position of `values`.
pub fn centered_trend(values: &[f64]) -> Vec<TrendPoint> {
    let observed: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    let rolling: Vec<Option<f64>> = RollingMean::new(&observed, TREND_WINDOW).collect();
    let ma12 = shift_back(&rolling, TREND_WINDOW_SHIFT);
    let paired: Vec<Option<f64>> = RollingMean::new(&ma12, 2).collect();
    let trend = shift_back(&paired, 1);
    ma12.into_iter()
        .zip(trend)
        .map(|(ma12, trend)| TrendPoint { ma12, trend })
        .collect()
}

/// Trend points for a regularized series, aligned with its observations.
pub fn extract_trend(series: &Series) -> Vec<TrendPoint> {
    centered_trend(&series.values())
}
