//! Stage 6: rescale monthly averages so each pair sums to 12.

use std::collections::BTreeMap;

use season_model::{MONTHS_PER_YEAR, SeriesKey};

use crate::error::GroupError;

/// Rescale `averages` so the present months sum to 12.
///
/// An empty map normalizes to an empty map. A zero or non-finite sum is a
/// group failure.
pub fn normalize(
    key: &SeriesKey,
    averages: &BTreeMap<u32, f64>,
) -> Result<BTreeMap<u32, f64>, GroupError> {
    if averages.is_empty() {
        return Ok(BTreeMap::new());
    }
    let sum: f64 = averages.values().sum();
    if sum == 0.0 || !sum.is_finite() {
        return Err(GroupError::ZeroSeasonalSum {
            key: key.clone(),
            sum,
        });
    }
    let scale = f64::from(MONTHS_PER_YEAR) / sum;
    Ok(averages
        .iter()
        .map(|(&month, &average)| (month, average * scale))
        .collect())
}
