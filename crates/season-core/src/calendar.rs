//! Stage 2: calendar regularization.

use std::collections::BTreeMap;

use season_model::{Observation, Period, Series};

/// Fill interior gaps of `values` by linear interpolation over position.
///
/// Leading and trailing gaps are left empty: there is no extrapolation
/// beyond the first and last known value.
pub fn interpolate_linear(values: &mut [Option<f64>]) {
    let mut previous: Option<(usize, f64)> = None;
    for idx in 0..values.len() {
        let Some(current) = values[idx] else {
            continue;
        };
        if let Some((start, start_value)) = previous
            && idx > start + 1
        {
            let span = (idx - start) as f64;
            for (offset, slot) in values[start + 1..idx].iter_mut().enumerate() {
                let step = (offset + 1) as f64;
                *slot = Some(start_value + (current - start_value) * step / span);
            }
        }
        previous = Some((idx, current));
    }
}

/// Re-express a cleaned series as a gap-free monthly calendar.
///
/// Every month between the first and last observed period is present
/// exactly once. Observed months keep their value; inserted months are
/// interpolated and marked [`ValueOrigin::Interpolated`](season_model::ValueOrigin).
pub fn regularize(series: &Series) -> Series {
    let mut known: BTreeMap<Period, f64> = BTreeMap::new();
    for obs in &series.observations {
        known.entry(obs.period).or_insert(obs.value);
    }
    let (Some(&first), Some(&last)) = (known.keys().next(), known.keys().next_back()) else {
        return Series::new(series.key.clone());
    };

    let mut periods = Vec::new();
    let mut values = Vec::new();
    let mut cursor = Some(first);
    while let Some(period) = cursor.filter(|period| *period <= last) {
        periods.push(period);
        values.push(known.get(&period).copied());
        cursor = period.succ();
    }
    let observed: Vec<bool> = values.iter().map(Option::is_some).collect();
    interpolate_linear(&mut values);

    let observations = periods
        .into_iter()
        .zip(values)
        .zip(observed)
        .filter_map(|((period, value), was_observed)| {
            let value = value?;
            Some(if was_observed {
                Observation::observed(period, value)
            } else {
                Observation::interpolated(period, value)
            })
        })
        .collect();

    Series {
        key: series.key.clone(),
        observations,
    }
}

/// True when consecutive observations are exactly one month apart.
pub fn is_contiguous(series: &Series) -> bool {
    series
        .observations
        .windows(2)
        .all(|pair| pair[1].period.months_since(pair[0].period) == 1)
}
