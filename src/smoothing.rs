//! Moving averages over a series.
//!
//! Outputs are positionally aligned with the input: slot `i` corresponds to
//! observation `i`, and slots whose window has not yet filled hold `None`.

use crate::model::Observation;
use serde::{Deserialize, Serialize};

/// Window length used when no period is requested.
pub const DEFAULT_PERIOD: usize = 10;

/// Smoothed series, one slot per input observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverage {
    points: Vec<Option<Observation>>,
}

impl MovingAverage {
    /// Slots of the smoothed series; `None` where the window was not yet full.
    pub fn points(&self) -> &[Option<Observation>] {
        &self.points
    }

    /// Bare numeric projection of the smoothed series.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.map(|p| p.value)).collect()
    }

    /// First slot holding a value, if any.
    pub fn first_value(&self) -> Option<&Observation> {
        self.points.iter().flatten().next()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Option<Observation>> {
        self.points
    }
}

/// Resolve the requested period, defaulting to `min(10, n)`.
pub fn resolve_period(period: Option<usize>, n_obs: usize) -> usize {
    period.unwrap_or(DEFAULT_PERIOD.min(n_obs))
}

/// Compute the simple moving average over windows of `period` observations.
///
/// Slot `i >= period - 1` holds the mean of `values[i + 1 - period..=i]`
/// stamped with `data[i].date`.
pub fn simple_moving_average(data: &[Observation], period: usize) -> MovingAverage {
    let n_obs = data.len();
    if !window_fits(period, n_obs) {
        return unfilled(n_obs);
    }

    let vals: Vec<f64> = data.iter().map(|obs| obs.value).collect();
    let mut points = vec![None; period - 1];
    points.reserve(n_obs + 1 - period);
    for (i_end, window) in (period - 1..).zip(vals.windows(period)) {
        points.push(Some(Observation::new(data[i_end].date, window_mean(window))));
    }

    MovingAverage { points }
}

/// Compute the exponential moving average with smoothing weight `2 / (period + 1)`.
///
/// Seeded at slot `period - 1` with the simple mean of the first window; every
/// later slot applies `ema = (value - prev) * w + prev`.
pub fn exponential_moving_average(data: &[Observation], period: usize) -> MovingAverage {
    let n_obs = data.len();
    if !window_fits(period, n_obs) {
        return unfilled(n_obs);
    }

    let w = 2.0 / (period as f64 + 1.0);
    let seed: Vec<f64> = data[..period].iter().map(|obs| obs.value).collect();
    let mut prev = window_mean(&seed);

    let mut points = vec![None; period - 1];
    points.reserve(n_obs + 1 - period);
    points.push(Some(Observation::new(data[period - 1].date, prev)));
    for obs in &data[period..] {
        prev = (obs.value - prev) * w + prev;
        points.push(Some(Observation::new(obs.date, prev)));
    }

    MovingAverage { points }
}

fn window_fits(period: usize, n_obs: usize) -> bool {
    if period == 0 || period > n_obs {
        if n_obs > 0 {
            log::debug!("window of {period} never fills over {n_obs} observations");
        }
        return false;
    }
    true
}

fn window_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

fn unfilled(n_obs: usize) -> MovingAverage {
    MovingAverage {
        points: vec![None; n_obs],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn series(vals: &[f64]) -> Vec<Observation> {
        vals.iter()
            .enumerate()
            .map(|(i, &v)| {
                let date = DateTime::<Utc>::from_timestamp(i as i64 * 60, 0).unwrap();
                Observation::new(date, v)
            })
            .collect()
    }

    #[test]
    fn sma_pads_and_averages() {
        let data = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let sma = simple_moving_average(&data, 3);
        assert_eq!(sma.values(), vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
        assert_eq!(sma.points()[2].unwrap().date, data[2].date);
        assert_eq!(sma.points()[4].unwrap().date, data[4].date);
    }

    #[test]
    fn ema_seeds_with_window_mean() {
        let data = series(&[2.0, 4.0, 6.0, 8.0]);
        let ema = exponential_moving_average(&data, 3);
        let vals = ema.values();
        assert_eq!(vals[..2], [None, None]);
        assert_eq!(vals[2], Some(4.0));
        // w = 0.5: (8 - 4) * 0.5 + 4
        assert_eq!(vals[3], Some(6.0));
        assert_eq!(ema.points()[3].unwrap().date, data[3].date);
    }

    #[test]
    fn full_length_window_gives_single_value() {
        let data = series(&[1.0, 2.0, 3.0]);
        assert_eq!(simple_moving_average(&data, 3).values(), vec![None, None, Some(2.0)]);
        assert_eq!(exponential_moving_average(&data, 3).values(), vec![None, None, Some(2.0)]);
    }

    #[test]
    fn degenerate_periods_give_markers_only() {
        let data = series(&[1.0, 2.0, 3.0]);
        for period in [0, 4, 100] {
            assert_eq!(simple_moving_average(&data, period).values(), vec![None; 3]);
            assert_eq!(exponential_moving_average(&data, period).values(), vec![None; 3]);
        }
        assert!(simple_moving_average(&[], 0).is_empty());
    }

    #[test]
    fn default_period_is_capped_by_length() {
        assert_eq!(resolve_period(None, 4), 4);
        assert_eq!(resolve_period(None, 25), 10);
        assert_eq!(resolve_period(Some(3), 25), 3);
    }
}
