//! Estimation of values between observed timestamps.
//!
//! All functions assume `data` is sorted by ascending date; no check is made.

use crate::model::Observation;
use crate::timestamp::millis_between;
use chrono::{DateTime, Utc};

/// Position of a target date relative to a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket<'a> {
    /// Target coincides with an observation.
    Exact(&'a Observation),
    /// Target lies strictly between two adjacent observations.
    Between(&'a Observation, &'a Observation),
    /// Target precedes the first observation, is at or after the last one
    /// without matching it, or the series is empty.
    Outside,
}

/// Locate the observations bracketing `target` by a linear scan.
pub fn between_dates(data: &[Observation], target: DateTime<Utc>) -> Bracket<'_> {
    for (i_obs, obs) in data.iter().enumerate() {
        if target < obs.date {
            if i_obs == 0 {
                return Bracket::Outside;
            }
            return Bracket::Between(&data[i_obs - 1], obs);
        } else if target == obs.date {
            return Bracket::Exact(obs);
        }
    }
    Bracket::Outside
}

/// Straight-line estimate `y1 + (y2 - y1) * (t - x1) / (x2 - x1)`.
pub fn linear_interpolate(data: &[Observation], target: DateTime<Utc>) -> Option<f64> {
    interpolate_with(data, target, |y1, y2, dt, span| y1 + (y2 - y1) * dt / span)
}

/// Geometric estimate `y1 * (y2 / y1) ^ ((t - x1) / (x2 - x1))`.
///
/// Yields NaN when `y2 / y1` is negative, or non-finite values when `y1` is zero.
pub fn exponential_interpolate(data: &[Observation], target: DateTime<Utc>) -> Option<f64> {
    interpolate_with(data, target, |y1, y2, dt, span| y1 * (y2 / y1).powf(dt / span))
}

fn interpolate_with<F>(data: &[Observation], target: DateTime<Utc>, estimate: F) -> Option<f64>
where
    F: Fn(f64, f64, f64, f64) -> f64,
{
    match between_dates(data, target) {
        Bracket::Exact(obs) => Some(obs.value),
        Bracket::Between(lo, hi) => {
            let dt = millis_between(lo.date, target);
            let span = millis_between(lo.date, hi.date);
            Some(estimate(lo.value, hi.value, dt, span))
        }
        Bracket::Outside => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64, value: f64) -> Observation {
        Observation::new(DateTime::from_timestamp(secs, 0).unwrap(), value)
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn brackets_cover_all_cases() {
        let data = [at(0, 1.0), at(10, 2.0), at(20, 3.0)];
        assert_eq!(between_dates(&data, ts(-1)), Bracket::Outside);
        assert_eq!(between_dates(&data, ts(0)), Bracket::Exact(&data[0]));
        assert_eq!(between_dates(&data, ts(15)), Bracket::Between(&data[1], &data[2]));
        assert_eq!(between_dates(&data, ts(20)), Bracket::Exact(&data[2]));
        assert_eq!(between_dates(&data, ts(21)), Bracket::Outside);
        assert_eq!(between_dates(&[], ts(0)), Bracket::Outside);
    }

    #[test]
    fn linear_midpoint() {
        let data = [at(0, 10.0), at(10, 20.0)];
        assert_eq!(linear_interpolate(&data, ts(5)), Some(15.0));
        assert_eq!(linear_interpolate(&data, ts(10)), Some(20.0));
        assert_eq!(linear_interpolate(&data, ts(11)), None);
    }

    #[test]
    fn linear_works_on_millisecond_offsets() {
        let lo = Observation::new(DateTime::from_timestamp_millis(0).unwrap(), 3.3);
        let hi = Observation::new(DateTime::from_timestamp_millis(3).unwrap(), 9.1);
        let target = DateTime::from_timestamp_millis(1).unwrap();
        let est = linear_interpolate(&[lo, hi], target).unwrap();
        assert_eq!(est, 3.3 + (9.1 - 3.3) * 1.0 / 3.0);
        assert_eq!(est, 5.233333333333333);
    }

    #[test]
    fn exponential_midpoint_is_geometric_mean() {
        let data = [at(0, 10.0), at(10, 20.0)];
        let est = exponential_interpolate(&data, ts(5)).unwrap();
        assert!((est - 10.0 * 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn exponential_with_negative_ratio_is_nan() {
        let data = [at(0, -1.0), at(10, 4.0)];
        assert!(exponential_interpolate(&data, ts(5)).unwrap().is_nan());
    }
}
