use crate::config::SeriesOptions;
use crate::error::Result;
use crate::interpolate::{self, Bracket};
use crate::model::Observation;
use crate::smoothing::{self, MovingAverage};
use crate::stats;
use crate::timestamp::IntoTimestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics engine over an ordered series of observations.
///
/// Holds the observations and the series options, and recomputes every
/// statistic from the held data on each call. Observations are expected in
/// ascending date order; moving averages and interpolation rely on it and do
/// not check it.
///
/// Queries that select an element (`max`, `min`, `median`, `mode`) return
/// `None` on an empty series. Arithmetic queries return the plain IEEE result,
/// so degenerate inputs surface as NaN or infinities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    data: Vec<Observation>,
    #[serde(default)]
    options: SeriesOptions,
}

impl TimeSeries {
    /// Create a new `TimeSeries` from observations sorted by date.
    pub fn new(data: Vec<Observation>, options: SeriesOptions) -> Self {
        Self { data, options }
    }

    /// Observations held by the series.
    pub fn data(&self) -> &[Observation] {
        &self.data
    }

    /// Replace every held observation.
    pub fn set_data(&mut self, data: Vec<Observation>) -> &mut Self {
        self.data = data;
        self
    }

    pub fn options(&self) -> &SeriesOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Observation dates, in series order.
    pub fn dates(&self) -> impl Iterator<Item = DateTime<Utc>> + Clone + '_ {
        self.data.iter().map(|obs| obs.date)
    }

    /// Observation values, in series order.
    pub fn values(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.data.iter().map(|obs| obs.value)
    }

    fn value_vec(&self) -> Vec<f64> {
        self.values().collect()
    }

    /// Largest value; NaN values are skipped unless all values are NaN, which gives `Some(NaN)`.
    pub fn max(&self) -> Option<f64> {
        stats::compute_max(&self.value_vec())
    }

    /// Smallest value; NaN values are skipped unless all values are NaN, which gives `Some(NaN)`.
    pub fn min(&self) -> Option<f64> {
        stats::compute_min(&self.value_vec())
    }

    /// Arithmetic mean of the values; `0` for an empty series.
    pub fn mean(&self) -> f64 {
        stats::compute_mean(&self.value_vec())
    }

    /// Element of rank `n / 2` (the upper median for even lengths).
    ///
    /// Works on a copy of the values, so the series order is untouched.
    pub fn median(&self) -> Option<f64> {
        let mut scratch = self.value_vec();
        stats::compute_median(&mut scratch)
    }

    /// Most frequent value, ties going to the value that reached the count first.
    pub fn mode(&self) -> Option<f64> {
        stats::compute_mode(&self.value_vec())
    }

    /// Sample variance (normalized by `n - 1`).
    ///
    /// NaN for a single observation.
    pub fn variance(&self) -> f64 {
        stats::compute_var(&self.value_vec())
    }

    /// Sample standard deviation, the square root of [`TimeSeries::variance`].
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Population covariance (normalized by `n`) with another series.
    ///
    /// # Errors
    /// Returns [`crate::SeriesError::LengthMismatch`] if the series differ in length.
    pub fn covariance(&self, other: &TimeSeries) -> Result<f64> {
        stats::compute_cov(&self.value_vec(), &other.value_vec()).inspect_err(|error| {
            log::debug!("refusing covariance: {error}");
        })
    }

    /// Simple moving average; `None` uses a period of `min(10, n)`.
    pub fn simple_moving_average(&self, period: Option<usize>) -> MovingAverage {
        let period = smoothing::resolve_period(period, self.len());
        smoothing::simple_moving_average(&self.data, period)
    }

    /// Exponential moving average; `None` uses a period of `min(10, n)`.
    pub fn exponential_moving_average(&self, period: Option<usize>) -> MovingAverage {
        let period = smoothing::resolve_period(period, self.len());
        smoothing::exponential_moving_average(&self.data, period)
    }

    /// Observations bracketing `date`.
    pub fn between_dates(&self, date: DateTime<Utc>) -> Bracket<'_> {
        interpolate::between_dates(&self.data, date)
    }

    /// Linear estimate of the value at `date`.
    ///
    /// Returns the observed value on an exact date match, and `None` outside
    /// the observed range or if `date` cannot be read as a timestamp.
    pub fn linear_interpolate<D: IntoTimestamp>(&self, date: D) -> Option<f64> {
        let date = coerce(date)?;
        interpolate::linear_interpolate(&self.data, date)
    }

    /// Geometric estimate of the value at `date`.
    ///
    /// Same bracketing rules as [`TimeSeries::linear_interpolate`].
    pub fn exponential_interpolate<D: IntoTimestamp>(&self, date: D) -> Option<f64> {
        let date = coerce(date)?;
        interpolate::exponential_interpolate(&self.data, date)
    }
}

impl From<Vec<Observation>> for TimeSeries {
    fn from(data: Vec<Observation>) -> Self {
        Self::new(data, SeriesOptions::default())
    }
}

impl FromIterator<Observation> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

fn coerce<D: IntoTimestamp>(date: D) -> Option<DateTime<Utc>> {
    let date = date.into_timestamp();
    if date.is_none() {
        log::debug!("interpolation date is not a valid timestamp");
    }
    date
}
