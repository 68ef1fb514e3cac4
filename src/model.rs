//! Series data types.

use crate::timestamp::IntoTimestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single point of a series.
///
/// Pairs a timestamp (`date`) with a real value (`value`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Instant at which the value was observed.
    pub date: DateTime<Utc>,

    /// Observed value.
    pub value: f64,
}

impl Observation {
    /// Create a new observation from a UTC timestamp and a value.
    pub fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }

    /// Create a new observation from any raw date representation.
    ///
    /// Returns `None` if the date cannot be coerced into a timestamp.
    pub fn at<D: IntoTimestamp>(date: D, value: f64) -> Option<Self> {
        date.into_timestamp().map(|date| Self { date, value })
    }
}

impl From<(DateTime<Utc>, f64)> for Observation {
    fn from((date, value): (DateTime<Utc>, f64)) -> Self {
        Self { date, value }
    }
}
