//! Descriptive statistics, moving averages and interpolation over an ordered
//! series of `(timestamp, value)` observations.
//!
//! ```
//! use chrono::DateTime;
//! use series_stats::{Observation, TimeSeries};
//!
//! let ts: TimeSeries = [(0, 10.0), (10, 20.0)]
//!     .into_iter()
//!     .map(|(secs, v)| Observation::new(DateTime::from_timestamp(secs, 0).unwrap(), v))
//!     .collect();
//!
//! assert_eq!(ts.mean(), 15.0);
//! assert_eq!(ts.linear_interpolate(5_000i64), Some(15.0));
//! ```

pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod interpolate;
pub mod model;
pub mod smoothing;
pub mod stats;
pub mod timestamp;

pub use config::SeriesOptions;
pub use convert::FieldMap;
pub use engine::TimeSeries;
pub use error::{Result, SeriesError};
pub use interpolate::Bracket;
pub use model::Observation;
pub use smoothing::MovingAverage;
pub use timestamp::IntoTimestamp;
