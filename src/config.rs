use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, ops::RangeBounds};

/// Series configuration options.
///
/// Parsed from TOML and validated before use.
/// See [`SeriesOptions::from_toml`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesOptions {
    /// Sampling period of the series.
    ///
    /// Carried with the series for callers; no statistic reads it.
    pub period: f64,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self { period: 1.0 }
    }
}

impl SeriesOptions {
    /// Load [`SeriesOptions`] from a TOML document.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    /// Returns an error if the document cannot be deserialized
    /// or if the option values are invalid.
    pub fn from_toml(src: &str) -> Result<Self> {
        let options: SeriesOptions =
            toml::from_str(src).context("failed to deserialize options")?;

        options.validate().context("failed to validate options")?;

        Ok(options)
    }

    /// Check that every option holds a usable value.
    pub fn validate(&self) -> Result<()> {
        check_num(self.period, f64::MIN_POSITIVE..=f64::MAX).context("invalid period")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
