//! Conversion of loosely typed records into observations.

use crate::model::Observation;
use crate::timestamp::IntoTimestamp;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_value::Value;

/// Names of the record fields holding the date and the value.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub date: String,
    pub value: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            date: "date".into(),
            value: "value".into(),
        }
    }
}

/// Convert map-like records into observations.
///
/// The date field may be a date string or integer milliseconds since the Unix
/// epoch; the value field must be numeric. Record order is kept.
///
/// # Errors
/// Returns an error naming the first record that is not a map, lacks a
/// mapped field, or holds a field of the wrong type.
pub fn convert<I>(records: I, fields: &FieldMap) -> Result<Vec<Observation>>
where
    I: IntoIterator<Item = Value>,
{
    let obs_vec = records
        .into_iter()
        .enumerate()
        .map(|(i_rec, rec)| {
            convert_record(rec, fields).with_context(|| format!("invalid record {i_rec}"))
        })
        .collect::<Result<Vec<_>>>()?;
    log::debug!("converted {} records", obs_vec.len());
    Ok(obs_vec)
}

/// Convert any serializable records into observations.
///
/// Each record is first serialized into a [`Value`]; see [`convert`].
pub fn convert_from<T: Serialize>(records: &[T], fields: &FieldMap) -> Result<Vec<Observation>> {
    let values = records
        .iter()
        .enumerate()
        .map(|(i_rec, rec)| {
            serde_value::to_value(rec).with_context(|| format!("failed to serialize record {i_rec}"))
        })
        .collect::<Result<Vec<_>>>()?;
    convert(values, fields)
}

/// Wrap bare values into observations.
///
/// Every observation is stamped with the same current wall-clock time.
pub fn convert_values(vals: &[f64]) -> Vec<Observation> {
    let now = Utc::now();
    vals.iter().map(|&value| Observation::new(now, value)).collect()
}

fn convert_record(rec: Value, fields: &FieldMap) -> Result<Observation> {
    let Value::Map(mut map) = unwrap_value(rec) else {
        bail!("record must be a map");
    };

    let date = map
        .remove(&Value::String(fields.date.clone()))
        .with_context(|| format!("missing field {:?}", fields.date))?;
    let date = to_timestamp(unwrap_value(date))
        .with_context(|| format!("invalid date field {:?}", fields.date))?;

    let value = map
        .remove(&Value::String(fields.value.clone()))
        .with_context(|| format!("missing field {:?}", fields.value))?;
    let value = to_f64(unwrap_value(value))
        .with_context(|| format!("invalid value field {:?}", fields.value))?;

    Ok(Observation::new(date, value))
}

/// Strip option and newtype wrappers.
fn unwrap_value(val: Value) -> Value {
    match val {
        Value::Option(Some(inner)) | Value::Newtype(inner) => unwrap_value(*inner),
        other => other,
    }
}

fn to_timestamp(val: Value) -> Result<DateTime<Utc>> {
    let date = match val {
        Value::String(s) => s.as_str().into_timestamp(),
        Value::I8(n) => i64::from(n).into_timestamp(),
        Value::I16(n) => i64::from(n).into_timestamp(),
        Value::I32(n) => i64::from(n).into_timestamp(),
        Value::I64(n) => n.into_timestamp(),
        Value::U8(n) => i64::from(n).into_timestamp(),
        Value::U16(n) => i64::from(n).into_timestamp(),
        Value::U32(n) => i64::from(n).into_timestamp(),
        Value::U64(n) => n.into_timestamp(),
        Value::F32(n) if n.is_finite() => (n as i64).into_timestamp(),
        Value::F64(n) if n.is_finite() => (n as i64).into_timestamp(),
        other => bail!("expected a date string or epoch milliseconds, found {other:?}"),
    };
    date.context("date is out of range or not in a known format")
}

fn to_f64(val: Value) -> Result<f64> {
    let num = match val {
        Value::F64(n) => n,
        Value::F32(n) => f64::from(n),
        Value::I8(n) => f64::from(n),
        Value::I16(n) => f64::from(n),
        Value::I32(n) => f64::from(n),
        Value::I64(n) => n as f64,
        Value::U8(n) => f64::from(n),
        Value::U16(n) => f64::from(n),
        Value::U32(n) => f64::from(n),
        Value::U64(n) => n as f64,
        other => bail!("expected a number, found {other:?}"),
    };
    Ok(num)
}
