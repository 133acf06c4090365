//! Local wall-clock timestamps serialized as `YYYY-MM-DD HH:MM:SS`.
//!
//! Use with `#[serde(with = "crate::types::wall_clock")]`.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(FORMAT).to_string()
}

pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
}
