use crate::error::{Result, ViewerError};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical local-time format used as the join and sort key: "YYYY-MM-DDTHH:00:00"
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:00:00";

/// Date format used for target-time choice lists: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp layouts accepted on input, tried in order.
const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A local wall-clock timestamp truncated to the hour.
///
/// No timezone is attached or applied: the calendar fields are taken as they
/// appear in the source data. Arithmetic happens on the typed value; the
/// canonical string from [`HourStamp::canonical`] is only a projection for
/// keys and output, and its lexical order matches the chronological order.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub struct HourStamp(NaiveDateTime);

impl HourStamp {
    /// Truncate a date-time to the start of its hour.
    pub fn from_naive(value: NaiveDateTime) -> Self {
        let truncated = value
            .date()
            .and_hms_opt(value.hour(), 0, 0)
            .unwrap_or(value);
        HourStamp(truncated)
    }

    /// Build the stamp for `hour` on `date`, if the hour is in 0..24.
    pub fn from_date_hour(date: NaiveDate, hour: u32) -> Option<Self> {
        date.and_hms_opt(hour, 0, 0).map(HourStamp)
    }

    /// Parse any of the accepted input layouts, including a bare "YYYY-MM-DD"
    /// which maps to midnight.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        for format in INPUT_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(HourStamp::from_naive(parsed));
            }
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .ok()
            .and_then(|date| HourStamp::from_date_hour(date, 0))
            .ok_or_else(|| ViewerError::TimestampParse(trimmed.to_string()))
    }

    /// The canonical "YYYY-MM-DDTHH:00:00" representation.
    pub fn canonical(&self) -> String {
        self.0.format(CANONICAL_FORMAT).to_string()
    }

    /// Shift by `hours` (negative moves backwards), rolling over day, month
    /// and year boundaries through chrono's calendar arithmetic.
    pub fn add_hours(&self, hours: i64) -> Result<Self> {
        TimeDelta::try_hours(hours)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(HourStamp)
            .ok_or(ViewerError::OutOfRange(hours))
    }

    /// Whole hours from `earlier` to `self`.
    pub fn hours_since(&self, earlier: &HourStamp) -> i64 {
        (self.0 - earlier.0).num_hours()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

/// Format a timestamp as its canonical local-time string.
pub fn to_canonical_local(stamp: &HourStamp) -> String {
    stamp.canonical()
}

/// Return a new timestamp `hours` later than `stamp`.
pub fn add_hours(stamp: &HourStamp, hours: i64) -> Result<HourStamp> {
    stamp.add_hours(hours)
}

impl fmt::Display for HourStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for HourStamp {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        HourStamp::parse(s)
    }
}

impl From<NaiveDateTime> for HourStamp {
    fn from(value: NaiveDateTime) -> Self {
        HourStamp::from_naive(value)
    }
}

impl From<HourStamp> for NaiveDateTime {
    fn from(value: HourStamp) -> Self {
        value.0
    }
}

impl Serialize for HourStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for HourStamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        HourStamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}
