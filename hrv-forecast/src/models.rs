//! Series value types shared by the stores, the aggregation step and the
//! chart adapter.
//!
//! All structs derive `Serialize` so they can be handed to the plotting
//! layer as JSON.

use crate::time::HourStamp;
use serde::Serialize;

/// A single (time, value) pair used for line chart data points.
///
/// `value` is rainfall in inches; `time` serializes in the canonical
/// "YYYY-MM-DDTHH:00:00" form.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub time: HourStamp,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(time: HourStamp, value: f64) -> Self {
        SeriesPoint { time, value }
    }
}

/// Largest finite value in a series, if any.
pub fn series_max(points: &[SeriesPoint]) -> Option<f64> {
    points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(hour: u32, value: f64) -> SeriesPoint {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
        SeriesPoint::new(HourStamp::from_date_hour(date, hour).unwrap(), value)
    }

    #[test]
    fn series_max_skips_non_finite() {
        let points = vec![point(1, 0.2), point(2, f64::NAN), point(3, 1.7), point(4, 0.9)];
        assert_eq!(series_max(&points), Some(1.7));
    }

    #[test]
    fn series_max_of_empty_is_none() {
        assert_eq!(series_max(&[]), None);
        assert_eq!(series_max(&[point(1, f64::INFINITY)]), None);
    }

    #[test]
    fn point_serializes_with_canonical_time() {
        let json = serde_json::to_value(point(9, 1.2)).unwrap();
        assert_eq!(json["time"], "2025-07-14T09:00:00");
        assert_eq!(json["value"], 1.2);
    }
}
