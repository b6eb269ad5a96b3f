//! Run selection, aggregation and axis planning for the rainfall viewer.
//!
//! This crate turns the loaded stores plus a user's selection into the
//! series and axis ranges the chart layer draws. Everything here is pure and
//! synchronous.

pub mod choices;
pub mod plot;
pub mod run;

pub use plot::{PlotFrame, ViewerSession};
pub use run::{resolve_run, PlotRequest, RunSelection};

/// Max-per-valid-time reduction of forecast records.
pub mod aggregate {
    use hrv_forecast::{ForecastRecord, HourStamp, SeriesPoint};
    use std::collections::BTreeMap;

    /// Group records by valid time and keep the largest rain value of each
    /// group, in ascending time order.
    ///
    /// Records without a rain value are ignored; a valid time whose records
    /// all lack rain is left out. The result does not depend on input order.
    pub fn aggregate<'a, I>(records: I) -> Vec<SeriesPoint>
    where
        I: IntoIterator<Item = &'a ForecastRecord>,
    {
        let mut groups: BTreeMap<HourStamp, f64> = BTreeMap::new();
        for record in records {
            let Some(rain) = record.rain() else {
                continue;
            };
            groups
                .entry(record.valid_time())
                .and_modify(|max| *max = max.max(rain))
                .or_insert(rain);
        }
        groups
            .into_iter()
            .map(|(time, value)| SeriesPoint::new(time, value))
            .collect()
    }

}

/// Display window and shared value-axis ceiling.
pub mod window {
    use hrv_forecast::{models::series_max, HourStamp, Result, SeriesPoint};
    use serde::Serialize;

    /// Hours shown after the run time on every plot.
    pub const DEFAULT_HORIZON_HOURS: u32 = 19;

    /// Axis ceiling used when nothing positive is plotted.
    pub const FLOOR_CEILING: f64 = 1.0;

    /// The fixed time span of a plot: `[start, end]`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct TimeWindow {
        pub start: HourStamp,
        pub end: HourStamp,
    }

    /// Time span plus the value range `[0, value_ceiling]` shared by both panels.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct AxisWindow {
        pub start: HourStamp,
        pub end: HourStamp,
        pub value_ceiling: f64,
    }

    impl AxisWindow {
        pub fn new(window: TimeWindow, value_ceiling: f64) -> Self {
            AxisWindow {
                start: window.start,
                end: window.end,
                value_ceiling,
            }
        }
    }

    /// Window starting exactly at `run_time` and `horizon_hours` long.
    pub fn plan_window(run_time: &HourStamp, horizon_hours: u32) -> Result<TimeWindow> {
        Ok(TimeWindow {
            start: *run_time,
            end: run_time.add_hours(i64::from(horizon_hours))?,
        })
    }

    /// `ceil` of the largest finite value across every series, where an empty
    /// series counts as 0. Falls back to [`FLOOR_CEILING`] so the axis never
    /// collapses to zero height.
    pub fn plan_ceiling(series_list: &[&[SeriesPoint]]) -> f64 {
        let max = series_list
            .iter()
            .map(|series| series_max(series).unwrap_or(0.0))
            .fold(0.0_f64, f64::max);
        let ceiling = max.ceil();
        if ceiling > 0.0 {
            ceiling
        } else {
            FLOOR_CEILING
        }
    }

}
