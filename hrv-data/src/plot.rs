//! The per-request computation: selection in, plot-ready series out.

use crate::aggregate::aggregate;
use crate::run::PlotRequest;
use crate::window::{plan_ceiling, plan_window, AxisWindow, DEFAULT_HORIZON_HOURS};
use hrv_forecast::{ForecastStore, HourStamp, ObservedStore, Result, SeriesPoint, ViewerError};
use serde::Serialize;

/// Everything the chart layer needs for one region and one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotFrame {
    pub region: String,
    pub run_time: HourStamp,
    /// Max rainfall across all cells, per valid time
    pub forecast_max: Vec<SeriesPoint>,
    /// Observed reference curve for the region
    pub observed: Vec<SeriesPoint>,
    pub axis: AxisWindow,
}

/// The two loaded stores, held for the life of the session.
///
/// Built once after both payloads are in; every plot request afterwards only
/// reads from it.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    forecasts: ForecastStore,
    observed: ObservedStore,
    horizon_hours: u32,
}

impl ViewerSession {
    pub fn new(forecasts: ForecastStore, observed: ObservedStore) -> Self {
        ViewerSession {
            forecasts,
            observed,
            horizon_hours: DEFAULT_HORIZON_HOURS,
        }
    }

    pub fn with_horizon(mut self, horizon_hours: u32) -> Self {
        self.horizon_hours = horizon_hours;
        self
    }

    pub fn forecasts(&self) -> &ForecastStore {
        &self.forecasts
    }

    pub fn observed(&self) -> &ObservedStore {
        &self.observed
    }

    /// Resolve the run, aggregate its records for the region and plan the
    /// shared axes.
    ///
    /// Returns [`ViewerError::NoMatchingData`] when the run has no records
    /// for the region. A region missing from the observed data is not an
    /// error; its observed series is simply empty.
    pub fn prepare_plot(&self, request: &PlotRequest) -> Result<PlotFrame> {
        let run_time = request.selection.run_time()?;
        let records = self.forecasts.filter(&request.region, &run_time);
        if records.is_empty() {
            return Err(ViewerError::NoMatchingData {
                region: request.region.clone(),
                run_time: run_time.canonical(),
            });
        }

        let forecast_max = aggregate(records);
        let observed = self.observed.series_for(&request.region);
        if observed.is_empty() {
            log::warn!("plot: no observations for region {}", request.region);
        }

        let window = plan_window(&run_time, self.horizon_hours)?;
        let ceiling = plan_ceiling(&[&forecast_max, &observed]);
        log::debug!(
            "plot: {} run {} -> {} forecast points, {} observed, ceiling {}",
            request.region,
            run_time,
            forecast_max.len(),
            observed.len(),
            ceiling
        );

        Ok(PlotFrame {
            region: request.region.clone(),
            run_time,
            forecast_max,
            observed,
            axis: AxisWindow::new(window, ceiling),
        })
    }
}
