//! The `plot` command: load both payloads, compute one plot, write it out.

use crate::source::{load_session, Source};
use anyhow::Context;
use hrv_chart::{render_page, PlotPanels};
use hrv_data::{PlotFrame, PlotRequest, ViewerSession};
use log::info;
use std::path::Path;

/// Raw selection inputs as the user gave them.
#[derive(Debug, Clone, Default)]
pub struct PlotInputs {
    pub target: Option<String>,
    pub lead: Option<String>,
    pub region: Option<String>,
}

/// Validate the inputs and compute the plot against an already-loaded session.
pub fn compute_plot(session: &ViewerSession, inputs: &PlotInputs) -> hrv_forecast::Result<PlotFrame> {
    let request = PlotRequest::from_inputs(
        inputs.target.as_deref(),
        inputs.lead.as_deref(),
        inputs.region.as_deref(),
    )?;
    session.prepare_plot(&request)
}

/// Run the full plot command.
///
/// Incomplete selections and empty results come back as errors carrying a
/// message for the user; nothing is written in either case.
pub async fn run_plot(
    forecast: &Source,
    observed: &Source,
    inputs: &PlotInputs,
    horizon_hours: u32,
    output: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let session = load_session(forecast, observed).await?.with_horizon(horizon_hours);
    let frame = compute_plot(&session, inputs)?;
    info!(
        "Plotting {} run {}: {} forecast points, {} observed points",
        frame.region,
        frame.run_time,
        frame.forecast_max.len(),
        frame.observed.len()
    );

    let panels = PlotPanels::from_frame(&frame);
    if json {
        println!("{}", serde_json::to_string_pretty(&panels)?);
        return Ok(());
    }

    let heading = format!("{} – run {}", frame.region, frame.run_time);
    let html = render_page(&heading, &panels)?;
    std::fs::write(output, html).with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Plot written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrv_forecast::{ForecastStore, ObservedStore, SelectionIssue, ViewerError};

    fn session() -> ViewerSession {
        ViewerSession::new(
            ForecastStore::load(
                "run_time,lead,valid_time,region,cell_id,lat,lon,rain_in
2025-07-14T06:00:00,3,x,A,c1,0,0,0.5
2025-07-14T06:00:00,3,x,A,c2,0,0,1.2
",
            ),
            ObservedStore::load(r#"{"B": {"2025-07-14 09:00:00": 0.2}}"#).unwrap(),
        )
    }

    fn inputs(target: Option<&str>, lead: Option<&str>, region: Option<&str>) -> PlotInputs {
        PlotInputs {
            target: target.map(String::from),
            lead: lead.map(String::from),
            region: region.map(String::from),
        }
    }

    #[test]
    fn complete_selection_produces_frame() {
        let frame = compute_plot(
            &session(),
            &inputs(Some("2025-07-14T09:00:00"), Some("3"), Some("A")),
        )
        .unwrap();
        assert_eq!(frame.forecast_max.len(), 1);
        assert!(frame.observed.is_empty());
        assert_eq!(frame.axis.value_ceiling, 2.0);
    }

    #[test]
    fn missing_region_asks_for_all_inputs() {
        let err = compute_plot(&session(), &inputs(Some("2025-07-14T09:00:00"), Some("3"), None))
            .unwrap_err();
        assert!(matches!(err, ViewerError::InvalidSelection(SelectionIssue::MissingRegion)));
    }

    #[test]
    fn wrong_run_reports_no_data() {
        let err = compute_plot(
            &session(),
            &inputs(Some("2025-07-14T09:00:00"), Some("2"), Some("A")),
        )
        .unwrap_err();
        assert!(matches!(err, ViewerError::NoMatchingData { .. }));
    }

    #[tokio::test]
    async fn writes_html_page() {
        let dir = std::env::temp_dir().join(format!("hrv-plot-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let forecast = dir.join("forecast.csv");
        let observed = dir.join("observed.json");
        let output = dir.join("plot.html");
        std::fs::write(
            &forecast,
            "run_time,lead,valid_time,region,cell_id,lat,lon,rain_in\n\
             2025-07-14 06:00:00,3,x,A,c1,0,0,0.5\n",
        )
        .unwrap();
        std::fs::write(&observed, r#"{"A": {"2025-07-14 08:00:00": 0.1}}"#).unwrap();

        run_plot(
            &Source::Path(forecast),
            &Source::Path(observed),
            &inputs(Some("2025-07-14T09:00:00"), Some("3"), Some("A")),
            19,
            &output,
            false,
        )
        .await
        .unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("HRRR Max Forecast – A"));
        assert!(html.contains("Observed Rainfall – A"));
    }
}
