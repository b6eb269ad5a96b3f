//! Command implementations for the HRV CLI.
//!
//! Provides subcommands for plotting a forecast run against observations,
//! listing the available selections, and previewing a run time.

use clap::Subcommand;
use hrv_data::window::DEFAULT_HORIZON_HOURS;
use hrv_forecast::ViewerError;
use std::path::PathBuf;

pub mod choices;
pub mod plot;
pub mod source;

use source::Source;

#[derive(Subcommand)]
pub enum Command {
    /// Plot the max forecast for a run against the observed rainfall
    Plot {
        /// Forecast CSV (path or http(s) URL)
        #[arg(short = 'f', long)]
        forecast: Source,

        /// Observed rainfall JSON (path or http(s) URL)
        #[arg(short = 'o', long)]
        observed: Source,

        /// Target valid time, e.g. 2025-07-14T09:00:00
        #[arg(short = 't', long)]
        target: Option<String>,

        /// Lead time in hours (at least 1)
        #[arg(short = 'l', long)]
        lead: Option<String>,

        /// Region to plot
        #[arg(short = 'r', long)]
        region: Option<String>,

        /// Hours shown after the run time
        #[arg(long, default_value_t = DEFAULT_HORIZON_HOURS)]
        horizon: u32,

        /// Output path for the HTML page
        #[arg(long, default_value = "rainfall_plot.html")]
        output: PathBuf,

        /// Print the figure JSON to stdout instead of writing HTML
        #[arg(long)]
        json: bool,
    },

    /// List target times, leads and regions available for plotting
    Choices {
        /// Forecast CSV (path or http(s) URL)
        #[arg(short = 'f', long)]
        forecast: Source,

        /// Day to offer target times for (YYYY-MM-DD); defaults to the latest run's day
        #[arg(short = 'd', long)]
        date: Option<String>,
    },

    /// Show the run time that produced a target time at a given lead
    RunTime {
        /// Target valid time, e.g. 2025-07-14T09:00:00
        #[arg(short = 't', long)]
        target: Option<String>,

        /// Lead time in hours (at least 1)
        #[arg(short = 'l', long)]
        lead: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Plot {
            forecast,
            observed,
            target,
            lead,
            region,
            horizon,
            output,
            json,
        } => {
            let inputs = plot::PlotInputs {
                target,
                lead,
                region,
            };
            plot::run_plot(&forecast, &observed, &inputs, horizon, &output, json).await
        }
        Command::Choices { forecast, date } => choices::run_choices(&forecast, date.as_deref()).await,
        Command::RunTime { target, lead } => choices::run_run_time(target.as_deref(), lead.as_deref()),
    }
}

/// The message to show for a failure the user fixes by changing the
/// selection. `None` for load and data failures, which keep their full chain.
pub fn selection_notice(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<ViewerError>()
        .filter(|e| e.is_user_facing())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use hrv_forecast::SelectionIssue;

    #[test]
    fn selection_problems_become_notices() {
        let err = anyhow::Error::from(ViewerError::InvalidSelection(SelectionIssue::MissingRegion));
        assert_eq!(
            selection_notice(&err).as_deref(),
            Some("Select all inputs: no region selected")
        );

        let err = anyhow::Error::from(ViewerError::NoMatchingData {
            region: "A".to_string(),
            run_time: "2025-07-14T06:00:00".to_string(),
        });
        assert_eq!(
            selection_notice(&err).as_deref(),
            Some("No data found for region A at run 2025-07-14T06:00:00")
        );
    }

    #[test]
    fn load_failures_are_not_notices() {
        let err = anyhow::Error::from(ViewerError::TimestampParse("x".to_string()));
        assert!(selection_notice(&err).is_none());

        let err: anyhow::Error = Err::<(), _>(std::io::Error::other("gone"))
            .context("Failed to read forecast")
            .unwrap_err();
        assert!(selection_notice(&err).is_none());
    }
}
