//! The `choices` and `run-time` commands.

use crate::source::{load_forecasts, Source};
use chrono::{Local, NaiveDate};
use hrv_data::choices::{lead_choices, region_choices, target_choices};
use hrv_data::RunSelection;
use hrv_forecast::time::DATE_FORMAT;
use log::info;

/// Print the target times, leads and regions a plot can be requested for.
///
/// Without `--date`, target times are offered for the day of the latest run
/// in the forecast data, or today when the data is empty.
pub async fn run_choices(forecast: &Source, date: Option<&str>) -> anyhow::Result<()> {
    let forecasts = load_forecasts(forecast).await?;
    let day = match date {
        Some(d) => NaiveDate::parse_from_str(d.trim(), DATE_FORMAT)
            .map_err(|e| anyhow::anyhow!("Date {d:?} must be of YYYY-MM-DD format: {e}"))?,
        None => forecasts
            .latest_run_time()
            .map(|run| run.as_naive().date())
            .unwrap_or_else(|| Local::now().naive_local().date()),
    };
    info!("Listing choices for {}", day);

    println!("Target times:");
    for choice in target_choices(day) {
        println!("  {}  ({})", choice.value, choice.label);
    }
    let leads: Vec<String> = lead_choices().iter().map(u32::to_string).collect();
    println!("Leads (hours): {}", leads.join(", "));
    println!("Regions:");
    for region in region_choices(&forecasts) {
        println!("  {region}");
    }
    Ok(())
}

/// Print the run time implied by a target time and lead.
pub fn run_run_time(target: Option<&str>, lead: Option<&str>) -> anyhow::Result<()> {
    let run_time = RunSelection::from_inputs(target, lead)?.run_time()?;
    println!("{run_time}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_time_accepts_valid_inputs() {
        assert!(run_run_time(Some("2025-07-14T09:00:00"), Some("3")).is_ok());
        let run = RunSelection::from_inputs(Some("2025-07-14T09:00:00"), Some("3"))
            .unwrap()
            .run_time()
            .unwrap();
        assert_eq!(run.canonical(), "2025-07-14T06:00:00");

        let overnight = RunSelection::from_inputs(Some("2025-07-15 02:00"), Some("5"))
            .unwrap()
            .run_time()
            .unwrap();
        assert_eq!(overnight.canonical(), "2025-07-14T21:00:00");
    }

    #[test]
    fn run_time_rejects_missing_lead() {
        let err = run_run_time(Some("2025-07-14T09:00:00"), None).unwrap_err();
        assert!(err.to_string().starts_with("Select all inputs"));
    }

    #[tokio::test]
    async fn choices_rejects_bad_date() {
        let dir = std::env::temp_dir().join(format!("hrv-choices-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let forecast = dir.join("forecast.csv");
        std::fs::write(&forecast, "run_time,lead,valid_time,region,cell_id,lat,lon,rain_in\n").unwrap();
        let err = run_choices(&Source::Path(forecast), Some("14/07/2025"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
