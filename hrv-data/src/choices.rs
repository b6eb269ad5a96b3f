//! Option lists offered to the user before a plot is requested.

use chrono::NaiveDate;
use hrv_forecast::{ForecastStore, HourStamp};
use serde::Serialize;

/// Longest lead offered in the lead list, in hours.
pub const MAX_LEAD_HOURS: u32 = 18;

/// A selectable value and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// One target time per hour of `date`: value "YYYY-MM-DDTHH:00:00",
/// label "YYYY-MM-DD HH:00".
pub fn target_choices(date: NaiveDate) -> Vec<Choice> {
    (0..24)
        .filter_map(|hour| HourStamp::from_date_hour(date, hour))
        .map(|stamp| Choice {
            value: stamp.canonical(),
            label: stamp.as_naive().format("%Y-%m-%d %H:00").to_string(),
        })
        .collect()
}

/// Leads 1 through [`MAX_LEAD_HOURS`].
pub fn lead_choices() -> Vec<u32> {
    (1..=MAX_LEAD_HOURS).collect()
}

/// Regions found in the forecast data, sorted for display.
pub fn region_choices(forecasts: &ForecastStore) -> Vec<String> {
    forecasts.regions_present().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_four_hourly_targets() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
        let choices = target_choices(date);
        assert_eq!(choices.len(), 24);
        assert_eq!(choices[0].value, "2025-07-14T00:00:00");
        assert_eq!(choices[0].label, "2025-07-14 00:00");
        assert_eq!(choices[23].value, "2025-07-14T23:00:00");
    }

    #[test]
    fn leads_run_from_one_to_eighteen() {
        let leads = lead_choices();
        assert_eq!(leads.first(), Some(&1));
        assert_eq!(leads.last(), Some(&18));
        assert_eq!(leads.len(), 18);
    }

    #[test]
    fn regions_are_sorted_and_distinct() {
        let csv = "\
run_time,lead,valid_time,region,cell_id,lat,lon,rain_in
2025-07-14T06:00:00,1,x,North,c1,0,0,0.1
2025-07-14T06:00:00,1,x,East,c1,0,0,0.1
2025-07-14T06:00:00,2,x,North,c2,0,0,0.1
";
        let store = ForecastStore::load(csv);
        assert_eq!(region_choices(&store), vec!["East", "North"]);
    }
}
