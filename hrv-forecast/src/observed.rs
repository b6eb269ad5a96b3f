use crate::error::Result;
use crate::models::SeriesPoint;
use crate::time::HourStamp;
use serde_json::Value;
use std::collections::BTreeMap;

/// Measured rainfall per region, keyed by canonical hour.
///
/// Built once from the observed JSON payload and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedStore {
    regions: BTreeMap<String, BTreeMap<HourStamp, f64>>,
    skipped: usize,
}

impl ObservedStore {
    /// Parse the observed payload: `{ region: { "YYYY-MM-DD HH:MM:SS": value } }`.
    ///
    /// Keys are re-expressed as canonical hours so they compare directly with
    /// forecast valid times. Entries with an unparseable timestamp or a
    /// non-numeric value are skipped and counted. Two raw keys falling in the
    /// same hour keep the larger value.
    ///
    /// # Example JSON
    /// ```text
    /// { "A": { "2025-07-14 06:00:00": 0.0, "2025-07-14 07:00:00": 0.31 } }
    /// ```
    pub fn load(json_data: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, Value>> = serde_json::from_str(json_data)?;

        let mut regions = BTreeMap::new();
        let mut count = 0usize;
        let mut skipped = 0usize;
        for (region, entries) in raw {
            let mut series: BTreeMap<HourStamp, f64> = BTreeMap::new();
            for (timestamp, value) in entries {
                let Ok(stamp) = HourStamp::parse(&timestamp) else {
                    log::debug!("observed: {} has unparseable timestamp {:?}", region, timestamp);
                    skipped += 1;
                    continue;
                };
                let Some(value) = value.as_f64().filter(|v| v.is_finite()) else {
                    skipped += 1;
                    continue;
                };
                if let Some(existing) = series.get_mut(&stamp) {
                    log::debug!(
                        "observed: {} {:?} shares hour {} with an earlier key, keeping max of {} and {}",
                        region,
                        timestamp,
                        stamp,
                        existing,
                        value
                    );
                    *existing = existing.max(value);
                } else {
                    series.insert(stamp, value);
                }
                count += 1;
            }
            if series.is_empty() {
                log::warn!("observed: region {} has no usable observations", region);
            }
            regions.insert(region.trim().to_string(), series);
        }
        log::info!(
            "observed: Loaded {} observations across {} regions, skipped {}",
            count,
            regions.len(),
            skipped
        );
        Ok(ObservedStore { regions, skipped })
    }

    /// The region's observations in ascending time order; empty if the region
    /// was never observed.
    pub fn series_for(&self, region: &str) -> Vec<SeriesPoint> {
        self.regions
            .get(region)
            .map(|series| {
                series
                    .iter()
                    .map(|(time, value)| SeriesPoint::new(*time, *value))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    /// Number of entries dropped during [`ObservedStore::load`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;

    const PAYLOAD: &str = r#"{
        "A": {
            "2025-07-14 08:00:00": 0.4,
            "2025-07-14 06:00:00": 0.1,
            "2025-07-14 07:00:00": 0.25
        },
        "B": { "2025-07-14 06:00:00": 0 }
    }"#;

    #[test]
    fn keys_are_canonical_and_sorted() {
        let store = ObservedStore::load(PAYLOAD).unwrap();
        let series = store.series_for("A");
        let times: Vec<String> = series.iter().map(|p| p.time.canonical()).collect();
        assert_eq!(
            times,
            vec!["2025-07-14T06:00:00", "2025-07-14T07:00:00", "2025-07-14T08:00:00"]
        );
        assert_eq!(series[1].value, 0.25);
        assert_eq!(store.series_for("B")[0].value, 0.0);
    }

    #[test]
    fn absent_region_yields_empty_series() {
        let store = ObservedStore::load(PAYLOAD).unwrap();
        assert!(store.series_for("Z").is_empty());
        assert!(!store.contains_region("Z"));
    }

    #[test]
    fn bad_entries_are_skipped() {
        let payload = r#"{ "A": {
            "2025-07-14 06:00:00": null,
            "sometime": 0.3,
            "2025-07-14 07:00:00": "wet",
            "2025-07-14 08:00:00": 0.6
        } }"#;
        let store = ObservedStore::load(payload).unwrap();
        assert_eq!(store.series_for("A").len(), 1);
        assert_eq!(store.skipped(), 3);
    }

    #[test]
    fn sub_hour_keys_collapse_to_their_hour() {
        let payload = r#"{ "A": { "2025-07-14 06:15:00": 0.2, "2025-07-14 06:45:00": 0.5 } }"#;
        let series = ObservedStore::load(payload).unwrap().series_for("A");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 0.5);
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let err = ObservedStore::load("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ViewerError::ObservedPayload(_)));
    }
}
