use crate::error::{Result, ViewerError};
use crate::time::HourStamp;
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// Minimum number of comma-separated fields in a usable forecast row.
pub const FORECAST_MIN_FIELDS: usize = 8;

/// Column positions in the forecast CSV.
pub const RUN_TIME_COLUMN: usize = 0;
pub const LEAD_COLUMN: usize = 1;
pub const REGION_COLUMN: usize = 3;
pub const CELL_ID_COLUMN: usize = 4;
pub const RAIN_COLUMN: usize = 7;

/// One grid cell's rainfall prediction from one forecast run.
///
/// `valid_time` is always `run_time + lead` hours; it is computed in
/// [`ForecastRecord::new`] and cannot be set any other way. A missing or
/// unparseable rain amount is carried as `None` and never aggregated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRecord {
    run_time: HourStamp,
    lead: u32,
    valid_time: HourStamp,
    region: String,
    cell_id: String,
    /// Predicted rainfall in inches
    rain: Option<f64>,
}

impl ForecastRecord {
    pub fn new(
        run_time: HourStamp,
        lead: u32,
        region: impl Into<String>,
        cell_id: impl Into<String>,
        rain: Option<f64>,
    ) -> Result<Self> {
        let valid_time = run_time.add_hours(i64::from(lead))?;
        Ok(ForecastRecord {
            run_time,
            lead,
            valid_time,
            region: region.into(),
            cell_id: cell_id.into(),
            rain: rain.filter(|v| v.is_finite()),
        })
    }

    pub fn run_time(&self) -> HourStamp {
        self.run_time
    }

    pub fn lead(&self) -> u32 {
        self.lead
    }

    pub fn valid_time(&self) -> HourStamp {
        self.valid_time
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn cell_id(&self) -> &str {
        &self.cell_id
    }

    pub fn rain(&self) -> Option<f64> {
        self.rain
    }
}

impl TryFrom<&StringRecord> for ForecastRecord {
    type Error = ViewerError;

    fn try_from(value: &StringRecord) -> Result<Self> {
        if value.len() < FORECAST_MIN_FIELDS {
            return Err(ViewerError::MalformedRow {
                line: value.position().map_or(0, |p| p.line()),
                found: value.len(),
                needed: FORECAST_MIN_FIELDS,
            });
        }
        let field = |i: usize| value.get(i).unwrap_or("").trim();
        let run_time = HourStamp::parse(field(RUN_TIME_COLUMN))?;
        let lead: u32 = field(LEAD_COLUMN)
            .parse()
            .map_err(|_| ViewerError::MalformedRow {
                line: value.position().map_or(0, |p| p.line()),
                found: value.len(),
                needed: FORECAST_MIN_FIELDS,
            })?;
        let rain = field(RAIN_COLUMN).parse::<f64>().ok();
        ForecastRecord::new(
            run_time,
            lead,
            field(REGION_COLUMN),
            field(CELL_ID_COLUMN),
            rain,
        )
    }
}

/// Every forecast record loaded for the session.
///
/// Populated once from the forecast CSV and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ForecastStore {
    records: Vec<ForecastRecord>,
    skipped: usize,
}

impl ForecastStore {
    /// Parse forecast CSV text, skipping the header line.
    ///
    /// Lines are split on commas only; quotes carry no meaning, so a stray
    /// quote spoils its own row and nothing after it.
    ///
    /// Expected columns: `run_time,lead,_,region,cell_id,_,_,rain[,...]`.
    /// Rows with fewer than eight fields, or whose run time or lead cannot be
    /// read, are skipped and counted; they never abort the load.
    ///
    /// # Example CSV
    /// ```text
    /// run_time,lead,valid_time,region,cell_id,lat,lon,rain_in
    /// 2025-07-14 06:00:00,3,2025-07-14 09:00:00,A,c1,40.1,-74.2,0.5
    /// ```
    pub fn load(csv_data: &str) -> Self {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(csv_data.as_bytes());

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    log::debug!("forecast: unreadable row skipped: {}", e);
                    skipped += 1;
                    continue;
                }
            };
            match ForecastRecord::try_from(&record) {
                Ok(r) => records.push(r),
                Err(e) => {
                    log::debug!("forecast: row skipped: {}", e);
                    skipped += 1;
                }
            }
        }
        log::info!(
            "forecast: Loaded {} records, skipped {} malformed rows",
            records.len(),
            skipped
        );
        ForecastStore { records, skipped }
    }

    /// Distinct regions present in the forecast data.
    pub fn regions_present(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.region.clone()).collect()
    }

    /// Records for exactly this region and run time. Empty when nothing matches.
    pub fn filter(&self, region: &str, run_time: &HourStamp) -> Vec<&ForecastRecord> {
        self.records
            .iter()
            .filter(|r| r.region == region && r.run_time == *run_time)
            .collect()
    }

    /// Most recent run time in the data, if any records were loaded.
    pub fn latest_run_time(&self) -> Option<HourStamp> {
        self.records.iter().map(|r| r.run_time).max()
    }

    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    /// Number of rows dropped during [`ForecastStore::load`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
