//! Mapping a user's (target time, lead) choice to the forecast run that
//! produced it.

use hrv_forecast::{HourStamp, Result, SelectionIssue, ViewerError};

/// Treat empty and whitespace-only inputs the same as absent ones.
fn present(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}

/// The run whose `lead`-hour forecast is valid at `target_time`.
pub fn resolve_run(target_time: &HourStamp, lead: u32) -> Result<HourStamp> {
    if lead == 0 {
        return Err(ViewerError::InvalidSelection(SelectionIssue::InvalidLead(
            lead.to_string(),
        )));
    }
    target_time.add_hours(-i64::from(lead))
}

/// A target valid time together with a lead of at least one hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSelection {
    target_time: HourStamp,
    lead: u32,
}

impl RunSelection {
    pub fn new(target_time: HourStamp, lead: u32) -> Result<Self> {
        if lead == 0 {
            return Err(ViewerError::InvalidSelection(SelectionIssue::InvalidLead(
                lead.to_string(),
            )));
        }
        Ok(RunSelection { target_time, lead })
    }

    /// Build a selection from raw user inputs, reporting the first missing or
    /// malformed piece.
    pub fn from_inputs(target: Option<&str>, lead: Option<&str>) -> Result<Self> {
        let target = present(target)
            .ok_or(ViewerError::InvalidSelection(SelectionIssue::MissingTarget))?;
        let lead = present(lead).ok_or(ViewerError::InvalidSelection(SelectionIssue::MissingLead))?;

        let target_time = HourStamp::parse(target).map_err(|_| {
            ViewerError::InvalidSelection(SelectionIssue::UnparseableTarget(target.to_string()))
        })?;
        let lead_hours: u32 = lead
            .parse()
            .map_err(|_| ViewerError::InvalidSelection(SelectionIssue::InvalidLead(lead.to_string())))?;
        RunSelection::new(target_time, lead_hours)
    }

    pub fn target_time(&self) -> HourStamp {
        self.target_time
    }

    pub fn lead(&self) -> u32 {
        self.lead
    }

    /// `target_time - lead` hours.
    pub fn run_time(&self) -> Result<HourStamp> {
        resolve_run(&self.target_time, self.lead)
    }
}

/// A complete plot request: which run and which region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub selection: RunSelection,
    pub region: String,
}

impl PlotRequest {
    pub fn new(selection: RunSelection, region: impl Into<String>) -> Self {
        PlotRequest {
            selection,
            region: region.into(),
        }
    }

    /// Validate all three raw inputs. A missing region is reported only once
    /// target and lead are in place.
    pub fn from_inputs(target: Option<&str>, lead: Option<&str>, region: Option<&str>) -> Result<Self> {
        let selection = RunSelection::from_inputs(target, lead)?;
        let region =
            present(region).ok_or(ViewerError::InvalidSelection(SelectionIssue::MissingRegion))?;
        Ok(PlotRequest::new(selection, region))
    }
}
