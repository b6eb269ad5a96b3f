/// Error types for the forecast viewer library
use thiserror::Error;

/// Why a plot selection cannot be acted on yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionIssue {
    MissingTarget,
    UnparseableTarget(String),
    MissingLead,
    InvalidLead(String),
    MissingRegion,
}

impl std::fmt::Display for SelectionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionIssue::MissingTarget => write!(f, "no target time selected"),
            SelectionIssue::UnparseableTarget(raw) => write!(f, "target time {raw:?} is not a timestamp"),
            SelectionIssue::MissingLead => write!(f, "no lead time selected"),
            SelectionIssue::InvalidLead(raw) => {
                write!(f, "lead {raw:?} must be a whole number of hours of at least 1")
            }
            SelectionIssue::MissingRegion => write!(f, "no region selected"),
        }
    }
}

/// Main error type for forecast viewer operations
#[derive(Error, Debug)]
pub enum ViewerError {
    /// A forecast row has too few fields to be interpreted
    #[error("Malformed row {line}: found {found} fields, need at least {needed}")]
    MalformedRow {
        line: u64,
        found: usize,
        needed: usize,
    },

    /// Date/time parsing failed
    #[error("Failed to parse timestamp: {0:?}")]
    TimestampParse(String),

    /// Hour arithmetic left chrono's representable range
    #[error("Offset of {0} hours is outside the supported calendar range")]
    OutOfRange(i64),

    /// The user's selection is incomplete or malformed
    #[error("Select all inputs: {0}")]
    InvalidSelection(SelectionIssue),

    /// A valid selection matched no forecast records
    #[error("No data found for region {region} at run {run_time}")]
    NoMatchingData { region: String, run_time: String },

    /// The observed payload is not the expected JSON shape
    #[error("Failed to parse observed payload: {0}")]
    ObservedPayload(#[from] serde_json::Error),
}

impl ViewerError {
    /// True for conditions the user resolves by changing the selection,
    /// as opposed to data or load failures.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ViewerError::InvalidSelection(_) | ViewerError::NoMatchingData { .. }
        )
    }
}

/// Type alias for Results using ViewerError
pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_selection_asks_for_all_inputs() {
        let err = ViewerError::InvalidSelection(SelectionIssue::MissingRegion);
        assert_eq!(err.to_string(), "Select all inputs: no region selected");
        assert!(err.is_user_facing());
    }

    #[test]
    fn no_matching_data_is_distinct_from_invalid_selection() {
        let err = ViewerError::NoMatchingData {
            region: "A".to_string(),
            run_time: "2025-07-14T06:00:00".to_string(),
        };
        assert!(err.is_user_facing());
        assert!(!matches!(err, ViewerError::InvalidSelection(_)));
        assert!(err.to_string().starts_with("No data found"));
    }

    #[test]
    fn parse_failures_are_not_user_facing() {
        assert!(!ViewerError::TimestampParse("x".to_string()).is_user_facing());
        assert!(!ViewerError::OutOfRange(1).is_user_facing());
    }
}
