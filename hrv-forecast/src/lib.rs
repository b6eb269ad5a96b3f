//! Core types for the HRRR rainfall viewer: the hour-granularity time codec,
//! the forecast record store and the observed series store.

pub mod error;
pub mod forecast;
pub mod models;
pub mod observed;
pub mod time;

pub use error::{Result, SelectionIssue, ViewerError};
pub use forecast::{ForecastRecord, ForecastStore};
pub use models::SeriesPoint;
pub use observed::ObservedStore;
pub use time::HourStamp;
