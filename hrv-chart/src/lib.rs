//! Presentation adapter for the rainfall viewer.
//!
//! This crate provides:
//! - `figure`: Plotly figure descriptions for the forecast and observed panels
//! - `page`: a standalone HTML page that draws both panels

pub mod figure;
pub mod page;

pub use figure::{forecast_figure, observed_figure, Figure, PlotPanels};
pub use page::render_page;
