//! Plotly figure descriptions for the two rainfall panels.
//!
//! The structs mirror the subset of Plotly's JSON schema the viewer uses, so
//! `serde_json` output can be passed straight to `Plotly.newPlot`.

use hrv_data::window::AxisWindow;
use hrv_data::PlotFrame;
use hrv_forecast::SeriesPoint;
use serde::Serialize;

/// Two-hour tick spacing on the time axis, in milliseconds.
const TIME_TICK_MS: u64 = 2 * 60 * 60 * 1000;

pub const FORECAST_TRACE_NAME: &str = "Max Forecast (All Cells)";
pub const OBSERVED_REF_TRACE_NAME: &str = "Observed (Ref)";
pub const OBSERVED_TRACE_NAME: &str = "Observed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

/// One line on a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub name: String,
    pub line: LineStyle,
}

impl Trace {
    pub fn line(name: &str, points: &[SeriesPoint], line: LineStyle) -> Self {
        Trace {
            x: points.iter().map(|p| p.time.canonical()).collect(),
            y: points.iter().map(|p| p.value).collect(),
            mode: "lines",
            name: name.to_string(),
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeAxis {
    pub title: &'static str,
    pub range: [String; 2],
    pub rangeslider: RangeSlider,
    pub dtick: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub tickformat: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAxis {
    pub title: &'static str,
    pub range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: TimeAxis,
    pub yaxis: ValueAxis,
    pub margin: Margin,
}

impl Layout {
    /// Fixed time window and `[0, ceiling]` value range, identical on both
    /// panels apart from the title.
    pub fn shared(title: String, axis: &AxisWindow) -> Self {
        Layout {
            title,
            xaxis: TimeAxis {
                title: "Valid Time (EDT)",
                range: [axis.start.canonical(), axis.end.canonical()],
                rangeslider: RangeSlider { visible: false },
                dtick: TIME_TICK_MS,
                kind: "date",
                tickformat: "%H:%M\n%b %d",
            },
            yaxis: ValueAxis {
                title: "Rainfall (inches)",
                range: [0.0, axis.value_ceiling],
            },
            margin: Margin { t: 50, b: 80 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// Both panels for one plot request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPanels {
    pub forecast: Figure,
    pub observed: Figure,
}

impl PlotPanels {
    pub fn from_frame(frame: &PlotFrame) -> Self {
        PlotPanels {
            forecast: forecast_figure(frame),
            observed: observed_figure(frame),
        }
    }
}

/// Max forecast line with the observed curve dotted underneath.
pub fn forecast_figure(frame: &PlotFrame) -> Figure {
    Figure {
        data: vec![
            Trace::line(
                FORECAST_TRACE_NAME,
                &frame.forecast_max,
                LineStyle {
                    color: "blue",
                    width: 3,
                    dash: None,
                },
            ),
            Trace::line(
                OBSERVED_REF_TRACE_NAME,
                &frame.observed,
                LineStyle {
                    color: "black",
                    width: 2,
                    dash: Some("dot"),
                },
            ),
        ],
        layout: Layout::shared(format!("HRRR Max Forecast – {}", frame.region), &frame.axis),
    }
}

/// Observed curve alone, on the same axes as the forecast panel.
pub fn observed_figure(frame: &PlotFrame) -> Figure {
    Figure {
        data: vec![Trace::line(
            OBSERVED_TRACE_NAME,
            &frame.observed,
            LineStyle {
                color: "black",
                width: 3,
                dash: None,
            },
        )],
        layout: Layout::shared(format!("Observed Rainfall – {}", frame.region), &frame.axis),
    }
}
