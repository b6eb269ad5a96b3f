//! Standalone HTML output that renders both panels with Plotly.
//!
//! The figures are serialized to JSON and inlined as script literals; the
//! page pulls Plotly from its CDN, so the file can be opened directly.

use crate::figure::{Figure, PlotPanels};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub const FORECAST_CONTAINER_ID: &str = "forecastPlot";
pub const OBSERVED_CONTAINER_ID: &str = "observedPlot";

/// Serialize a figure for embedding inside a `<script>` element.
///
/// `</` is escaped so a region name can never close the script tag early.
fn script_json(figure: &Figure) -> serde_json::Result<(String, String)> {
    let data = serde_json::to_string(&figure.data)?.replace("</", "<\\/");
    let layout = serde_json::to_string(&figure.layout)?.replace("</", "<\\/");
    Ok((data, layout))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn new_plot_call(container_id: &str, figure: &Figure) -> serde_json::Result<String> {
    let (data, layout) = script_json(figure)?;
    Ok(format!(
        "try {{ Plotly.newPlot('{container_id}', {data}, {layout}); }} \
         catch (e) {{ console.error('[HRV] newPlot failed for {container_id}:', e); }}"
    ))
}

/// Build the complete page for one plot request.
pub fn render_page(heading: &str, panels: &PlotPanels) -> serde_json::Result<String> {
    let forecast_call = new_plot_call(FORECAST_CONTAINER_ID, &panels.forecast)?;
    let observed_call = new_plot_call(OBSERVED_CONTAINER_ID, &panels.observed)?;
    let heading = escape_html(heading);
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{heading}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body style="max-width: 1000px; margin: 0 auto; font-family: system-ui, -apple-system, sans-serif;">
<h2>{heading}</h2>
<div id="{FORECAST_CONTAINER_ID}" style="min-height: 450px;"></div>
<div id="{OBSERVED_CONTAINER_ID}" style="min-height: 450px;"></div>
<script>
{forecast_call}
{observed_call}
</script>
</body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Layout, LineStyle, Trace};
    use hrv_data::window::{plan_window, AxisWindow};
    use hrv_forecast::{HourStamp, SeriesPoint};

    fn panels(region: &str) -> PlotPanels {
        let run = HourStamp::parse("2025-07-14T06:00:00").unwrap();
        let axis = AxisWindow::new(plan_window(&run, 19).unwrap(), 2.0);
        let points = vec![SeriesPoint::new(run.add_hours(3).unwrap(), 1.2)];
        let style = LineStyle {
            color: "blue",
            width: 3,
            dash: None,
        };
        let figure = Figure {
            data: vec![Trace::line("Max Forecast (All Cells)", &points, style)],
            layout: Layout::shared(format!("HRRR Max Forecast – {region}"), &axis),
        };
        PlotPanels {
            forecast: figure.clone(),
            observed: figure,
        }
    }

    #[test]
    fn page_contains_both_containers_and_calls() {
        let html = render_page("Region A", &panels("A")).unwrap();
        assert!(html.contains(r#"<div id="forecastPlot""#));
        assert!(html.contains(r#"<div id="observedPlot""#));
        assert!(html.contains("Plotly.newPlot('forecastPlot'"));
        assert!(html.contains("Plotly.newPlot('observedPlot'"));
        assert!(html.contains("\"2025-07-14T09:00:00\""));
        assert!(html.contains(PLOTLY_CDN));
    }

    #[test]
    fn region_text_cannot_break_out_of_script() {
        let html = render_page("<b>x</b>", &panels("</script><script>alert(1)")).unwrap();
        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
