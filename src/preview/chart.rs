//! Line and bar charts over the first array found in the sample.

use serde::Serialize;
use serde_json::Value;

use super::geometry::{
    area_path, bar_layout, format_tooltip, gridlines, label_stride, place_points, smooth_path,
    trend, BarRect, ChartDims, Domain, GridLine, Path, Point, Trend,
};
use super::Mode;
use crate::resolve::{stringify_value, to_number};
use crate::types::{ChartKind, PreviewData};

pub const EMPTY_MESSAGE: &str = "No chart data available.";
const DEFAULT_DATA_KEY: &str = "value";
const DEFAULT_LABEL_KEY: &str = "label";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

/// One plotted datum with everything needed to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlottedPoint {
    pub label: String,
    pub value: f64,
    /// Anchor: the dot for line charts, the bar top centre for bars.
    pub anchor: Point,
    pub label_x: f64,
    pub show_label: bool,
    /// Hover text, full mode only.
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlot {
    pub title: String,
    pub subtitle: Option<String>,
    pub chart_type: ChartKind,
    pub mode: Mode,
    pub dims: ChartDims,
    pub domain: Domain,
    pub points: Vec<PlottedPoint>,
    pub gridlines: Vec<GridLine>,
    pub line_path: Path,
    pub area_path: Path,
    pub bars: Vec<BarRect>,
    /// Line charts only.
    pub trend: Option<Trend>,
    pub label_y: f64,
}

impl ChartPlot {
    /// Hover is only offered in full mode.
    pub fn interactive(&self) -> bool {
        !self.mode.is_compact()
    }

    /// `▲`, or `▲ 12.5%` in full mode.
    pub fn trend_text(&self) -> Option<String> {
        let t = self.trend?;
        Some(if self.mode.is_compact() {
            t.marker().to_string()
        } else {
            format!("{} {}", t.marker(), t.percent_text())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ChartView {
    Empty { title: String, message: String },
    Plot(ChartPlot),
}

/// Map the first non-empty array among the sample's top-level values into
/// `(label, value)` pairs. Missing labels are empty, missing values zero.
pub fn extract_points(doc: &Value, label_key: &str, data_key: &str) -> Vec<DataPoint> {
    let candidates: Vec<&Value> = match doc {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        _ => return Vec::new(),
    };

    let Some(series) = candidates
        .into_iter()
        .filter_map(Value::as_array)
        .find(|a| !a.is_empty())
    else {
        return Vec::new();
    };

    series
        .iter()
        .map(|item| DataPoint {
            label: item
                .get(label_key)
                .filter(|v| !v.is_null())
                .map(stringify_value)
                .unwrap_or_default(),
            value: to_number(item.get(data_key)),
        })
        .collect()
}

pub fn render(data: &PreviewData, mode: Mode) -> ChartView {
    let cfg = &data.preview_config;
    let points = extract_points(
        &data.sample_response,
        cfg.chart_label_key.as_deref().unwrap_or(DEFAULT_LABEL_KEY),
        cfg.chart_data_key.as_deref().unwrap_or(DEFAULT_DATA_KEY),
    );

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let Some(domain) = Domain::of(&values) else {
        return ChartView::Empty {
            title: cfg.title.clone(),
            message: EMPTY_MESSAGE.to_string(),
        };
    };

    let kind = cfg.chart_type.unwrap_or_default();
    let dims = ChartDims::for_mode(mode);
    let stride = label_stride(points.len(), dims.max_labels);
    let positions = place_points(&values, &dims, &domain);

    let (line_path, area, bars) = match kind {
        ChartKind::Line => (
            smooth_path(&positions),
            area_path(&positions, dims.plot_bottom()),
            Vec::new(),
        ),
        ChartKind::Bar => (Path::default(), Path::default(), bar_layout(&values, &dims, &domain)),
    };

    let plotted = points
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let (anchor, label_x) = match bars.get(i) {
                Some(bar) => (Point::new(bar.center_x(), bar.y), bar.center_x()),
                None => (positions[i], positions[i].x),
            };
            PlottedPoint {
                tooltip: (!mode.is_compact()).then(|| format_tooltip(p.value)),
                label: p.label,
                value: p.value,
                anchor,
                label_x,
                show_label: i % stride == 0,
            }
        })
        .collect();

    ChartView::Plot(ChartPlot {
        title: cfg.title.clone(),
        subtitle: cfg.subtitle.clone(),
        chart_type: kind,
        mode,
        gridlines: gridlines(&dims, &domain),
        trend: (kind == ChartKind::Line).then(|| trend(&values)).flatten(),
        label_y: dims.label_y(),
        dims,
        domain,
        points: plotted,
        line_path,
        area_path: area,
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::geometry::PathCmd;
    use crate::types::{PreviewConfig, PreviewType};
    use serde_json::json;

    fn chart(sample: Value, kind: Option<ChartKind>) -> PreviewData {
        PreviewData {
            id: "chart".into(),
            preview_type: PreviewType::Chart,
            sample_response: sample,
            preview_config: PreviewConfig {
                title: "Prices".into(),
                chart_type: kind,
                chart_data_key: Some("price".into()),
                chart_label_key: Some("date".into()),
                ..Default::default()
            },
        }
    }

    fn plot(view: ChartView) -> ChartPlot {
        match view {
            ChartView::Plot(p) => p,
            other => panic!("Expected plot, got {other:?}"),
        }
    }

    #[test]
    fn uses_first_non_empty_array_in_document_order() {
        let doc = json!({
            "meta": {"currency": "usd"},
            "empty": [],
            "prices": [{"date": "Mon", "price": 1}, {"date": "Tue", "price": "2.5"}],
            "later": [{"date": "x", "price": 99}]
        });
        let pts = extract_points(&doc, "date", "price");
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[1].label, "Tue");
        assert_eq!(pts[1].value, 2.5);
    }

    #[test]
    fn missing_keys_coerce_to_blank_and_zero() {
        let pts = extract_points(&json!({"s": [{"other": 1}, 7]}), "label", "value");
        assert_eq!(pts[0].label, "");
        assert_eq!(pts[0].value, 0.0);
        assert_eq!(pts[1].value, 0.0);
    }

    #[test]
    fn no_array_is_empty_state() {
        match render(&chart(json!({"price": 3}), None), Mode::Full) {
            ChartView::Empty { message, .. } => assert_eq!(message, EMPTY_MESSAGE),
            other => panic!("Expected empty, got {other:?}"),
        }
        assert!(matches!(
            render(&chart(json!("text"), None), Mode::Compact),
            ChartView::Empty { .. }
        ));
    }

    #[test]
    fn single_point_line_is_move_only() {
        let p = plot(render(
            &chart(json!({"s": [{"date": "a", "price": 10}]}), None),
            Mode::Full,
        ));
        assert_eq!(p.line_path.commands().len(), 1);
        assert!(matches!(p.line_path.commands()[0], PathCmd::MoveTo(_)));
        assert!(p.area_path.is_empty());
        assert!(p.trend.unwrap().up);
    }

    #[test]
    fn flat_series_sits_on_one_height() {
        let p = plot(render(
            &chart(
                json!({"s": [{"price": 4}, {"price": 4}, {"price": 4}]}),
                Some(ChartKind::Line),
            ),
            Mode::Compact,
        ));
        assert_eq!(p.domain.range, 1.0);
        let y = p.points[0].anchor.y;
        assert!(p.points.iter().all(|pt| pt.anchor.y == y));
    }

    #[test]
    fn tooltips_and_trend_text_follow_mode() {
        let sample = json!({"s": [{"price": 100}, {"price": 150}]});
        let full = plot(render(&chart(sample.clone(), None), Mode::Full));
        assert!(full.interactive());
        assert_eq!(full.points[1].tooltip.as_deref(), Some("150.0"));
        assert_eq!(full.trend_text().as_deref(), Some("\u{25b2} 50.0%"));

        let compact = plot(render(&chart(sample, None), Mode::Compact));
        assert!(!compact.interactive());
        assert!(compact.points.iter().all(|p| p.tooltip.is_none()));
        assert_eq!(compact.trend_text().as_deref(), Some("\u{25b2}"));
    }

    #[test]
    fn bar_chart_has_bars_and_no_trend() {
        let sample = json!({"s": [{"date": "a", "price": 1}, {"date": "b", "price": 3}]});
        let p = plot(render(&chart(sample, Some(ChartKind::Bar)), Mode::Full));
        assert_eq!(p.bars.len(), 2);
        assert!(p.trend.is_none());
        assert!(p.line_path.is_empty());
        assert_eq!(p.points[0].label_x, p.bars[0].center_x());
    }

    #[test]
    fn labels_are_thinned() {
        let items: Vec<Value> = (0..10).map(|i| json!({"date": i, "price": i})).collect();
        let p = plot(render(&chart(json!({ "s": items }), None), Mode::Compact));
        let shown: Vec<_> = p
            .points
            .iter()
            .filter(|pt| pt.show_label)
            .map(|pt| pt.label.as_str())
            .collect();
        assert_eq!(shown, vec!["0", "3", "6", "9"]);
    }
}
