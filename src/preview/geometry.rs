//! Chart geometry: value domain, point placement, smoothed paths, bar
//! layout, gridlines and label thinning.
//!
//! Coordinates are in a virtual canvas with the origin at the top-left and
//! y growing downward. Renderers scale them to whatever surface they draw on.

use serde::{Serialize, Serializer};
use std::fmt::Write as _;

use super::Mode;
use crate::resolve::number_text;

/// Fixed canvas dimensions for one rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartDims {
    pub width: f64,
    pub height: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub bar_gap: f64,
    pub max_labels: usize,
}

impl ChartDims {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Compact => Self {
                width: 280.0,
                height: 100.0,
                pad_top: 10.0,
                pad_bottom: 20.0,
                pad_left: 8.0,
                pad_right: 8.0,
                bar_gap: 3.0,
                max_labels: 4,
            },
            Mode::Full => Self {
                width: 520.0,
                height: 220.0,
                pad_top: 24.0,
                pad_bottom: 36.0,
                pad_left: 12.0,
                pad_right: 12.0,
                bar_gap: 6.0,
                max_labels: 8,
            },
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - self.pad_left - self.pad_right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.pad_top - self.pad_bottom
    }

    /// y of the plot's bottom edge.
    pub fn plot_bottom(&self) -> f64 {
        self.pad_top + self.plot_height()
    }

    /// Baseline for x-axis labels.
    pub fn label_y(&self) -> f64 {
        self.height - 4.0
    }
}

/// Value domain of a series. `range` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl Domain {
    /// `None` for an empty series.
    pub fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let (min, max) = values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Self::from_bounds(min, max))
    }

    pub fn from_bounds(min: f64, max: f64) -> Self {
        let span = max - min;
        let range = if span == 0.0 || !span.is_finite() { 1.0 } else { span };
        Self { min, max, range }
    }

    /// Position of `v` within the domain, 0 at min.
    pub fn normalize(&self, v: f64) -> f64 {
        (v - self.min) / self.range
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Evenly spread points across the plot; larger values sit higher.
/// A lone point sits on the left edge.
pub fn place_points(values: &[f64], dims: &ChartDims, domain: &Domain) -> Vec<Point> {
    let steps = values.len().saturating_sub(1).max(1) as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Point::new(
                dims.pad_left + (i as f64 / steps) * dims.plot_width(),
                dims.pad_top + (1.0 - domain.normalize(v)) * dims.plot_height(),
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    QuadTo { ctrl: Point, to: Point },
    LineTo(Point),
    Close,
}

/// Sequence of drawing commands. Serializes as SVG path data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path(pub Vec<PathCmd>);

impl Path {
    pub fn commands(&self) -> &[PathCmd] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for cmd in &self.0 {
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = match cmd {
                PathCmd::MoveTo(p) => write!(d, "M {} {}", n(p.x), n(p.y)),
                PathCmd::QuadTo { ctrl, to } => write!(
                    d,
                    "Q {} {} {} {}",
                    n(ctrl.x),
                    n(ctrl.y),
                    n(to.x),
                    n(to.y)
                ),
                PathCmd::LineTo(p) => write!(d, "L {} {}", n(p.x), n(p.y)),
                PathCmd::Close => write!(d, "Z"),
            };
        }
        d
    }

    /// Approximate the path with straight segments, `steps` per curve.
    /// `Close` returns to the last `MoveTo`.
    pub fn flatten(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        let mut out = Vec::new();
        let mut start = None;
        for cmd in &self.0 {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    start = Some(p);
                    out.push(p);
                }
                PathCmd::LineTo(p) => out.push(p),
                PathCmd::QuadTo { ctrl, to } => {
                    let Some(&from) = out.last() else {
                        out.push(to);
                        continue;
                    };
                    for s in 1..=steps {
                        let t = s as f64 / steps as f64;
                        let mt = 1.0 - t;
                        out.push(Point::new(
                            mt * mt * from.x + 2.0 * mt * t * ctrl.x + t * t * to.x,
                            mt * mt * from.y + 2.0 * mt * t * ctrl.y + t * t * to.y,
                        ));
                    }
                }
                PathCmd::Close => {
                    if let Some(p) = start {
                        out.push(p);
                    }
                }
            }
        }
        out
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_svg())
    }
}

fn n(v: f64) -> String {
    number_text(v)
}

/// Curve through the midpoints of consecutive points, anchored at each
/// original point, ending exactly on the last point.
pub fn smooth_path(points: &[Point]) -> Path {
    let Some(&first) = points.first() else {
        return Path::default();
    };
    let mut cmds = vec![PathCmd::MoveTo(first)];
    if points.len() == 1 {
        return Path(cmds);
    }

    for pair in points.windows(2) {
        let (cur, next) = (pair[0], pair[1]);
        cmds.push(PathCmd::QuadTo {
            ctrl: cur,
            to: Point::new((cur.x + next.x) / 2.0, (cur.y + next.y) / 2.0),
        });
    }

    let last = points[points.len() - 1];
    let second_last = points[points.len() - 2];
    cmds.push(PathCmd::QuadTo {
        ctrl: Point::new(second_last.x + (last.x - second_last.x) / 2.0, last.y),
        to: last,
    });
    Path(cmds)
}

/// The smoothed line closed along `bottom`. Empty for fewer than two points.
pub fn area_path(points: &[Point], bottom: f64) -> Path {
    if points.len() < 2 {
        return Path::default();
    }
    let Path(mut cmds) = smooth_path(points);
    let first = points[0];
    let last = points[points.len() - 1];
    cmds.push(PathCmd::LineTo(Point::new(last.x, bottom)));
    cmds.push(PathCmd::LineTo(Point::new(first.x, bottom)));
    cmds.push(PathCmd::Close);
    Path(cmds)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl BarRect {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Evenly spaced bars centred as a group. Every bar is at least 2 units
/// tall and at least 8 wide.
pub fn bar_layout(values: &[f64], dims: &ChartDims, domain: &Domain) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }
    let count = values.len() as f64;
    let gap = dims.bar_gap;
    let width = ((dims.plot_width() - gap * (count - 1.0)) / count).max(8.0);
    let total = width * count + gap * (count - 1.0);
    let offset_x = dims.pad_left + (dims.plot_width() - total) / 2.0;
    let radius = (width / 2.0).min(4.0);

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let height = (domain.normalize(v) * dims.plot_height()).max(2.0);
            BarRect {
                x: offset_x + i as f64 * (width + gap),
                y: dims.plot_bottom() - height,
                width,
                height,
                radius,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub y: f64,
    pub value: f64,
}

pub const GRID_LINES: usize = 4;

/// Horizontal reference lines from the top of the plot to its bottom,
/// each carrying the domain value at that height.
pub fn gridlines(dims: &ChartDims, domain: &Domain) -> Vec<GridLine> {
    (0..GRID_LINES)
        .map(|i| {
            let ratio = i as f64 / (GRID_LINES - 1) as f64;
            GridLine {
                y: dims.pad_top + ratio * dims.plot_height(),
                value: domain.max - ratio * domain.range,
            }
        })
        .collect()
}

/// Show a label every `stride` points so at most `max_labels` are drawn.
pub fn label_stride(count: usize, max_labels: usize) -> usize {
    count.div_ceil(max_labels.max(1)).max(1)
}

/// Tooltip text for a data value.
pub fn format_tooltip(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else if v > 0.0 && v < 1.0 {
        format!("{v:.3}")
    } else {
        format!("{v:.1}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub up: bool,
    /// Absolute change from first to last value, in percent.
    pub percent: f64,
}

impl Trend {
    pub fn marker(&self) -> &'static str {
        if self.up {
            "\u{25b2}"
        } else {
            "\u{25bc}"
        }
    }

    pub fn percent_text(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

/// Last versus first value. A zero first value divides by 1 instead.
pub fn trend(values: &[f64]) -> Option<Trend> {
    let first = *values.first()?;
    let last = *values.last()?;
    let divisor = if first == 0.0 { 1.0 } else { first };
    Some(Trend {
        up: last >= first,
        percent: ((last - first) / divisor * 100.0).abs(),
    })
}
