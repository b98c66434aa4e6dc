//! Draws a `PreviewView` into a terminal rect.
//!
//! Chart and map geometry is computed in SVG-style units (y down); the
//! canvas has y up, so every y is flipped against the view height.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points, Rectangle},
        Bar, BarChart, BarGroup, Block, List, ListItem, Paragraph, Wrap,
    },
    Frame,
};

use crate::highlight::to_line;
use crate::preview::card::CardView;
use crate::preview::chart::{ChartPlot, ChartView};
use crate::preview::code::CodeView;
use crate::preview::list::ListView;
use crate::preview::map::MapView;
use crate::preview::media::{ImageLoad, MediaView};
use crate::preview::weather::WeatherView;
use crate::preview::{Mode, PreviewView};
use crate::types::ChartKind;
use crate::theme::ColorScheme;

/// Interaction state the drawing needs besides the view itself.
pub struct PreviewCtx<'a> {
    pub theme: &'a ColorScheme,
    pub hover: Option<usize>,
    pub image: &'a ImageLoad,
}

pub fn draw_preview(f: &mut Frame, area: Rect, view: &PreviewView, ctx: &PreviewCtx) {
    match view {
        PreviewView::Weather(v) => weather(f, area, v, ctx),
        PreviewView::Map(v) => map(f, area, v, ctx),
        PreviewView::Chart(v) => chart(f, area, v, ctx),
        PreviewView::List(v) => list(f, area, v, ctx),
        PreviewView::Media(v) => media(f, area, v, ctx),
        PreviewView::Code(v) => code(f, area, v, ctx),
        PreviewView::Card(v) => card(f, area, v, ctx),
    }
}

fn title_line(title: &str, ctx: &PreviewCtx) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(ctx.theme.text).add_modifier(Modifier::BOLD),
    ))
}

fn dim(text: impl Into<String>, ctx: &PreviewCtx) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(ctx.theme.text_dim))
}

fn placeholder(f: &mut Frame, area: Rect, title: &str, message: &str, ctx: &PreviewCtx) {
    let lines = vec![title_line(title, ctx), Line::default(), Line::from(dim(message, ctx))];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

// ===============================
// Weather
// ===============================
fn weather(f: &mut Frame, area: Rect, v: &WeatherView, ctx: &PreviewCtx) {
    let mut lines = vec![
        title_line(&v.title, ctx),
        Line::from(vec![
            Span::raw(format!("{} ", v.icon)),
            Span::styled(
                v.headline(),
                Style::default().fg(ctx.theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            dim(v.description.clone(), ctx),
        ]),
    ];
    let mut stats = Vec::new();
    if let Some(h) = &v.humidity {
        stats.push(dim(format!("Humidity {h}"), ctx));
    }
    if let Some(w) = &v.wind {
        if !stats.is_empty() {
            stats.push(Span::raw("  "));
        }
        stats.push(dim(format!("Wind {w}"), ctx));
    }
    if !stats.is_empty() {
        lines.push(Line::from(stats));
    }

    let [top, bottom] =
        Layout::vertical([Constraint::Length(lines.len() as u16), Constraint::Min(0)]).areas(area);
    f.render_widget(Paragraph::new(lines), top);

    if v.forecast.is_empty() || bottom.height < 3 {
        return;
    }

    let bars: Vec<Bar> = v
        .forecast
        .iter()
        .map(|b| {
            let color = if b.today { ctx.theme.chart.today } else { ctx.theme.chart.bar };
            Bar::default()
                .value(b.height.round() as u64)
                .label(Line::from(b.day.clone()))
                .text_value(b.temperature_label.clone().unwrap_or_default())
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(ctx.theme.selection_fg).bg(color))
        })
        .collect();

    let n = v.forecast.len() as u16;
    let bar_width = (bottom.width / n.max(1)).saturating_sub(1).clamp(1, 7);
    let mut block = Block::default();
    if let Some(header) = v.forecast_header() {
        block = block.title(Span::styled(header, Style::default().fg(ctx.theme.text_dim)));
    }
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(v.max_bar_height.round() as u64);
    f.render_widget(chart, bottom);
}

// ===============================
// Map
// ===============================
fn map(f: &mut Frame, area: Rect, v: &MapView, ctx: &PreviewCtx) {
    let mut info = vec![
        title_line(&v.title, ctx),
        Line::from(Span::styled(
            format!("\u{1f4cd} {}", v.place),
            Style::default().fg(ctx.theme.text),
        )),
    ];
    if let Some((lat, lon)) = &v.coords {
        info.push(Line::from(dim(format!("{lat}, {lon}"), ctx)));
    }
    for field in &v.fields {
        info.push(Line::from(vec![
            dim(format!("{}: ", field.label), ctx),
            Span::raw(field.value.clone()),
        ]));
    }

    let [canvas_area, info_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(info.len() as u16)]).areas(area);

    let theme = ctx.theme;
    let (px, py) = (v.pin.x, 1.0 - v.pin.y);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(move |c| {
            for i in 1..4 {
                let t = i as f64 / 4.0;
                c.draw(&CanvasLine {
                    x1: 0.0,
                    y1: t,
                    x2: 1.0,
                    y2: t,
                    color: theme.chart.grid,
                });
                c.draw(&CanvasLine {
                    x1: t,
                    y1: 0.0,
                    x2: t,
                    y2: 1.0,
                    color: theme.chart.grid,
                });
            }
            c.draw(&Circle {
                x: px,
                y: py,
                radius: 0.06,
                color: theme.chart.pin,
            });
            c.draw(&Points {
                coords: &[(px, py)],
                color: theme.chart.pin,
            });
        });
    f.render_widget(canvas, canvas_area);
    f.render_widget(Paragraph::new(info), info_area);
}

// ===============================
// Chart
// ===============================
fn chart(f: &mut Frame, area: Rect, v: &ChartView, ctx: &PreviewCtx) {
    match v {
        ChartView::Empty { title, message } => placeholder(f, area, title, message, ctx),
        ChartView::Plot(p) => plot(f, area, p, ctx),
    }
}

fn plot(f: &mut Frame, area: Rect, p: &ChartPlot, ctx: &PreviewCtx) {
    let theme = ctx.theme;
    let mut header = vec![Span::styled(
        p.title.clone(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )];
    if let (Some(text), Some(t)) = (p.trend_text(), p.trend) {
        let color = if t.up { theme.chart.up } else { theme.chart.down };
        header.push(Span::raw("  "));
        header.push(Span::styled(text, Style::default().fg(color)));
    }
    let hovered = ctx.hover.filter(|_| p.interactive()).and_then(|i| p.points.get(i));
    if let Some(pt) = hovered {
        header.push(Span::raw("  "));
        header.push(Span::styled(
            format!("{}: {}", pt.label, pt.tooltip.clone().unwrap_or_default()),
            Style::default().fg(theme.badge),
        ));
    }

    let mut rows = vec![Constraint::Length(1)];
    if p.subtitle.is_some() && p.mode == Mode::Full {
        rows.push(Constraint::Length(1));
    }
    rows.push(Constraint::Min(3));
    let chunks = Layout::vertical(rows).split(area);
    f.render_widget(Paragraph::new(Line::from(header)), chunks[0]);
    if chunks.len() == 3 {
        let sub = p.subtitle.clone().unwrap_or_default();
        f.render_widget(Paragraph::new(Line::from(dim(sub, ctx))), chunks[1]);
    }
    let canvas_area = chunks[chunks.len() - 1];

    let h = p.dims.height;
    let hover_idx = hovered.map(|_| ctx.hover.unwrap_or_default());
    let line_pts = p.line_path.flatten(8);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, p.dims.width])
        .y_bounds([0.0, h])
        .paint(|c| {
            for g in &p.gridlines {
                c.draw(&CanvasLine {
                    x1: p.dims.pad_left,
                    y1: h - g.y,
                    x2: p.dims.width - p.dims.pad_right,
                    y2: h - g.y,
                    color: theme.chart.grid,
                });
            }
            match p.chart_type {
                ChartKind::Line => {
                    for seg in line_pts.windows(2) {
                        c.draw(&CanvasLine {
                            x1: seg[0].x,
                            y1: h - seg[0].y,
                            x2: seg[1].x,
                            y2: h - seg[1].y,
                            color: theme.chart.line,
                        });
                    }
                    let dots: Vec<(f64, f64)> =
                        p.points.iter().map(|pt| (pt.anchor.x, h - pt.anchor.y)).collect();
                    c.draw(&Points {
                        coords: &dots,
                        color: theme.chart.line,
                    });
                }
                ChartKind::Bar => {
                    for (i, b) in p.bars.iter().enumerate() {
                        let color = if hover_idx == Some(i) { theme.badge } else { theme.chart.bar };
                        c.draw(&Rectangle {
                            x: b.x,
                            y: h - (b.y + b.height),
                            width: b.width,
                            height: b.height,
                            color,
                        });
                    }
                }
            }
            if let Some(pt) = hovered {
                c.draw(&Circle {
                    x: pt.anchor.x,
                    y: h - pt.anchor.y,
                    radius: p.dims.width / 80.0,
                    color: theme.badge,
                });
            }
            for pt in p.points.iter().filter(|pt| pt.show_label) {
                let half = pt.label.chars().count() as f64 * p.dims.width / 160.0;
                c.print(
                    (pt.label_x - half).max(0.0),
                    h - p.label_y,
                    Span::styled(pt.label.clone(), Style::default().fg(theme.text_dim)),
                );
            }
        });
    f.render_widget(canvas, canvas_area);
}

// ===============================
// List
// ===============================
fn list(f: &mut Frame, area: Rect, v: &ListView, ctx: &PreviewCtx) {
    let (title, count_label, rows, more) = match v {
        ListView::Empty { title, message } => return placeholder(f, area, title, message, ctx),
        ListView::Rows {
            title,
            count_label,
            rows,
            more,
            ..
        } => (title, count_label, rows, more),
    };

    let mut header = vec![Span::styled(
        title.clone(),
        Style::default().fg(ctx.theme.text).add_modifier(Modifier::BOLD),
    )];
    if let Some(count) = count_label {
        header.push(Span::raw("  "));
        header.push(dim(count.clone(), ctx));
    }

    let mut items: Vec<ListItem> = rows
        .iter()
        .map(|r| {
            let mut spans = Vec::new();
            if r.image.is_some() {
                spans.push(Span::raw("\u{25aa} "));
            }
            spans.push(Span::styled(r.primary.clone(), Style::default().fg(ctx.theme.text)));
            if let Some(badge) = &r.badge {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("[{badge}]"),
                    Style::default().fg(ctx.theme.badge),
                ));
            }
            let mut lines = vec![Line::from(spans)];
            if let Some(sec) = &r.secondary {
                lines.push(Line::from(vec![Span::raw("  "), dim(sec.clone(), ctx)]));
            }
            ListItem::new(lines)
        })
        .collect();
    if let Some(n) = more {
        items.push(ListItem::new(Line::from(dim(ListView::more_text(*n), ctx))));
    }

    let [head, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    f.render_widget(Paragraph::new(Line::from(header)), head);
    f.render_widget(List::new(items), body);
}

// ===============================
// Media
// ===============================
fn media(f: &mut Frame, area: Rect, v: &MediaView, ctx: &PreviewCtx) {
    let mut lines = vec![title_line(&v.title, ctx)];
    if let Some(sub) = &v.subtitle {
        lines.push(Line::from(dim(sub.clone(), ctx)));
    }
    lines.push(Line::default());
    match &v.image {
        Some(url) => {
            let loaded = ctx.image.url() == Some(url.as_str()) && ctx.image.is_loaded();
            let (marker, color) = if loaded {
                ("\u{25a3} ", ctx.theme.text)
            } else {
                ("\u{25cc} ", ctx.theme.text_dim)
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(color)),
                Span::styled(url.clone(), Style::default().fg(ctx.theme.badge)),
            ]));
        }
        None => lines.push(Line::from(dim(v.missing_text(), ctx))),
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

// ===============================
// Code
// ===============================
fn code(f: &mut Frame, area: Rect, v: &CodeView, ctx: &PreviewCtx) {
    let mut lines = vec![title_line(&v.title, ctx)];
    let width = v.total_lines.to_string().len();
    for l in &v.lines {
        let mut spans = Vec::new();
        if v.line_numbers {
            spans.push(dim(format!("{:>width$} \u{2502} ", l.number), ctx));
        }
        spans.extend(to_line(&l.tokens).spans);
        lines.push(Line::from(spans));
    }
    if v.truncated {
        lines.push(Line::from(dim("\u{2026}", ctx)));
    }
    f.render_widget(Paragraph::new(lines), area);
}

// ===============================
// Card
// ===============================
fn card(f: &mut Frame, area: Rect, v: &CardView, ctx: &PreviewCtx) {
    let lines = match v {
        CardView::Joke {
            setup,
            delivery,
            footnote,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(setup.clone(), Style::default().fg(ctx.theme.text))),
                Line::default(),
                Line::from(Span::styled(
                    delivery.clone(),
                    Style::default().fg(ctx.theme.badge).add_modifier(Modifier::BOLD),
                )),
            ];
            if let Some(note) = footnote {
                lines.push(Line::default());
                lines.push(Line::from(dim(note.clone(), ctx)));
            }
            lines
        }
        CardView::Fields {
            title,
            subtitle,
            image,
            fields,
            fallback,
        } => {
            let mut lines = vec![title_line(title, ctx)];
            if let Some(sub) = subtitle {
                lines.push(Line::from(dim(sub.clone(), ctx)));
            }
            if let Some(url) = image {
                lines.push(Line::from(vec![
                    Span::raw("\u{25aa} "),
                    Span::styled(url.clone(), Style::default().fg(ctx.theme.badge)),
                ]));
            }
            let label_w = fields.iter().map(|fl| fl.label.chars().count()).max().unwrap_or(0);
            for fl in fields {
                lines.push(Line::from(vec![
                    dim(format!("{:<label_w$}  ", fl.label), ctx),
                    Span::styled(fl.value.clone(), Style::default().fg(ctx.theme.text)),
                ]));
            }
            if let Some(msg) = fallback {
                lines.push(Line::from(dim(msg.clone(), ctx)));
            }
            lines
        }
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{render, PreviewOptions};
    use crate::types::{PreviewConfig, PreviewData, PreviewType};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn draw(data: &PreviewData, mode: Mode, hover: Option<usize>) -> String {
        let view = render(data, mode, &PreviewOptions::default());
        let theme = ColorScheme::default();
        let image = ImageLoad::default();
        let ctx = PreviewCtx {
            theme: &theme,
            hover,
            image: &image,
        };
        let mut term = Terminal::new(TestBackend::new(60, 16)).unwrap();
        term.draw(|f| draw_preview(f, f.area(), &view, &ctx)).unwrap();
        let buf = term.backend().buffer().clone();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn data(kind: PreviewType, sample: serde_json::Value, cfg: PreviewConfig) -> PreviewData {
        PreviewData {
            id: "t".into(),
            preview_type: kind,
            sample_response: sample,
            preview_config: cfg,
        }
    }

    #[test]
    fn joke_card_draws_both_parts() {
        let d = data(
            PreviewType::Card,
            json!({"type": "twopart", "setup": "Why?", "delivery": "Because."}),
            PreviewConfig::default(),
        );
        let screen = draw(&d, Mode::Full, None);
        assert!(screen.contains("Why?"));
        assert!(screen.contains("Because."));
    }

    #[test]
    fn empty_chart_draws_message() {
        let d = data(
            PreviewType::Chart,
            json!({"x": 1}),
            PreviewConfig {
                title: "Prices".into(),
                ..Default::default()
            },
        );
        assert!(draw(&d, Mode::Compact, None).contains("No chart data available."));
    }

    #[test]
    fn hovered_point_shows_tooltip() {
        let d = data(
            PreviewType::Chart,
            json!({"s": [{"label": "Mon", "value": 1}, {"label": "Tue", "value": 2500}]}),
            PreviewConfig {
                title: "Load".into(),
                ..Default::default()
            },
        );
        let screen = draw(&d, Mode::Full, Some(1));
        assert!(screen.contains("Tue: 2.5K"), "{screen}");
    }

    #[test]
    fn code_view_numbers_lines() {
        let d = data(PreviewType::Code, json!({"a": 1}), PreviewConfig::default());
        let screen = draw(&d, Mode::Full, None);
        assert!(screen.contains("1 \u{2502} {"));
        assert!(screen.contains("\"a\": 1"));
    }
}
