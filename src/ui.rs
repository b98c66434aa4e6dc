use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode, View};
use crate::categories::{category_emoji, FILTER_CHIPS};
use crate::compare::MAX_COMPARE;
use crate::json_syntax::colorize_json;
use crate::highlight::to_line;
use crate::preview::code::pretty_json;
use crate::preview::Mode;
use crate::router::NOT_FOUND_MESSAGE;
use crate::snippets::{self, SnippetLang};
use crate::types::EntryRef;
use crate::ui_preview::{draw_preview, PreviewCtx};

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 15;

// ===============================
// Top-level draw
// ===============================
pub fn draw(f: &mut Frame, app: &App) {
    let filter_expanded = app.input_mode() == InputMode::Filter || !app.filter_query().is_empty();
    let show_chips = app.view() == View::Grid;
    let show_debug = app.debug_visible() && !app.debug_log().is_empty();

    let mut constraints: Vec<Constraint> = Vec::with_capacity(6);
    constraints.push(Constraint::Length(1)); // header
    if filter_expanded {
        constraints.push(Constraint::Length(3));
    }
    if show_chips {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0)); // body
    if show_debug {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(2)); // footer

    let chunks = Layout::vertical(constraints).split(f.area());

    let mut idx = 0usize;
    header(f, chunks[idx], app);
    idx += 1;
    if filter_expanded {
        filter_bar(f, chunks[idx], app);
        idx += 1;
    }
    if show_chips {
        chip_bar(f, chunks[idx], app);
        idx += 1;
    }
    body(f, chunks[idx], app);
    idx += 1;
    if show_debug {
        debug_panel(f, chunks[idx], app);
        idx += 1;
    }
    footer(f, chunks[idx], app);

    if app.toast_message().is_some() {
        draw_toast_modal(f, app);
    }
}

// ===============================
// Header / Filter / Chips
// ===============================
fn header(f: &mut Frame, area: Rect, app: &App) {
    let titles = ["Catalog", "Detail", "Compare"];
    let selected = match app.view() {
        View::Grid => 0,
        View::Detail => 1,
        View::Compare => 2,
    };

    let mut spans = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        spans.push(Span::raw(if i == 0 { "┌─" } else { "┬─" }));
        if i == selected {
            spans.push(Span::styled(
                *title,
                Style::default().fg(app.theme().focus_border).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(*title));
        }
        spans.push(Span::raw("─"));
    }
    spans.push(Span::raw("┐  "));
    spans.push(Span::styled(
        format!("apix:{}", app.current_route().path()),
        Style::default().fg(app.theme().text_dim),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.input_mode() == InputMode::Filter;
    let filter_text = app.filter_query();

    let border_color = if focused { app.theme().focus_border } else { app.theme().unfocused_border };
    let hint = "(Press / to filter: words, auth:free, https:yes, cors:yes, cat:finance)";
    let text = if filter_text.is_empty() && !focused { hint } else { filter_text };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(if focused { app.theme().focus_border } else { app.theme().text }))
        .block(
            Block::default()
                .title(" Filter ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(paragraph, area);

    if focused && area.width > 2 {
        let len = filter_text.chars().count().min(area.width.saturating_sub(2) as usize);
        f.set_cursor_position((area.x + 1 + len as u16, area.y + 1));
    }
}

fn chip_bar(f: &mut Frame, area: Rect, app: &App) {
    let active = FILTER_CHIPS.iter().position(|c| *c == app.chip()).unwrap_or(0);
    // keep the active chip on screen
    let start = active.saturating_sub(3);

    let mut spans = Vec::new();
    if start > 0 {
        spans.push(Span::styled("‹ ", Style::default().fg(app.theme().text_dim)));
    }
    for (i, chip) in FILTER_CHIPS.iter().enumerate().skip(start) {
        let style = if i == active {
            Style::default()
                .bg(app.theme().selection_bg)
                .fg(app.theme().selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme().text_dim)
        };
        spans.push(Span::styled(format!(" {chip} "), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ===============================
// Body
// ===============================
fn body(f: &mut Frame, area: Rect, app: &App) {
    let size = f.area();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        too_small(f, area, app);
        return;
    }
    match app.view() {
        View::Grid => grid(f, area, app),
        View::Detail => detail(f, area, app),
        View::Compare => compare(f, area, app),
    }
}

fn too_small(f: &mut Frame, area: Rect, app: &App) {
    let size = f.area();
    let warning_text = format!(
        "Terminal too small!\n\nMinimum size: {}×{}\nCurrent size: {}×{}\n\nPlease resize your terminal.",
        MIN_WIDTH, MIN_HEIGHT, size.width, size.height
    );
    let warning = Paragraph::new(warning_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme().toast_error).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(app.theme().toast_error)),
        );
    f.render_widget(warning, area);
}

fn pane_block<'a>(app: &App, title: impl Into<Line<'a>>, focused: bool) -> Block<'a> {
    Block::default()
        .title(title.into())
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Double } else { BorderType::Rounded })
        .border_style(
            Style::default()
                .fg(if focused { app.theme().focus_border } else { app.theme().unfocused_border })
                .add_modifier(if focused { Modifier::BOLD } else { Modifier::empty() }),
        )
        .style(if focused {
            Style::default().bg(app.theme().background_focused)
        } else {
            Style::default()
        })
}

fn preview_ctx(app: &App, hover: Option<usize>) -> PreviewCtx<'_> {
    PreviewCtx {
        theme: app.theme(),
        hover,
        image: app.image(),
    }
}

/// Compact or full preview, or the description when the entry has none.
fn entry_preview(f: &mut Frame, area: Rect, app: &App, entry: &EntryRef, mode: Mode, hover: Option<usize>) {
    match app.render_preview(entry, mode) {
        Some(view) => draw_preview(f, area, &view, &preview_ctx(app, hover)),
        None => {
            let lines = vec![
                Line::from(Span::styled(
                    entry.catalog.description.clone(),
                    Style::default().fg(app.theme().text),
                )),
                Line::default(),
                Line::from(Span::styled(
                    "No live preview for this API",
                    Style::default().fg(app.theme().text_dim),
                )),
            ];
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
        }
    }
}

fn auth_span(app: &App, entry: &EntryRef) -> Span<'static> {
    Span::styled(
        format!("[{}]", entry.catalog.auth.badge()),
        Style::default().fg(app.theme().badge),
    )
}

// ----- grid -----
fn grid(f: &mut Frame, area: Rect, app: &App) {
    let [list_area, preview_area] =
        Layout::horizontal([Constraint::Ratio(9, 20), Constraint::Ratio(11, 20)]).areas(area);

    let items: Vec<ListItem> = app
        .visible()
        .iter()
        .map(|e| {
            let marker = if app.compare().is_selected(&e.slug) { "◆ " } else { "  " };
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(app.theme().compare)),
                Span::raw(format!("{} ", category_emoji(e.category()))),
                Span::styled(e.name().to_string(), Style::default().fg(app.theme().text)),
                Span::raw(" "),
                auth_span(app, e),
            ];
            if e.has_preview() {
                spans.push(Span::styled(" ●", Style::default().fg(app.theme().chart.line)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let total = app.catalog().len();
    let shown = app.visible().len();
    let title = if shown < total {
        format!(" [ APIs ({shown} / {total}) ] ")
    } else {
        format!(" [ APIs ({total}) ] ")
    };

    let mut state = ListState::default();
    if shown > 0 {
        state.select(Some(app.selection()));
    }
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(app.theme().selection_bg)
                .fg(app.theme().selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("")
        .block(pane_block(app, title, true));
    f.render_stateful_widget(list, list_area, &mut state);

    let block = pane_block(app, " Preview ".to_string(), false);
    let inner = block.inner(preview_area);
    f.render_widget(block, preview_area);
    match app.selected() {
        Some(entry) => entry_preview(f, inner, app, entry, Mode::Compact, None),
        None => {
            let msg = Paragraph::new("No APIs match this filter")
                .style(Style::default().fg(app.theme().text_dim));
            f.render_widget(msg, inner);
        }
    }
}

// ----- detail -----
fn detail(f: &mut Frame, area: Rect, app: &App) {
    if let Some(slug) = app.not_found() {
        not_found(f, area, app, slug);
        return;
    }
    let Some(entry) = app.detail() else {
        return;
    };

    let [meta_area, main] = Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);
    meta(f, meta_area, app, entry);

    let [preview_area, side] =
        Layout::horizontal([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)]).areas(main);

    let hint = if app.hover_points() > 0 { " Preview · ←/→ hover " } else { " Preview " };
    let block = pane_block(app, format!(" [{hint}] "), true);
    let inner = block.inner(preview_area);
    f.render_widget(block, preview_area);
    entry_preview(f, inner, app, entry, Mode::Full, app.hover());

    let similar = app.similar();
    let similar_h = (similar.len().max(1) as u16 + 2).min(8);
    let [code_area, similar_area] =
        Layout::vertical([Constraint::Min(4), Constraint::Length(similar_h)]).areas(side);

    if app.show_sample() {
        sample_panel(f, code_area, app, entry);
    } else {
        snippet_panel(f, code_area, app, entry);
    }
    similar_panel(f, similar_area, app, &similar);
}

fn not_found(f: &mut Frame, area: Rect, app: &App, slug: &str) {
    let lines = vec![
        Line::from(Span::styled(
            NOT_FOUND_MESSAGE,
            Style::default().fg(app.theme().toast_error).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("No entry with slug \"{slug}\""),
            Style::default().fg(app.theme().text_dim),
        )),
        Line::from(Span::styled("Esc to go back", Style::default().fg(app.theme().text_dim))),
    ];
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(6),
        Constraint::Percentage(35),
    ])
    .areas(area);
    let w = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme().unfocused_border)),
    );
    f.render_widget(w, mid);
}

fn meta(f: &mut Frame, area: Rect, app: &App, entry: &EntryRef) {
    let c = &entry.catalog;
    let dim = Style::default().fg(app.theme().text_dim);
    let yes_no = |b: bool| if b { "✓" } else { "✗" };

    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", category_emoji(&c.category))),
            Span::styled(c.category.clone(), dim),
            Span::raw("  "),
            auth_span(app, entry),
        ]),
        Line::from(Span::styled(c.description.clone(), Style::default().fg(app.theme().text))),
        Line::from(vec![
            Span::styled("HTTPS ", dim),
            Span::raw(yes_no(c.https)),
            Span::styled("  CORS ", dim),
            Span::raw(c.cors.to_string()),
        ]),
        Line::from(Span::styled(c.link.clone(), Style::default().fg(app.theme().badge))),
    ];
    let w = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(pane_block(app, format!(" {} ", c.name), false));
    f.render_widget(w, area);
}

fn snippet_panel(f: &mut Frame, area: Rect, app: &App, entry: &EntryRef) {
    let active = app.snippet_lang();
    let mut tabs = vec![Span::raw(" ")];
    for (i, lang) in SnippetLang::ALL.iter().enumerate() {
        if i > 0 {
            tabs.push(Span::raw(" │ "));
        }
        let style = if *lang == active {
            Style::default().fg(app.theme().focus_border).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme().text_dim)
        };
        tabs.push(Span::styled(lang.label(), style));
    }
    tabs.push(Span::raw(" "));

    let code = snippets::generate(entry, active);
    let mut lines = vec![Line::from(Span::styled(
        active.file_name(),
        Style::default().fg(app.theme().text_dim),
    ))];
    lines.extend(snippets::colorize(&code, active).iter().map(|t| to_line(t)));

    let w = Paragraph::new(lines)
        .scroll((app.detail_scroll(), 0))
        .block(pane_block(app, Line::from(tabs), false));
    f.render_widget(w, area);
}

fn sample_panel(f: &mut Frame, area: Rect, app: &App, entry: &EntryRef) {
    let lines = match &entry.preview {
        Some(p) => colorize_json(&pretty_json(&p.sample_response)),
        None => vec![Line::from(Span::styled(
            "No sample response",
            Style::default().fg(app.theme().text_dim),
        ))],
    };
    let w = Paragraph::new(lines)
        .scroll((app.detail_scroll(), 0))
        .block(pane_block(app, " Sample response ".to_string(), false));
    f.render_widget(w, area);
}

fn similar_panel(f: &mut Frame, area: Rect, app: &App, similar: &[EntryRef]) {
    let items: Vec<ListItem> = if similar.is_empty() {
        vec![ListItem::new(Span::styled(
            "Nothing else in this category",
            Style::default().fg(app.theme().text_dim),
        ))]
    } else {
        similar
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::styled(e.name().to_string(), Style::default().fg(app.theme().text)),
                    Span::raw(" "),
                    auth_span(app, e),
                ]))
            })
            .collect()
    };
    f.render_widget(List::new(items).block(pane_block(app, " Similar ".to_string(), false)), area);
}

// ----- compare -----
fn compare(f: &mut Frame, area: Rect, app: &App) {
    let entries = app.compare().entries();
    if entries.is_empty() {
        let msg = Paragraph::new("Nothing to compare. Press Space on the grid to pick APIs.")
            .style(Style::default().fg(app.theme().text_dim))
            .block(pane_block(app, " Compare ".to_string(), false));
        f.render_widget(msg, area);
        return;
    }

    let n = entries.len() as u32;
    let cols = Layout::horizontal((0..n).map(|_| Constraint::Ratio(1, n))).split(area);
    for (i, (entry, col)) in entries.iter().zip(cols.iter()).enumerate() {
        let focused = i == app.compare_focus();
        let title = if focused {
            format!(" [ {} ] ", entry.name())
        } else {
            format!(" {} ", entry.name())
        };
        let block = pane_block(app, title, focused);
        let inner = block.inner(*col);
        f.render_widget(block, *col);

        let [preview_area, attrs_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(5)]).areas(inner);
        entry_preview(f, preview_area, app, entry, Mode::Compact, None);
        compare_attrs(f, attrs_area, app, entry);
    }
}

fn compare_attrs(f: &mut Frame, area: Rect, app: &App, entry: &EntryRef) {
    let c = &entry.catalog;
    let dim = Style::default().fg(app.theme().text_dim);
    let row = |label: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{label:<9}"), dim), Span::raw(value)])
    };
    let lines = vec![
        row("Category", c.category.clone()),
        row("Auth", c.auth.badge().to_string()),
        row("HTTPS", if c.https { "yes" } else { "no" }.to_string()),
        row("CORS", c.cors.to_string()),
        row("Preview", if entry.has_preview() { "yes" } else { "no" }.to_string()),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP).border_style(dim)),
        area,
    );
}

// ===============================
// Footer / Debug
// ===============================
fn keys(view: View) -> &'static [(&'static str, &'static str)] {
    match view {
        View::Grid => &[
            ("/", "filter"),
            ("←/→", "category"),
            ("Enter", "open"),
            ("Space", "compare"),
            ("C", "compare view"),
            ("c", "copy link"),
            ("L", "share"),
            ("Ctrl+D", "debug"),
            ("q", "quit"),
        ],
        View::Detail => &[
            ("Esc", "back"),
            ("↑/↓", "scroll"),
            ("Tab", "language"),
            ("s", "sample"),
            ("←/→", "hover"),
            ("c", "copy"),
            ("L", "share"),
            ("Space", "compare"),
            ("q", "quit"),
        ],
        View::Compare => &[
            ("Esc", "back"),
            ("←/→", "focus"),
            ("x", "remove"),
            ("X", "clear"),
            ("c", "copy link"),
            ("q", "quit"),
        ],
    }
}

fn footer(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = Vec::with_capacity(32);
    for (i, (key, action)) in keys(app.view()).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        spans.push(Span::styled(*key, Style::default().fg(app.theme().focus_border)));
        spans.push(Span::raw(format!(" {action}")));
    }

    if !app.compare().is_empty() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("◆ {}/{}", app.compare().len(), MAX_COMPARE),
            Style::default().fg(app.theme().compare).add_modifier(Modifier::BOLD),
        ));
    }
    if app.debug_visible() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("[DEBUG]", Style::default().fg(app.theme().debug_indicator)));
    }
    if let Some(toast) = app.toast_message() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            toast,
            Style::default().fg(app.theme().toast_success).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(format!(" │ FPS {}", app.fps())));

    let w = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP).border_type(BorderType::Plain));
    f.render_widget(w, area);
}

fn debug_panel(f: &mut Frame, area: Rect, app: &App) {
    let log = app.debug_log();
    let lines_to_show = area.height.saturating_sub(2) as usize;
    let start = log.len().saturating_sub(lines_to_show);
    let lines: Vec<Line> = log[start..].iter().map(|msg| Line::from(msg.as_str())).collect();

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(app.theme().text_dim))
        .block(
            Block::default()
                .title(" Debug ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme().text_dim)),
        );
    f.render_widget(paragraph, area);
}

// ===============================
// Overlays
// ===============================
fn draw_toast_modal(f: &mut Frame, app: &App) {
    let message = app.toast_message().unwrap_or("");

    let area = f.area();
    let width = (area.width * 4) / 10;
    let height = 3;
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    let overlay = Rect { x, y, width, height };

    f.render_widget(Clear, overlay);
    let text = Paragraph::new(format!("✓ {message}"))
        .style(Style::default().fg(app.theme().toast_success).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme().toast_success)),
        );
    f.render_widget(text, overlay);
}
