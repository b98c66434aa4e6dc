use std::time::{Duration, Instant};

use crate::catalog::{Catalog, SIMILAR_LIMIT};
use crate::categories::FILTER_CHIPS;
use crate::compare::{CompareSet, MAX_COMPARE};
use crate::config::DEFAULT_BASE_URL;
use crate::filter::{self, compile_filter, CompiledFilter};
use crate::preview::{self, ChartView, ImageLoad, Mode, PreviewOptions, PreviewView};
use crate::router::{self, Resolved, Route};
use crate::sitemap;
use crate::snippets::SnippetLang;
use crate::theme::{ColorScheme, Theme};
use crate::types::{EntryRef, PreviewType};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Filter,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    Grid,
    Detail,
    Compare,
}

const MAX_LOG_ENTRIES: usize = 50;
const TOAST_DURATION: Duration = Duration::from_secs(2);

pub struct App {
    quit: bool,
    catalog: Catalog,
    preview_opts: PreviewOptions,
    view: View,

    filter_query: String,
    filter_compiled: CompiledFilter,
    input_mode: InputMode,
    chip: usize,
    visible: Vec<EntryRef>,
    sel: usize,

    detail: Option<EntryRef>,
    not_found: Option<String>,
    detail_scroll: u16,
    snippet_lang: SnippetLang,
    show_sample: bool,
    hover: Option<usize>,
    image: ImageLoad,

    compare: CompareSet,
    compare_focus: usize,

    fps: u32,
    base_url: String,
    theme: ColorScheme,
    debug_log: Vec<String>,
    debug_visible: bool,
    toast_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(catalog: Catalog, preview_opts: PreviewOptions, fps: u32, default_filter: String) -> Self {
        let filter_compiled = compile_filter(&default_filter);
        let mut app = Self {
            quit: false,
            catalog,
            preview_opts,
            view: View::Grid,
            filter_query: default_filter,
            filter_compiled,
            input_mode: InputMode::Normal,
            chip: 0,
            visible: Vec::new(),
            sel: 0,
            detail: None,
            not_found: None,
            detail_scroll: 0,
            snippet_lang: SnippetLang::default(),
            show_sample: false,
            hover: None,
            image: ImageLoad::default(),
            compare: CompareSet::new(),
            compare_focus: 0,
            fps,
            base_url: DEFAULT_BASE_URL.to_string(),
            theme: ColorScheme::default(),
            debug_log: Vec::new(),
            debug_visible: false,
            toast_message: None,
        };
        app.refresh_visible();
        app
    }

    // ----- getters -----
    pub fn fps(&self) -> u32 {
        self.fps
    }
    pub fn theme(&self) -> &ColorScheme {
        &self.theme
    }
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme.colors();
    }
    pub fn quit_flag(&self) -> bool {
        self.quit
    }
    pub fn view(&self) -> View {
        self.view
    }
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
    pub fn preview_opts(&self) -> &PreviewOptions {
        &self.preview_opts
    }
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }
    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }
    pub fn chip(&self) -> &'static str {
        FILTER_CHIPS[self.chip]
    }
    pub fn visible(&self) -> &[EntryRef] {
        &self.visible
    }
    pub fn selection(&self) -> usize {
        self.sel
    }
    pub fn selected(&self) -> Option<&EntryRef> {
        self.visible.get(self.sel)
    }
    pub fn detail(&self) -> Option<&EntryRef> {
        self.detail.as_ref()
    }
    /// Slug of a detail route that matched nothing.
    pub fn not_found(&self) -> Option<&str> {
        self.not_found.as_deref()
    }
    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }
    pub fn snippet_lang(&self) -> SnippetLang {
        self.snippet_lang
    }
    pub fn show_sample(&self) -> bool {
        self.show_sample
    }
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }
    pub fn image(&self) -> &ImageLoad {
        &self.image
    }
    pub fn compare(&self) -> &CompareSet {
        &self.compare
    }
    pub fn compare_focus(&self) -> usize {
        self.compare_focus
    }
    pub fn debug_log(&self) -> &[String] {
        &self.debug_log
    }
    pub fn debug_visible(&self) -> bool {
        self.debug_visible
    }

    /// Entries in the same category as the open detail.
    pub fn similar(&self) -> Vec<EntryRef> {
        match &self.detail {
            Some(e) => self.catalog.similar(e, SIMILAR_LIMIT),
            None => Vec::new(),
        }
    }

    /// Entry whose preview the current view is centred on.
    pub fn focused_entry(&self) -> Option<&EntryRef> {
        match self.view {
            View::Grid => self.selected(),
            View::Detail => self.detail.as_ref(),
            View::Compare => self.compare.entries().get(self.compare_focus),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// Hosted explorer page of the focused entry.
    pub fn share_url(&self) -> Option<String> {
        self.focused_entry()
            .map(|e| sitemap::page_url(&self.base_url, &e.slug))
    }

    pub fn render_preview(&self, entry: &EntryRef, mode: Mode) -> Option<PreviewView> {
        entry
            .preview
            .as_ref()
            .map(|p| preview::render(p, mode, &self.preview_opts))
    }

    // ----- toast / debug -----

    /// Show a toast notification for 2 seconds
    pub fn show_toast(&mut self, msg: String) {
        self.toast_message = Some((msg, Instant::now()));
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed() < TOAST_DURATION {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    pub fn log_debug(&mut self, msg: String) {
        log::debug!("{msg}");
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        self.debug_log.push(format!("[{timestamp}] {msg}"));
        if self.debug_log.len() > MAX_LOG_ENTRIES {
            let excess = self.debug_log.len() - MAX_LOG_ENTRIES;
            self.debug_log.drain(..excess);
        }
    }

    pub fn toggle_debug_panel(&mut self) {
        self.debug_visible = !self.debug_visible;
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    // ----- filter -----
    pub fn start_filter(&mut self) {
        self.input_mode = InputMode::Filter;
        if self.view != View::Grid {
            self.view = View::Grid;
        }
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_compiled = CompiledFilter::default();
        self.input_mode = InputMode::Normal;
        self.refresh_visible();
    }

    pub fn apply_filter(&mut self) {
        self.filter_compiled = compile_filter(&self.filter_query);
        self.input_mode = InputMode::Normal;
        self.refresh_visible();
        self.log_debug(format!("filter {:?}: {} matches", self.filter_query, self.visible.len()));
    }

    pub fn filter_add_char(&mut self, ch: char) {
        self.filter_query.push(ch);
        self.filter_compiled = compile_filter(&self.filter_query);
        self.refresh_visible();
    }

    pub fn filter_backspace(&mut self) {
        self.filter_query.pop();
        self.filter_compiled = compile_filter(&self.filter_query);
        self.refresh_visible();
    }

    pub fn next_chip(&mut self) {
        self.chip = (self.chip + 1) % FILTER_CHIPS.len();
        self.refresh_visible();
    }

    pub fn prev_chip(&mut self) {
        self.chip = (self.chip + FILTER_CHIPS.len() - 1) % FILTER_CHIPS.len();
        self.refresh_visible();
    }

    /// Recompute the grid, keeping the selected entry when it survives.
    fn refresh_visible(&mut self) {
        let keep = self.selected().map(|e| e.slug.clone());
        let mut v = filter::search_compiled(self.catalog.all(), &self.filter_compiled, self.chip());
        filter::sort_entries(&mut v);
        self.visible = v;
        self.sel = keep
            .and_then(|slug| self.visible.iter().position(|e| e.slug == slug))
            .unwrap_or(0);
        self.sync_image();
    }

    // ----- navigation -----
    pub fn up(&mut self) {
        match self.view {
            View::Grid => self.sel = self.sel.saturating_sub(1),
            View::Detail => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            View::Compare => {}
        }
        self.sync_image();
    }

    pub fn down(&mut self) {
        match self.view {
            View::Grid => {
                if self.sel + 1 < self.visible.len() {
                    self.sel += 1;
                }
            }
            View::Detail => self.detail_scroll = self.detail_scroll.saturating_add(1),
            View::Compare => {}
        }
        self.sync_image();
    }

    pub fn left(&mut self) {
        match self.view {
            View::Grid => self.prev_chip(),
            View::Compare => self.compare_focus = self.compare_focus.saturating_sub(1),
            View::Detail => self.hover_prev(),
        }
    }

    pub fn right(&mut self) {
        match self.view {
            View::Grid => self.next_chip(),
            View::Compare => {
                if self.compare_focus + 1 < self.compare.len() {
                    self.compare_focus += 1;
                }
            }
            View::Detail => self.hover_next(),
        }
    }

    pub fn open_selected(&mut self) {
        if self.view != View::Grid {
            return;
        }
        if let Some(entry) = self.selected().cloned() {
            self.open_detail(entry);
        }
    }

    fn open_detail(&mut self, entry: EntryRef) {
        self.log_debug(format!("open detail {}", entry.slug));
        self.detail = Some(entry);
        self.not_found = None;
        self.view = View::Detail;
        self.detail_scroll = 0;
        self.hover = None;
        self.sync_image();
    }

    /// Esc outside filter input: leave the current view, or clear the filter
    /// on the grid.
    pub fn back(&mut self) {
        match self.view {
            View::Detail | View::Compare => {
                self.view = View::Grid;
                self.not_found = None;
                self.hover = None;
                self.sync_image();
            }
            View::Grid => self.clear_filter(),
        }
    }

    pub fn navigate(&mut self, route: &Route) {
        self.log_debug(format!("route {}", route.path()));
        match router::resolve(route, &self.catalog) {
            Resolved::Home => {
                self.view = View::Grid;
                self.not_found = None;
            }
            Resolved::Compare => self.open_compare(),
            Resolved::Detail(entry) => self.open_detail(entry),
            Resolved::NotFound { slug } => {
                self.detail = None;
                self.not_found = Some(slug);
                self.view = View::Detail;
            }
        }
        self.sync_image();
    }

    /// Route for the current view.
    pub fn current_route(&self) -> Route {
        match self.view {
            View::Grid => Route::Home,
            View::Compare => Route::Compare,
            View::Detail => match (&self.detail, &self.not_found) {
                (Some(e), _) => Route::Detail { slug: e.slug.clone() },
                (None, Some(slug)) => Route::Detail { slug: slug.clone() },
                (None, None) => Route::Home,
            },
        }
    }

    // ----- compare -----
    pub fn toggle_compare(&mut self) {
        let target = match self.view {
            View::Grid => self.selected().cloned(),
            View::Detail => self.detail.clone(),
            View::Compare => None,
        };
        let Some(entry) = target else { return };
        let name = entry.name().to_string();
        if self.compare.toggle(entry) {
            self.show_toast(format!("Added {name} to compare ({}/{MAX_COMPARE})", self.compare.len()));
        } else {
            self.show_toast(format!("Removed {name} from compare"));
        }
    }

    pub fn open_compare(&mut self) {
        if self.compare.len() < 2 {
            self.show_toast("Select at least 2 APIs to compare".to_string());
            return;
        }
        self.view = View::Compare;
        self.compare_focus = 0;
        self.sync_image();
    }

    pub fn clear_compare(&mut self) {
        self.compare.clear();
        self.compare_focus = 0;
        if self.view == View::Compare {
            self.view = View::Grid;
        }
        self.show_toast("Compare cleared".to_string());
    }

    pub fn remove_focused_compare(&mut self) {
        if self.view != View::Compare {
            return;
        }
        let Some(slug) = self.compare.entries().get(self.compare_focus).map(|e| e.slug.clone()) else {
            return;
        };
        self.compare.remove(&slug);
        if self.compare.is_empty() {
            self.view = View::Grid;
        }
        self.compare_focus = self.compare_focus.min(self.compare.len().saturating_sub(1));
        self.sync_image();
    }

    // ----- detail panels -----
    pub fn cycle_snippet(&mut self) {
        if self.view == View::Detail {
            self.snippet_lang = self.snippet_lang.next();
        }
    }

    pub fn toggle_sample(&mut self) {
        if self.view == View::Detail {
            self.show_sample = !self.show_sample;
        }
    }

    /// Points of the open detail chart that accept hover.
    pub fn hover_points(&self) -> usize {
        let Some(entry) = self.detail.as_ref() else {
            return 0;
        };
        match self.render_preview(entry, Mode::Full) {
            Some(PreviewView::Chart(ChartView::Plot(p))) if p.interactive() => p.points.len(),
            _ => 0,
        }
    }

    pub fn hover_next(&mut self) {
        let n = self.hover_points();
        if n == 0 {
            self.hover = None;
            return;
        }
        self.hover = Some(match self.hover {
            Some(i) if i + 1 < n => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn hover_prev(&mut self) {
        let n = self.hover_points();
        if n == 0 {
            self.hover = None;
            return;
        }
        self.hover = Some(match self.hover {
            Some(i) => i.saturating_sub(1).min(n - 1),
            None => n - 1,
        });
    }

    // ----- image tile -----
    fn sync_image(&mut self) {
        let mode = if self.view == View::Detail {
            Mode::Full
        } else {
            Mode::Compact
        };
        let url = self
            .focused_entry()
            .and_then(|e| e.preview.as_ref())
            .filter(|p| p.preview_type == PreviewType::Media)
            .and_then(|p| preview::media::render(p, mode).image);
        self.image.show(url.as_deref());
    }

    /// Load finished for `url`. Stale URLs are ignored.
    pub fn on_image_loaded(&mut self, url: &str) {
        if !self.image.loaded(url) {
            log::debug!("ignoring stale image load {url}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthKind, CatalogEntry, ChartKind, CorsStatus, PreviewConfig, PreviewData};
    use serde_json::json;

    fn row(name: &str, category: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.into(),
            description: format!("{name} data"),
            auth: AuthKind::None,
            https: true,
            cors: CorsStatus::Yes,
            link: format!("https://{}.example", crate::slug::slugify(name)),
            category: category.into(),
        }
    }

    fn preview(id: &str, kind: PreviewType, sample: serde_json::Value, cfg: PreviewConfig) -> PreviewData {
        PreviewData {
            id: id.into(),
            preview_type: kind,
            sample_response: sample,
            preview_config: cfg,
        }
    }

    fn app() -> App {
        let rows = vec![
            row("Zoo Animals", "Animals"),
            row("Dog CEO", "Animals"),
            row("Open-Meteo", "Weather"),
            row("CoinGecko", "Cryptocurrency"),
            row("Cat Facts", "Animals"),
        ];
        let previews = vec![
            preview(
                "dog-ceo",
                PreviewType::Media,
                json!({"message": "https://images.dog.ceo/a.jpg"}),
                PreviewConfig {
                    title: "Dog".into(),
                    image_key: Some("message".into()),
                    ..Default::default()
                },
            ),
            preview(
                "coingecko",
                PreviewType::Chart,
                json!({"prices": [{"d": "a", "p": 1}, {"d": "b", "p": 2}, {"d": "c", "p": 3}]}),
                PreviewConfig {
                    title: "BTC".into(),
                    chart_type: Some(ChartKind::Line),
                    chart_data_key: Some("p".into()),
                    chart_label_key: Some("d".into()),
                    ..Default::default()
                },
            ),
        ];
        App::new(Catalog::from_parts(rows, previews), PreviewOptions::default(), 30, String::new())
    }

    fn names(app: &App) -> Vec<&str> {
        app.visible().iter().map(|e| e.name()).collect()
    }

    #[test]
    fn grid_puts_featured_first() {
        let app = app();
        assert_eq!(
            names(&app),
            vec!["CoinGecko", "Dog CEO", "Cat Facts", "Open-Meteo", "Zoo Animals"]
        );
    }

    #[test]
    fn live_filter_and_chips() {
        let mut app = app();
        app.start_filter();
        for c in "cat".chars() {
            app.filter_add_char(c);
        }
        assert_eq!(names(&app), vec!["Cat Facts"]);
        app.filter_backspace();
        app.filter_backspace();
        app.filter_backspace();
        app.apply_filter();
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.visible().len(), 5);

        app.right();
        assert_eq!(app.chip(), "Weather");
        assert_eq!(names(&app), vec!["Open-Meteo"]);
        app.left();
        app.left();
        assert_eq!(app.chip(), "Games");
        assert!(app.visible().is_empty());
        assert!(app.selected().is_none());
    }

    #[test]
    fn selection_survives_refilter() {
        let mut app = app();
        app.down();
        assert_eq!(app.selected().unwrap().name(), "Dog CEO");
        app.filter_add_char('o');
        assert_eq!(app.selected().unwrap().name(), "Dog CEO");
    }

    #[test]
    fn compare_gate_needs_two() {
        let mut app = app();
        app.toggle_compare();
        app.open_compare();
        assert_eq!(app.view(), View::Grid);
        assert_eq!(app.toast_message(), Some("Select at least 2 APIs to compare"));

        app.down();
        app.toggle_compare();
        app.open_compare();
        assert_eq!(app.view(), View::Compare);
        assert_eq!(app.compare().len(), 2);

        app.right();
        assert_eq!(app.compare_focus(), 1);
        app.remove_focused_compare();
        assert_eq!(app.compare().len(), 1);
        assert_eq!(app.compare_focus(), 0);
        app.remove_focused_compare();
        assert_eq!(app.view(), View::Grid);
    }

    #[test]
    fn toggle_twice_removes() {
        let mut app = app();
        app.toggle_compare();
        assert_eq!(app.compare().len(), 1);
        app.toggle_compare();
        assert!(app.compare().is_empty());
    }

    #[test]
    fn navigate_routes() {
        let mut app = app();
        app.navigate(&Route::Detail { slug: "open-meteo".into() });
        assert_eq!(app.view(), View::Detail);
        assert_eq!(app.detail().unwrap().name(), "Open-Meteo");
        assert_eq!(app.similar().len(), 0);

        app.navigate(&Route::Detail { slug: "missing".into() });
        assert_eq!(app.not_found(), Some("missing"));
        assert!(app.detail().is_none());
        assert_eq!(app.current_route(), Route::Detail { slug: "missing".into() });

        app.back();
        assert_eq!(app.view(), View::Grid);
        assert_eq!(app.current_route(), Route::Home);
    }

    #[test]
    fn similar_lists_same_category() {
        let mut app = app();
        app.navigate(&Route::Detail { slug: "dog-ceo".into() });
        let similar: Vec<String> = app.similar().iter().map(|e| e.slug.clone()).collect();
        assert_eq!(similar, vec!["zoo-animals", "cat-facts"]);
    }

    #[test]
    fn chart_hover_is_bounded() {
        let mut app = app();
        app.navigate(&Route::Detail { slug: "coingecko".into() });
        assert_eq!(app.hover_points(), 3);
        app.right();
        assert_eq!(app.hover(), Some(0));
        app.right();
        app.right();
        app.right();
        assert_eq!(app.hover(), Some(2));
        app.left();
        assert_eq!(app.hover(), Some(1));

        app.navigate(&Route::Detail { slug: "cat-facts".into() });
        app.right();
        assert_eq!(app.hover(), None);
    }

    #[test]
    fn image_follows_focus_and_ignores_stale_loads() {
        let mut app = app();
        app.down();
        assert_eq!(app.image().url(), Some("https://images.dog.ceo/a.jpg"));
        app.on_image_loaded("https://old.example/x.jpg");
        assert!(!app.image().is_loaded());
        app.on_image_loaded("https://images.dog.ceo/a.jpg");
        assert!(app.image().is_loaded());

        app.down();
        assert_eq!(app.image(), &ImageLoad::Idle);
    }

    #[test]
    fn detail_panels_toggle() {
        let mut app = app();
        app.toggle_sample();
        assert!(!app.show_sample());
        app.open_selected();
        assert_eq!(app.view(), View::Detail);
        app.toggle_sample();
        assert!(app.show_sample());
        app.cycle_snippet();
        assert_eq!(app.snippet_lang(), SnippetLang::JavaScript);
    }

    #[test]
    fn debug_log_is_bounded() {
        let mut app = app();
        for i in 0..80 {
            app.log_debug(format!("msg {i}"));
        }
        assert_eq!(app.debug_log().len(), MAX_LOG_ENTRIES);
        assert!(app.debug_log()[MAX_LOG_ENTRIES - 1].ends_with("msg 79"));
    }

    #[test]
    fn esc_on_grid_clears_filter() {
        let mut app = app();
        app.filter_add_char('z');
        assert_eq!(app.visible().len(), 1);
        app.back();
        assert_eq!(app.filter_query(), "");
        assert_eq!(app.visible().len(), 5);
    }
}
