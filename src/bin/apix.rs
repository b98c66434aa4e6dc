use anyhow::{anyhow, Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::File,
    io,
    time::{Duration, Instant},
};

use apix::{
    config::{self, Config, RunMode},
    copy_api,
    preview::{self, ImageLoad, Mode},
    ui, App, Catalog, InputMode,
};

fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    dotenvy::dotenv().ok();

    let cfg = config::load().context("Failed to load configuration")?;
    init_logging(&cfg)?;
    cfg.log_summary();

    let catalog = Catalog::load(&cfg.catalog_path, &cfg.previews_dir)?;

    match &cfg.run_mode {
        RunMode::List => {
            for slug in catalog.slugs() {
                println!("{slug}");
            }
            Ok(())
        }
        RunMode::Render { slug, compact } => render_one(&cfg, &catalog, slug, *compact),
        RunMode::Interactive => run_tui(cfg, catalog),
    }
}

/// The TUI owns stdout, so interactive sessions log to a file.
fn init_logging(cfg: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cfg.run_mode == RunMode::Interactive {
        let file = File::create(&cfg.log_file)
            .with_context(|| format!("Failed to create log file: {}", cfg.log_file.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn render_one(cfg: &Config, catalog: &Catalog, slug: &str, compact: bool) -> Result<()> {
    let entry = catalog
        .by_slug(slug)
        .ok_or_else(|| anyhow!("API not found: {slug}"))?;
    let data = entry
        .preview
        .as_ref()
        .ok_or_else(|| anyhow!("{} has no preview", entry.name()))?;
    let mode = if compact { Mode::Compact } else { Mode::Full };
    let view = preview::render(data, mode, &cfg.preview_options());
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn run_tui(cfg: Config, catalog: Catalog) -> Result<()> {
    let mut app = App::new(
        catalog,
        cfg.preview_options(),
        cfg.render_fps,
        cfg.initial_query.clone(),
    );
    app.set_theme(cfg.theme);
    app.set_base_url(cfg.base_url.clone());
    app.navigate(&cfg.initial_route);

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let res = run_loop(&mut app, &mut terminal);

    // cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run_loop(app: &mut App, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut last_frame = Instant::now();
    let mut first = true;

    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps().max(1)) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        if event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    handle_key(app, k);
                }
            }
        }

        if first || last_frame.elapsed() >= budget {
            terminal.draw(|f| ui::draw(f, app))?;
            last_frame = Instant::now();
            first = false;

            // The terminal shows the image URL; it counts as loaded once drawn.
            if let ImageLoad::Loading(url) = app.image().clone() {
                app.on_image_loaded(&url);
            }
        }

        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, k: KeyEvent) {
    if app.input_mode() == InputMode::Filter {
        match k.code {
            KeyCode::Char(c) => app.filter_add_char(c),
            KeyCode::Backspace => app.filter_backspace(),
            KeyCode::Enter => app.apply_filter(),
            KeyCode::Esc => app.clear_filter(),
            _ => {}
        }
        return;
    }

    match (k.code, k.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.quit(),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.toggle_debug_panel(),
        (KeyCode::Char('/'), _) => app.start_filter(),
        (KeyCode::Esc, _) => app.back(),

        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.down(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.left(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.right(),
        (KeyCode::Enter, _) => {
            app.log_debug(format!("KEY: Enter, view={:?}", app.view()));
            app.open_selected();
        }

        (KeyCode::Char(' '), _) => app.toggle_compare(),
        (KeyCode::Char('C'), _) => app.open_compare(),
        (KeyCode::Char('X'), _) => app.clear_compare(),
        (KeyCode::Char('x'), _) => app.remove_focused_compare(),

        (KeyCode::Tab, _) => app.cycle_snippet(),
        (KeyCode::Char('s'), _) => app.toggle_sample(),

        (KeyCode::Char('c'), _) => copy_with_toast(app, copy_api::copy_current),
        (KeyCode::Char('L'), _) => copy_with_toast(app, copy_api::copy_share),
        _ => {}
    }
}

fn copy_with_toast(app: &mut App, copy: fn(&App) -> Result<copy_api::CopyTarget, &'static str>) {
    let msg = match copy(app) {
        Ok(target) => target.toast().to_string(),
        Err(msg) => msg.to_string(),
    };
    app.log_debug(format!("copy: {msg}"));
    app.show_toast(msg);
}
