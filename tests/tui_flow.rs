//! Drives the app the way the key handler does and draws every view with
//! every theme on a test backend.

use std::path::PathBuf;

use apix::router::Route;
use apix::theme::Theme;
use apix::{copy_api, ui, App, Catalog, PreviewOptions, View};
use ratatui::{backend::TestBackend, Terminal};

fn app() -> App {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let catalog = Catalog::load(&dir.join("catalog.json"), &dir.join("previews")).unwrap();
    App::new(catalog, PreviewOptions::default(), 30, String::new())
}

fn screen(app: &App) -> String {
    let mut term = Terminal::new(TestBackend::new(140, 40)).unwrap();
    term.draw(|f| ui::draw(f, app)).unwrap();
    term.backend().buffer().content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn browse_open_and_go_back() {
    let mut app = app();
    assert_eq!(app.view(), View::Grid);
    assert!(screen(&app).contains("APIs (16)"));

    app.open_selected();
    assert_eq!(app.view(), View::Detail);
    let name = app.detail().unwrap().name().to_string();
    assert!(screen(&app).contains(&name));

    app.back();
    assert_eq!(app.view(), View::Grid);
}

#[test]
fn live_filter_narrows_grid() {
    let mut app = app();
    app.start_filter();
    for c in "auth:oauth".chars() {
        app.filter_add_char(c);
    }
    assert_eq!(app.visible().len(), 2);
    let s = screen(&app);
    assert!(s.contains("APIs (2 / 16)"));
    assert!(s.contains("auth:oauth"));
    app.apply_filter();
    app.clear_filter();
    assert_eq!(app.visible().len(), 16);
}

#[test]
fn compare_two_entries() {
    let mut app = app();
    app.toggle_compare();
    app.down();
    app.toggle_compare();
    app.open_compare();
    assert_eq!(app.view(), View::Compare);
    let s = screen(&app);
    assert!(s.contains("HTTPS"));
    assert!(s.contains("2/3"));
    assert_eq!(copy_api::target(&app), copy_api::CopyTarget::Link);
}

#[test]
fn chart_detail_hover_shows_tooltip() {
    let mut app = app();
    app.navigate(&Route::Detail { slug: "coingecko".into() });
    assert_eq!(app.hover_points(), 7);
    app.right();
    assert_eq!(app.hover(), Some(0));
    assert!(screen(&app).contains("Mon: 61.3K"));
}

#[test]
fn every_theme_draws_every_featured_detail() {
    let mut app = app();
    let slugs: Vec<String> = app.catalog().featured().iter().map(|e| e.slug.clone()).collect();
    for theme in Theme::ALL {
        app.set_theme(theme);
        for slug in &slugs {
            app.navigate(&Route::Detail { slug: slug.clone() });
            assert!(!screen(&app).is_empty());
            app.toggle_sample();
            assert!(screen(&app).contains("Sample response"));
            app.toggle_sample();
        }
    }
}
