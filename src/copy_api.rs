//! "Press `c` to copy": decides *what* to copy for the current view and
//! hands it to `platform::copy_to_clipboard`.
//!
//! - **Grid**: documentation link of the selected entry
//! - **Detail**: the active request snippet, or the sample response when
//!   the sample panel is open
//! - **Compare**: documentation link of the focused column
//!
//! `L` copies the hosted explorer page of the focused entry in any view.

use crate::app::{App, View};
use crate::platform;
use crate::preview::code::pretty_json;
use crate::snippets;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CopyTarget {
    Link,
    Snippet,
    Sample,
    Share,
}

impl CopyTarget {
    /// Toast shown after a successful copy.
    pub fn toast(&self) -> &'static str {
        match self {
            CopyTarget::Link => "Copied link",
            CopyTarget::Snippet => "Copied snippet",
            CopyTarget::Sample => "Copied sample response",
            CopyTarget::Share => "Copied share link",
        }
    }
}

pub fn target(app: &App) -> CopyTarget {
    match app.view() {
        View::Detail if app.show_sample() => CopyTarget::Sample,
        View::Detail => CopyTarget::Snippet,
        View::Grid | View::Compare => CopyTarget::Link,
    }
}

/// The string that would be copied, if there is anything to copy.
pub fn current_text(app: &App) -> Option<String> {
    let entry = app.focused_entry()?;
    let text = match target(app) {
        CopyTarget::Link => entry.catalog.link.clone(),
        CopyTarget::Snippet => snippets::generate(entry, app.snippet_lang()),
        CopyTarget::Sample => pretty_json(&entry.preview.as_ref()?.sample_response),
        CopyTarget::Share => app.share_url()?,
    };
    (!text.is_empty()).then_some(text)
}

/// Copy for the current view. `Err` carries the toast to show.
pub fn copy_current(app: &App) -> Result<CopyTarget, &'static str> {
    let text = current_text(app).ok_or("Nothing to copy")?;
    write(&text, target(app))
}

/// Copy the share link of the focused entry.
pub fn copy_share(app: &App) -> Result<CopyTarget, &'static str> {
    let text = app.share_url().ok_or("Nothing to copy")?;
    write(&text, CopyTarget::Share)
}

fn write(text: &str, target: CopyTarget) -> Result<CopyTarget, &'static str> {
    if platform::copy_to_clipboard(text) {
        Ok(target)
    } else {
        Err("Copy failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::preview::PreviewOptions;
    use crate::router::Route;
    use crate::types::{AuthKind, CatalogEntry, CorsStatus, PreviewConfig, PreviewData, PreviewType};

    fn app() -> App {
        let rows = vec![CatalogEntry {
            name: "JSONPlaceholder".into(),
            description: "Fake data".into(),
            auth: AuthKind::ApiKey,
            https: true,
            cors: CorsStatus::Yes,
            link: "https://jsonplaceholder.typicode.com".into(),
            category: "Test Data".into(),
        }];
        let previews = vec![PreviewData {
            id: "jsonplaceholder".into(),
            preview_type: PreviewType::Code,
            sample_response: serde_json::json!({"id": 1}),
            preview_config: PreviewConfig::default(),
        }];
        App::new(Catalog::from_parts(rows, previews), PreviewOptions::default(), 30, String::new())
    }

    #[test]
    fn grid_copies_link() {
        let app = app();
        assert_eq!(target(&app), CopyTarget::Link);
        assert_eq!(current_text(&app).as_deref(), Some("https://jsonplaceholder.typicode.com"));
    }

    #[test]
    fn detail_copies_snippet_then_sample() {
        let mut app = app();
        app.navigate(&Route::Detail { slug: "jsonplaceholder".into() });
        let snippet = current_text(&app).unwrap();
        assert!(snippet.starts_with("curl -X GET"));
        assert!(snippet.contains("X-Api-Key: YOUR_API_KEY"));

        app.toggle_sample();
        assert_eq!(target(&app), CopyTarget::Sample);
        assert_eq!(current_text(&app).as_deref(), Some("{\n  \"id\": 1\n}"));
    }

    #[test]
    fn share_link_uses_configured_base_url() {
        let mut app = app();
        assert_eq!(
            app.share_url().as_deref(),
            Some("https://public-apis-explorer.vercel.app/jsonplaceholder")
        );
        app.set_base_url("https://apis.internal.test/");
        assert_eq!(
            app.share_url().as_deref(),
            Some("https://apis.internal.test/jsonplaceholder")
        );
    }

    #[test]
    fn nothing_to_copy_on_not_found() {
        let mut app = app();
        app.navigate(&Route::Detail { slug: "missing".into() });
        assert!(current_text(&app).is_none());
        assert_eq!(copy_current(&app), Err("Nothing to copy"));
        assert_eq!(copy_share(&app), Err("Nothing to copy"));
    }
}
