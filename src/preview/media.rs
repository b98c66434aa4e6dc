//! Single image tile.

use serde::Serialize;

use super::{resolve_str, Mode};
use crate::types::PreviewData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaView {
    pub title: String,
    pub subtitle: Option<String>,
    pub mode: Mode,
    pub image: Option<String>,
}

impl MediaView {
    /// Text shown in place of a missing image.
    pub fn missing_text(&self) -> &'static str {
        if self.mode.is_compact() {
            "No image"
        } else {
            "No image available"
        }
    }
}

pub fn render(data: &PreviewData, mode: Mode) -> MediaView {
    let cfg = &data.preview_config;
    MediaView {
        title: cfg.title.clone(),
        subtitle: cfg.subtitle.clone(),
        mode,
        image: resolve_str(&data.sample_response, cfg.image_key.as_deref()),
    }
}

/// Load state of the image currently shown by a media tile.
///
/// A load event only counts for the URL being displayed; events for an
/// earlier URL are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageLoad {
    #[default]
    Idle,
    Loading(String),
    Loaded(String),
}

impl ImageLoad {
    /// Point the tile at `url`, restarting the load if it changed.
    pub fn show(&mut self, url: Option<&str>) {
        match url {
            None => *self = ImageLoad::Idle,
            Some(u) if self.url() == Some(u) => {}
            Some(u) => *self = ImageLoad::Loading(u.to_string()),
        }
    }

    /// Record a completed load. Returns false for a stale URL.
    pub fn loaded(&mut self, url: &str) -> bool {
        match self {
            ImageLoad::Loading(u) if u.as_str() == url => {
                *self = ImageLoad::Loaded(url.to_string());
                true
            }
            ImageLoad::Loaded(u) => u.as_str() == url,
            _ => false,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ImageLoad::Idle => None,
            ImageLoad::Loading(u) | ImageLoad::Loaded(u) => Some(u.as_str()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ImageLoad::Loaded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PreviewConfig, PreviewType};
    use serde_json::json;

    fn media(image_key: Option<&str>) -> PreviewData {
        PreviewData {
            id: "dog-ceo".into(),
            preview_type: PreviewType::Media,
            sample_response: json!({"message": "https://images.dog.ceo/breeds/hound/1.jpg", "status": "success"}),
            preview_config: PreviewConfig {
                title: "Random Dog".into(),
                image_key: image_key.map(String::from),
                ..Default::default()
            },
        }
    }

    #[test]
    fn resolves_image_from_key() {
        let v = render(&media(Some("message")), Mode::Full);
        assert_eq!(v.image.as_deref(), Some("https://images.dog.ceo/breeds/hound/1.jpg"));
    }

    #[test]
    fn missing_image_has_explicit_placeholder() {
        let v = render(&media(None), Mode::Compact);
        assert!(v.image.is_none());
        assert_eq!(v.missing_text(), "No image");
        let v = render(&media(Some("status.nope")), Mode::Full);
        assert_eq!(v.missing_text(), "No image available");
    }

    #[test]
    fn last_load_wins() {
        let mut state = ImageLoad::default();
        state.show(Some("a"));
        state.show(Some("b"));
        assert!(!state.loaded("a"));
        assert!(!state.is_loaded());
        assert!(state.loaded("b"));
        assert!(state.is_loaded());

        state.show(Some("b"));
        assert!(state.is_loaded());
        state.show(None);
        assert_eq!(state, ImageLoad::Idle);
    }
}
