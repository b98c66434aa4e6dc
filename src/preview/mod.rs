//! Preview engine: turns a captured sample payload and its declarative
//! config into a typed view tree.
//!
//! Every renderer is a pure function of `(PreviewData, Mode, PreviewOptions)`
//! and degrades to an explicit placeholder on mis-shaped data. The view tree
//! is drawn by the terminal UI and can be dumped as JSON.

pub mod card;
pub mod chart;
pub mod code;
pub mod geometry;
pub mod list;
pub mod map;
pub mod media;
pub mod weather;

use serde::Serialize;

use crate::resolve::{format_label, format_value, resolve_key};
use crate::types::{PreviewData, PreviewType};

pub use card::CardView;
pub use chart::ChartView;
pub use code::CodeView;
pub use list::ListView;
pub use map::MapView;
pub use media::{ImageLoad, MediaView};
pub use weather::WeatherView;

/// Compact is used in grid cells and comparison columns, full on the
/// detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Compact,
    #[default]
    Full,
}

impl Mode {
    pub fn is_compact(&self) -> bool {
        matches!(self, Mode::Compact)
    }
}

/// Tunable rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Display fields shown by a compact card.
    pub card_compact_fields: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            card_compact_fields: 5,
        }
    }
}

/// A resolved `(key, label, value)` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Resolve configured display fields with the generic formatter.
pub(crate) fn resolve_fields(doc: &serde_json::Value, keys: Option<&[String]>) -> Vec<Field> {
    keys.unwrap_or_default()
        .iter()
        .map(|key| Field {
            key: key.clone(),
            label: format_label(key),
            value: format_value(resolve_key(doc, key)),
        })
        .collect()
}

/// Resolve `path` to a string value, if it is one.
pub(crate) fn resolve_str(doc: &serde_json::Value, path: Option<&str>) -> Option<String> {
    path.and_then(|p| resolve_key(doc, p))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PreviewView {
    Weather(WeatherView),
    Map(MapView),
    Chart(ChartView),
    List(ListView),
    Media(MediaView),
    Code(CodeView),
    Card(CardView),
}

impl PreviewView {
    pub fn kind(&self) -> PreviewType {
        match self {
            PreviewView::Weather(_) => PreviewType::Weather,
            PreviewView::Map(_) => PreviewType::Map,
            PreviewView::Chart(_) => PreviewType::Chart,
            PreviewView::List(_) => PreviewType::List,
            PreviewView::Media(_) => PreviewType::Media,
            PreviewView::Code(_) => PreviewType::Code,
            PreviewView::Card(_) => PreviewType::Card,
        }
    }
}

/// Select the renderer for `data.preview_type`. Unknown tags fall back to
/// the code view, which shows any payload losslessly.
pub fn render(data: &PreviewData, mode: Mode, opts: &PreviewOptions) -> PreviewView {
    match data.preview_type {
        PreviewType::Weather => PreviewView::Weather(weather::render(data, mode)),
        PreviewType::Map => PreviewView::Map(map::render(data, mode)),
        PreviewType::Chart => PreviewView::Chart(chart::render(data, mode)),
        PreviewType::List => PreviewView::List(list::render(data, mode)),
        PreviewType::Media => PreviewView::Media(media::render(data, mode)),
        PreviewType::Code => PreviewView::Code(code::render(data, mode)),
        PreviewType::Card => PreviewView::Card(card::render(data, mode, opts)),
        PreviewType::Unknown => {
            log::warn!("preview {}: unknown type, showing raw payload", data.id);
            PreviewView::Code(code::render(data, mode))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PreviewConfig;
    use serde_json::json;

    fn data(kind: PreviewType, sample: serde_json::Value) -> PreviewData {
        PreviewData {
            id: "x".into(),
            preview_type: kind,
            sample_response: sample,
            preview_config: PreviewConfig {
                title: "X".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn dispatch_matches_discriminant() {
        let opts = PreviewOptions::default();
        for kind in [
            PreviewType::Weather,
            PreviewType::Map,
            PreviewType::Chart,
            PreviewType::List,
            PreviewType::Media,
            PreviewType::Code,
            PreviewType::Card,
        ] {
            let view = render(&data(kind, json!({})), Mode::Full, &opts);
            assert_eq!(view.kind(), kind);
        }
    }

    #[test]
    fn unknown_type_falls_back_to_code() {
        let view = render(
            &data(PreviewType::Unknown, json!({"a": 1})),
            Mode::Compact,
            &PreviewOptions::default(),
        );
        assert_eq!(view.kind(), PreviewType::Code);
    }

    #[test]
    fn view_serializes_with_kind_tag() {
        let view = render(
            &data(PreviewType::Chart, json!({})),
            Mode::Full,
            &PreviewOptions::default(),
        );
        let v = serde_json::to_value(&view).unwrap();
        assert_eq!(v["kind"], "chart");
    }
}
