//! Key/value card, with a dedicated layout for two-part jokes.

use serde::Serialize;
use serde_json::Value;

use super::{resolve_fields, resolve_str, Field, Mode, PreviewOptions};
use crate::types::PreviewData;

pub const NO_DATA: &str = "No preview data available.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum CardView {
    Joke {
        setup: String,
        delivery: String,
        /// Subtitle shown under the joke in full mode.
        footnote: Option<String>,
    },
    Fields {
        title: String,
        subtitle: Option<String>,
        image: Option<String>,
        fields: Vec<Field>,
        /// Shown when there is neither a field nor an image.
        fallback: Option<String>,
    },
}

/// `{ type: "twopart", setup: <string>, delivery: <string> }`
fn as_joke(doc: &Value) -> Option<(&str, &str)> {
    if doc.get("type").and_then(Value::as_str) != Some("twopart") {
        return None;
    }
    let setup = doc.get("setup")?.as_str()?;
    let delivery = doc.get("delivery")?.as_str()?;
    Some((setup, delivery))
}

pub fn render(data: &PreviewData, mode: Mode, opts: &PreviewOptions) -> CardView {
    let doc = &data.sample_response;
    let cfg = &data.preview_config;

    if let Some((setup, delivery)) = as_joke(doc) {
        return CardView::Joke {
            setup: setup.to_string(),
            delivery: delivery.to_string(),
            footnote: if mode.is_compact() {
                None
            } else {
                cfg.subtitle.clone()
            },
        };
    }

    let image = resolve_str(doc, cfg.image_key.as_deref());
    let mut fields = resolve_fields(doc, cfg.display_fields.as_deref());
    if mode.is_compact() {
        fields.truncate(opts.card_compact_fields);
    }

    let fallback = (fields.is_empty() && image.is_none())
        .then(|| cfg.subtitle.clone().unwrap_or_else(|| NO_DATA.to_string()));

    CardView::Fields {
        title: cfg.title.clone(),
        subtitle: cfg.subtitle.clone(),
        image,
        fields,
        fallback,
    }
}
