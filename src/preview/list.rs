//! Row list with primary text, secondary text, a numeric badge and an
//! optional flag image per item.

use serde::Serialize;
use serde_json::{Map, Value};

use super::Mode;
use crate::resolve::{compact_number, stringify_value, PLACEHOLDER};
use crate::types::PreviewData;

const PRIMARY_KEYS: &[&str] = &["name", "title", "label", "text", "activity"];
const BADGE_KEYS: &[&str] = &["score", "stars", "stargazers_count", "population", "points"];
const SECONDARY_KEYS: &[&str] = &["author", "by", "language", "capital", "region"];
const IMAGE_KEYS: &[&str] = &["flag", "flags"];

pub const COMPACT_ROWS: usize = 3;
pub const EMPTY_MESSAGE: &str = "No items to display.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub primary: String,
    pub secondary: Option<String>,
    pub badge: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ListView {
    Empty {
        title: String,
        message: String,
    },
    Rows {
        title: String,
        /// `"N items"` header, full mode only.
        count_label: Option<String>,
        rows: Vec<ListRow>,
        /// Items left out of a compact list.
        more: Option<usize>,
        total: usize,
    },
}

impl ListView {
    pub fn more_text(n: usize) -> String {
        format!("and {n} more...")
    }
}

/// First candidate key present with a non-null value.
fn find_field<'a>(item: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .find_map(|k| item.get(*k).filter(|v| !v.is_null()))
}

fn explicit<'a>(item: &'a Map<String, Value>, key: Option<&str>) -> Option<&'a Value> {
    key.and_then(|k| item.get(k)).filter(|v| !v.is_null())
}

fn primary_text(item: &Map<String, Value>, item_key: Option<&str>) -> String {
    if let Some(s) = item_key.and_then(|k| item.get(k)).and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(s) = PRIMARY_KEYS
        .iter()
        .find_map(|k| item.get(*k).and_then(Value::as_str))
    {
        return s.to_string();
    }
    item.values()
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn badge_text(v: &Value) -> String {
    match v.as_f64() {
        Some(n) => compact_number(n),
        None => stringify_value(v),
    }
}

/// A URL string, or an object with `png` (preferred) or `svg`.
pub fn flag_url(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => o
            .get("png")
            .and_then(Value::as_str)
            .or_else(|| o.get("svg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

fn row(item: &Value, data: &PreviewData, mode: Mode) -> ListRow {
    let cfg = &data.preview_config;
    let Some(obj) = item.as_object() else {
        let primary = item
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        return ListRow {
            primary,
            secondary: None,
            badge: None,
            image: None,
        };
    };

    let badge = explicit(obj, cfg.badge_key.as_deref()).or_else(|| find_field(obj, BADGE_KEYS));
    let secondary = if mode.is_compact() {
        None
    } else {
        explicit(obj, cfg.secondary_key.as_deref()).or_else(|| find_field(obj, SECONDARY_KEYS))
    };

    ListRow {
        primary: primary_text(obj, cfg.item_key.as_deref()),
        secondary: secondary.map(stringify_value),
        badge: badge.map(badge_text),
        image: find_field(obj, IMAGE_KEYS).and_then(flag_url),
    }
}

/// `previewConfig.items` if set, else `sampleResponse.items` when it is an
/// array, else nothing.
fn source_items(data: &PreviewData) -> &[Value] {
    if let Some(items) = &data.preview_config.items {
        return items;
    }
    data.sample_response
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn render(data: &PreviewData, mode: Mode) -> ListView {
    let title = data.preview_config.title.clone();
    let items = source_items(data);
    if items.is_empty() {
        return ListView::Empty {
            title,
            message: EMPTY_MESSAGE.to_string(),
        };
    }

    let total = items.len();
    let visible = if mode.is_compact() {
        &items[..total.min(COMPACT_ROWS)]
    } else {
        items
    };
    let rows = visible.iter().map(|i| row(i, data, mode)).collect::<Vec<_>>();
    let remaining = total - rows.len();

    ListView::Rows {
        title,
        count_label: (!mode.is_compact())
            .then(|| format!("{total} {}", if total == 1 { "item" } else { "items" })),
        rows,
        more: (remaining > 0).then_some(remaining),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PreviewConfig, PreviewType};
    use serde_json::json;

    fn list(sample: Value, cfg: PreviewConfig) -> PreviewData {
        PreviewData {
            id: "list".into(),
            preview_type: PreviewType::List,
            sample_response: sample,
            preview_config: cfg,
        }
    }

    fn rows(view: ListView) -> Vec<ListRow> {
        match view {
            ListView::Rows { rows, .. } => rows,
            other => panic!("Expected rows, got {other:?}"),
        }
    }

    #[test]
    fn name_beats_title_and_png_flag_resolves() {
        let data = list(
            json!({"items": [{
                "title": "Ignored",
                "name": "Japan",
                "flags": {"svg": "https://flags/jp.svg", "png": "https://flags/jp.png"},
                "population": 125_700_000,
                "capital": "Tokyo"
            }]}),
            PreviewConfig::default(),
        );
        let r = &rows(render(&data, Mode::Full))[0];
        assert_eq!(r.primary, "Japan");
        assert_eq!(r.image.as_deref(), Some("https://flags/jp.png"));
        assert_eq!(r.badge.as_deref(), Some("125.7M"));
        assert_eq!(r.secondary.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn inline_items_override_sample() {
        let data = list(
            json!({"items": [{"name": "from sample"}]}),
            PreviewConfig {
                items: Some(vec![json!({"name": "inline"})]),
                ..Default::default()
            },
        );
        assert_eq!(rows(render(&data, Mode::Full))[0].primary, "inline");
    }

    #[test]
    fn non_array_items_is_empty_state() {
        let data = list(json!({"items": {"a": 1}}), PreviewConfig::default());
        assert!(matches!(render(&data, Mode::Full), ListView::Empty { .. }));
        let data = list(json!([]), PreviewConfig::default());
        match render(&data, Mode::Compact) {
            ListView::Empty { message, .. } => assert_eq!(message, EMPTY_MESSAGE),
            other => panic!("Expected empty, got {other:?}"),
        }
    }

    #[test]
    fn compact_shows_three_and_counts_the_rest() {
        let items: Vec<Value> = (0..5).map(|i| json!({"title": format!("t{i}"), "by": "pg"})).collect();
        let data = list(json!({ "items": items }), PreviewConfig::default());
        match render(&data, Mode::Compact) {
            ListView::Rows {
                rows,
                more,
                count_label,
                ..
            } => {
                assert_eq!(rows.len(), 3);
                assert_eq!(more, Some(2));
                assert!(count_label.is_none());
                assert!(rows.iter().all(|r| r.secondary.is_none()));
            }
            other => panic!("Expected rows, got {other:?}"),
        }
        assert_eq!(ListView::more_text(2), "and 2 more...");
    }

    #[test]
    fn full_count_label_singular_and_plural() {
        let one = list(json!({"items": [{"name": "a"}]}), PreviewConfig::default());
        match render(&one, Mode::Full) {
            ListView::Rows { count_label, more, .. } => {
                assert_eq!(count_label.as_deref(), Some("1 item"));
                assert!(more.is_none());
            }
            other => panic!("Expected rows, got {other:?}"),
        }
        let two = list(json!({"items": [{"name": "a"}, {"name": "b"}]}), PreviewConfig::default());
        match render(&two, Mode::Full) {
            ListView::Rows { count_label, .. } => assert_eq!(count_label.as_deref(), Some("2 items")),
            other => panic!("Expected rows, got {other:?}"),
        }
    }

    #[test]
    fn explicit_keys_and_fallbacks() {
        let data = list(
            json!({"items": [
                {"repo": "ratatui", "owner": "orhun", "stars": 4200, "lang": "Rust"},
                {"id": 3, "note": "", "desc": "first non-empty"},
                {"id": 4}
            ]}),
            PreviewConfig {
                item_key: Some("repo".into()),
                secondary_key: Some("lang".into()),
                badge_key: Some("missing".into()),
                ..Default::default()
            },
        );
        let r = rows(render(&data, Mode::Full));
        assert_eq!(r[0].primary, "ratatui");
        assert_eq!(r[0].secondary.as_deref(), Some("Rust"));
        assert_eq!(r[0].badge.as_deref(), Some("4.2K"));
        assert_eq!(r[1].primary, "first non-empty");
        assert_eq!(r[2].primary, "\u{2014}");
        assert!(r[2].badge.is_none());
    }

    #[test]
    fn flag_url_shapes() {
        assert_eq!(flag_url(&json!("u")).as_deref(), Some("u"));
        assert_eq!(flag_url(&json!({"svg": "s"})).as_deref(), Some("s"));
        assert_eq!(flag_url(&json!({"other": "x"})), None);
        assert_eq!(flag_url(&json!(3)), None);
    }
}
