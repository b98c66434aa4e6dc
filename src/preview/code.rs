//! Pretty-printed, highlighted JSON of the whole sample.

use serde::Serialize;

use super::Mode;
use crate::highlight::Token;
use crate::json_syntax::tokenize_line;
use crate::types::PreviewData;

/// Lines kept by the compact view.
pub const COMPACT_LINES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeLine {
    pub number: usize,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeView {
    pub title: String,
    pub mode: Mode,
    pub lines: Vec<CodeLine>,
    /// Total line count before any truncation.
    pub total_lines: usize,
    /// Compact view cut lines off; draw a fade at the bottom.
    pub truncated: bool,
    pub line_numbers: bool,
}

/// Two-space indented JSON text of the sample.
pub fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

pub fn render(data: &PreviewData, mode: Mode) -> CodeView {
    let text = pretty_json(&data.sample_response);
    let all: Vec<&str> = text.split('\n').collect();
    let total = all.len();
    let keep = if mode.is_compact() {
        total.min(COMPACT_LINES)
    } else {
        total
    };

    CodeView {
        title: data.preview_config.title.clone(),
        mode,
        lines: all[..keep]
            .iter()
            .enumerate()
            .map(|(i, l)| CodeLine {
                number: i + 1,
                tokens: tokenize_line(l),
            })
            .collect(),
        total_lines: total,
        truncated: keep < total,
        line_numbers: !mode.is_compact(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{line_text, TokenKind};
    use crate::types::{PreviewConfig, PreviewType};
    use serde_json::json;

    fn code(sample: serde_json::Value) -> PreviewData {
        PreviewData {
            id: "jsonplaceholder".into(),
            preview_type: PreviewType::Code,
            sample_response: sample,
            preview_config: PreviewConfig {
                title: "GET /posts/1".into(),
                ..Default::default()
            },
        }
    }

    fn sample() -> serde_json::Value {
        json!({"userId": 1, "id": 1, "title": "sunt aut", "body": "quia et", "tags": ["a", "b"], "draft": false, "meta": null})
    }

    #[test]
    fn compact_keeps_six_lines_and_flags_truncation() {
        let v = render(&code(sample()), Mode::Compact);
        assert_eq!(v.lines.len(), COMPACT_LINES);
        assert!(v.truncated);
        assert!(!v.line_numbers);
        assert!(v.total_lines > COMPACT_LINES);
    }

    #[test]
    fn full_keeps_everything_with_numbers() {
        let v = render(&code(sample()), Mode::Full);
        assert_eq!(v.lines.len(), v.total_lines);
        assert!(!v.truncated);
        assert!(v.line_numbers);
        assert_eq!(v.lines[0].number, 1);
        assert_eq!(line_text(&v.lines[1].tokens), "  \"userId\": 1,");
        assert_eq!(v.lines[1].tokens[1].kind, TokenKind::Key);
    }

    #[test]
    fn short_payload_is_not_truncated() {
        let v = render(&code(json!({"ok": true})), Mode::Compact);
        assert_eq!(v.lines.len(), 3);
        assert!(!v.truncated);
    }
}
