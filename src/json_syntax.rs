//! JSON syntax highlighting.
//!
//! One ordered alternation classifies each token: object key, string,
//! boolean, null, number. Earlier alternatives win, so a quoted key followed
//! by `:` is never reported as a plain string.

use ratatui::text::Line;
use regex::Regex;
use std::sync::OnceLock;

use crate::highlight::{to_line, Token, TokenKind};

fn json_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"("(?:\\.|[^"\\])*"\s*:)|("(?:\\.|[^"\\])*")|(true|false)|(null)|(-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)"#,
        )
        .expect("static JSON token pattern")
    })
}

/// Tokenize one line of pretty-printed JSON.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in json_token_regex().captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            out.push(Token::plain(&line[last..whole.start()]));
        }

        if caps.get(1).is_some() {
            // Key: color the quoted name, keep the colon (and any spacing) plain.
            let text = whole.as_str();
            let colon = text.rfind(':').unwrap_or(text.len());
            out.push(Token::new(TokenKind::Key, text[..colon].trim_end()));
            let rest_start = text[..colon].trim_end().len();
            out.push(Token::plain(&text[rest_start..]));
        } else {
            let kind = if caps.get(2).is_some() {
                TokenKind::String
            } else if caps.get(3).is_some() {
                TokenKind::Boolean
            } else if caps.get(4).is_some() {
                TokenKind::Null
            } else {
                TokenKind::Number
            };
            out.push(Token::new(kind, whole.as_str()));
        }
        last = whole.end();
    }

    if last < line.len() {
        out.push(Token::plain(&line[last..]));
    }
    out
}

/// Tokenize a multi-line JSON text, one token run per line.
pub fn tokenize(json: &str) -> Vec<Vec<Token>> {
    json.split('\n').map(tokenize_line).collect()
}

/// Colored lines ready for a `Paragraph`.
pub fn colorize_json(json: &str) -> Vec<Line<'static>> {
    tokenize(json).iter().map(|t| to_line(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::line_text;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Plain)
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn key_and_value_are_distinguished() {
        let toks = tokenize_line(r#"  "name": "Alice","#);
        assert_eq!(kinds(&toks), vec![TokenKind::Key, TokenKind::String]);
        assert_eq!(toks[1].text, "\"name\"");
        assert_eq!(line_text(&toks), r#"  "name": "Alice","#);
    }

    #[test]
    fn literals_and_numbers() {
        let toks = tokenize_line(r#"[true, false, null, -12.5e3, 7]"#);
        assert_eq!(
            kinds(&toks),
            vec![
                TokenKind::Boolean,
                TokenKind::Boolean,
                TokenKind::Null,
                TokenKind::Number,
                TokenKind::Number
            ]
        );
    }

    #[test]
    fn escaped_quotes_stay_inside_string() {
        let toks = tokenize_line(r#""say \"hi\"""#);
        assert_eq!(kinds(&toks), vec![TokenKind::String]);
    }

    #[test]
    fn multiline_json() {
        let json = "{\n  \"name\": \"Alice\",\n  \"active\": true,\n  \"count\": 42\n}";
        let lines = colorize_json(json);
        assert_eq!(lines.len(), 5);
        assert!(lines[1].spans.len() > 1);
    }
}
