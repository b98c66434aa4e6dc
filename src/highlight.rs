//! Token model shared by the JSON and snippet colorizers, plus the
//! conversion to styled ratatui lines.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Plain,
    Key,
    String,
    Number,
    Boolean,
    Null,
    Keyword,
    Builtin,
    Method,
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Plain, text)
    }
}

/// A claimed byte range inside one line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Claim {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

/// Turn non-overlapping claims into a token run covering the whole line.
/// Gaps become `Plain` tokens; empty pieces are dropped.
pub(crate) fn tokens_from_claims(line: &str, mut claims: Vec<Claim>) -> Vec<Token> {
    claims.sort_by_key(|c| c.start);
    let mut out = Vec::with_capacity(claims.len() * 2 + 1);
    let mut pos = 0;
    for c in claims {
        if c.start > pos {
            out.push(Token::plain(&line[pos..c.start]));
        }
        if c.end > c.start {
            out.push(Token::new(c.kind, &line[c.start..c.end]));
        }
        pos = c.end;
    }
    if pos < line.len() {
        out.push(Token::plain(&line[pos..]));
    }
    out
}

pub(crate) fn overlaps(claims: &[Claim], start: usize, end: usize) -> bool {
    claims.iter().any(|c| start < c.end && c.start < end)
}

/// Foreground palette: light tints that read well on dark panes.
pub fn style_for(kind: TokenKind) -> Style {
    let fg = match kind {
        TokenKind::Plain => return Style::default(),
        TokenKind::Key => Color::Rgb(180, 220, 230),
        TokenKind::String => Color::Rgb(134, 222, 128),
        TokenKind::Number => Color::Rgb(230, 200, 140),
        TokenKind::Boolean => Color::Rgb(200, 170, 250),
        TokenKind::Null => Color::Rgb(150, 150, 150),
        TokenKind::Keyword => Color::Rgb(192, 132, 252),
        TokenKind::Builtin | TokenKind::Flag => Color::Rgb(96, 165, 250),
        TokenKind::Method => Color::Rgb(251, 191, 36),
    };
    let style = Style::default().fg(fg);
    if kind == TokenKind::Null {
        style.add_modifier(Modifier::ITALIC)
    } else {
        style
    }
}

pub fn to_line(tokens: &[Token]) -> Line<'static> {
    Line::from(
        tokens
            .iter()
            .map(|t| Span::styled(t.text.clone(), style_for(t.kind)))
            .collect::<Vec<_>>(),
    )
}

/// Concatenated text of a token run.
pub fn line_text(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_fill_gaps_with_plain() {
        let line = "say \"hi\" now";
        let toks = tokens_from_claims(
            line,
            vec![Claim {
                start: 4,
                end: 8,
                kind: TokenKind::String,
            }],
        );
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[1], Token::new(TokenKind::String, "\"hi\""));
        assert_eq!(line_text(&toks), line);
    }

    #[test]
    fn plain_tokens_are_unstyled() {
        assert_eq!(style_for(TokenKind::Plain), Style::default());
        assert_ne!(style_for(TokenKind::Key), Style::default());
        let line = to_line(&[Token::plain("a"), Token::new(TokenKind::Number, "1")]);
        assert_eq!(line.spans.len(), 2);
    }
}
