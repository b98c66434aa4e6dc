//! Example request snippets built from catalog metadata, and their
//! per-language colorizers.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::highlight::{overlaps, tokens_from_claims, Claim, Token, TokenKind};
use crate::types::{ApiEntry, AuthKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnippetLang {
    #[default]
    Curl,
    JavaScript,
    Python,
}

impl SnippetLang {
    pub const ALL: [SnippetLang; 3] = [SnippetLang::Curl, SnippetLang::JavaScript, SnippetLang::Python];

    pub fn label(&self) -> &'static str {
        match self {
            SnippetLang::Curl => "cURL",
            SnippetLang::JavaScript => "JavaScript",
            SnippetLang::Python => "Python",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            SnippetLang::Curl => "request.sh",
            SnippetLang::JavaScript => "request.js",
            SnippetLang::Python => "request.py",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SnippetLang::Curl => SnippetLang::JavaScript,
            SnippetLang::JavaScript => SnippetLang::Python,
            SnippetLang::Python => SnippetLang::Curl,
        }
    }
}

impl fmt::Display for SnippetLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Placeholder header implied by the entry's auth requirement.
pub fn auth_header(auth: &AuthKind) -> Option<(&'static str, &'static str)> {
    match auth {
        AuthKind::None => None,
        AuthKind::ApiKey | AuthKind::Other(_) => Some(("X-Api-Key", "YOUR_API_KEY")),
        AuthKind::OAuth => Some(("Authorization", "Bearer YOUR_ACCESS_TOKEN")),
        AuthKind::MashapeKey => Some(("X-Mashape-Key", "YOUR_API_KEY")),
        AuthKind::UserAgent => Some(("User-Agent", "apix-example/1.0")),
    }
}

fn headers(entry: &ApiEntry) -> Vec<(&'static str, &'static str)> {
    let mut h = vec![("Accept", "application/json")];
    h.extend(auth_header(&entry.catalog.auth));
    h
}

fn quoted_url(entry: &ApiEntry) -> String {
    entry.catalog.link.replace('"', "%22")
}

pub fn generate(entry: &ApiEntry, lang: SnippetLang) -> String {
    match lang {
        SnippetLang::Curl => curl(entry),
        SnippetLang::JavaScript => javascript(entry),
        SnippetLang::Python => python(entry),
    }
}

fn curl(entry: &ApiEntry) -> String {
    let hs = headers(entry);
    let mut out = format!("curl -X GET \"{}\"", quoted_url(entry));
    for (name, value) in hs {
        out.push_str(&format!(" \\\n  -H \"{name}: {value}\""));
    }
    out
}

fn javascript(entry: &ApiEntry) -> String {
    let mut out = format!(
        "const response = await fetch(\"{}\", {{\n  headers: {{\n",
        quoted_url(entry)
    );
    for (name, value) in headers(entry) {
        out.push_str(&format!("    \"{name}\": \"{value}\",\n"));
    }
    out.push_str("  },\n});\nconst data = await response.json();\nconsole.log(data);");
    out
}

fn python(entry: &ApiEntry) -> String {
    let mut out = format!(
        "import requests\n\nresponse = requests.get(\n    \"{}\",\n    headers={{\n",
        quoted_url(entry)
    );
    for (name, value) in headers(entry) {
        out.push_str(&format!("        \"{name}\": \"{value}\",\n"));
    }
    out.push_str("    },\n)\nprint(response.json())");
    out
}

struct Rule {
    re: Regex,
    kind: TokenKind,
    /// Capture group holding the colored part (0 = whole match).
    group: usize,
}

fn rule(pattern: &str, kind: TokenKind, group: usize) -> Rule {
    Rule {
        re: Regex::new(pattern).expect("static snippet pattern"),
        kind,
        group,
    }
}

/// Rules in claim order. Strings go first so keywords inside quoted text
/// stay part of the string.
fn rules(lang: SnippetLang) -> &'static [Rule] {
    static CURL: OnceLock<Vec<Rule>> = OnceLock::new();
    static JS: OnceLock<Vec<Rule>> = OnceLock::new();
    static PY: OnceLock<Vec<Rule>> = OnceLock::new();

    let string = r#""[^"]*""#;
    match lang {
        SnippetLang::Curl => CURL.get_or_init(|| {
            vec![
                rule(string, TokenKind::String, 0),
                rule(r"^curl\b", TokenKind::Keyword, 0),
                rule(r"-X\s+(GET|POST|PUT|DELETE)", TokenKind::Method, 1),
                rule(r"(-H)\s", TokenKind::Flag, 1),
                rule(r"(-X)\s", TokenKind::Flag, 1),
            ]
        }),
        SnippetLang::JavaScript => JS.get_or_init(|| {
            vec![
                rule(string, TokenKind::String, 0),
                rule(r"\b(const|let|var|await|async|function)\b", TokenKind::Keyword, 1),
                rule(r"\b(fetch|console|response|JSON)\b", TokenKind::Builtin, 1),
                rule(r"\.(json|log|stringify)\b", TokenKind::Method, 1),
            ]
        }),
        SnippetLang::Python => PY.get_or_init(|| {
            vec![
                rule(string, TokenKind::String, 0),
                rule(r"^(import|from)\b", TokenKind::Keyword, 1),
                rule(r"\b(requests|response|print)\b", TokenKind::Builtin, 1),
                rule(r"\.(get|post|json)\b", TokenKind::Method, 1),
            ]
        }),
    }
}

/// Tokenize one snippet line.
pub fn colorize_line(line: &str, lang: SnippetLang) -> Vec<Token> {
    let mut claims: Vec<Claim> = Vec::new();
    for r in rules(lang) {
        for caps in r.re.captures_iter(line) {
            let Some(m) = caps.get(r.group) else { continue };
            if !overlaps(&claims, m.start(), m.end()) {
                claims.push(Claim {
                    start: m.start(),
                    end: m.end(),
                    kind: r.kind,
                });
            }
        }
    }
    tokens_from_claims(line, claims)
}

pub fn colorize(code: &str, lang: SnippetLang) -> Vec<Vec<Token>> {
    code.split('\n').map(|l| colorize_line(l, lang)).collect()
}
