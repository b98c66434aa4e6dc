//! Dotted-path lookup and display formatting for untyped sample payloads.
//!
//! Everything here is total: a missing or mis-shaped path is an ordinary
//! outcome and formats as the placeholder.

use serde_json::Value;

/// Shown wherever a value is absent or null.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Walk `path` (split on `.`) through `doc`.
///
/// Objects are indexed by key and arrays by canonical decimal index. Any
/// other value along the way ends the walk with `None`.
pub fn resolve_key<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |cur, token| match cur {
        Value::Object(map) => map.get(token),
        Value::Array(items) => array_index(token).and_then(|i| items.get(i)),
        _ => None,
    })
}

fn array_index(token: &str) -> Option<usize> {
    if token.is_empty() || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Like [`resolve_key`] but treats an explicit `null` as absent.
pub fn resolve_present<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    resolve_key(doc, path).filter(|v| !v.is_null())
}

/// `stargazersCount` -> `Stargazers Count`, `front_default` -> `Front Default`.
pub fn format_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
            spaced.push(c);
        } else if c == '_' || c == '-' {
            spaced.push(' ');
        } else {
            spaced.push(c);
        }
    }

    let mut out = String::with_capacity(spaced.len());
    let mut prev_word = false;
    for c in spaced.chars() {
        let word = c.is_ascii_alphanumeric() || c == '_';
        if word && !prev_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_word = word;
    }
    out.trim().to_string()
}

/// Display form of an arbitrary sample value.
///
/// Order matters: numbers and booleans are matched before strings and
/// containers.
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::Number(n)) => locale_number(n.as_f64().unwrap_or(0.0)),
        Some(Value::Bool(b)) => (if *b { "Yes" } else { "No" }).to_string(),
        Some(Value::String(s)) => {
            let len = s.encode_utf16().count();
            if len > 0 && len < 200 {
                capitalize_first(s)
            } else {
                s.clone()
            }
        }
        Some(Value::Array(items)) => format!("{} items", items.len()),
        Some(obj @ Value::Object(_)) => serde_json::to_string(obj).unwrap_or_default(),
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// en-US grouping with at most three fraction digits.
pub fn locale_number(n: f64) -> String {
    if !n.is_finite() {
        return if n.is_nan() {
            "NaN".to_string()
        } else if n > 0.0 {
            "\u{221e}".to_string()
        } else {
            "-\u{221e}".to_string()
        };
    }

    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let negative = n < 0.0 && (int_part != "0" || !frac.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `1234567` -> `1.2M`, `4500` -> `4.5K`, otherwise grouped.
pub fn compact_number(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        locale_number(n)
    }
}

/// Shortest textual form of a number, integers without a fraction.
pub fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Plain string coercion used for labels and free-form fields.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => stringify_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Numeric coercion. Strings are parsed after trimming (empty is zero);
/// anything that does not yield a finite number becomes `0.0`.
pub fn to_number(value: Option<&Value>) -> f64 {
    let n = match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let t = s.trim();
            if t.is_empty() {
                0.0
            } else {
                t.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(_) => f64::NAN,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Round half up toward positive infinity.
pub fn round_half_up(n: f64) -> f64 {
    (n + 0.5).floor()
}
