//! Query language for the catalog grid.
//!
//! Bare words are free text: every word must occur in the entry's name,
//! description or category. `key:value` tokens narrow by facet, with comma
//! meaning OR inside one facet:
//!
//! - `auth:free|apikey|oauth|any`
//! - `https:yes|any`
//! - `cors:yes|no|unknown|any`
//! - `cat:<chip>` (e.g. `cat:finance`, `cat:dev-tools`)

use crate::categories::{categories_for_chip, find_chip};
use crate::types::{ApiEntry, AuthKind, CorsStatus, EntryRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFacet {
    Free,
    ApiKey,
    OAuth,
    /// Any other value, compared against the raw auth field (lowercased).
    Other(String),
}

impl AuthFacet {
    fn parse(v: &str) -> Self {
        match v {
            "free" | "none" | "no" => AuthFacet::Free,
            "apikey" | "key" => AuthFacet::ApiKey,
            "oauth" => AuthFacet::OAuth,
            other => AuthFacet::Other(other.to_string()),
        }
    }

    fn accepts(&self, auth: &AuthKind) -> bool {
        match self {
            AuthFacet::Free => auth.is_free(),
            AuthFacet::ApiKey => matches!(auth, AuthKind::ApiKey),
            AuthFacet::OAuth => matches!(auth, AuthKind::OAuth),
            AuthFacet::Other(v) => auth.as_str().eq_ignore_ascii_case(v),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    pub auth: Vec<AuthFacet>,
    pub https_only: bool,
    pub cors: Vec<CorsStatus>,
    /// Canonical chip labels.
    pub chips: Vec<&'static str>,
    pub free: Vec<String>,
}

pub fn compile_filter(q: &str) -> CompiledFilter {
    let mut f = CompiledFilter::default();
    for tok in q.split_whitespace() {
        let mut it = tok.splitn(2, ':');
        if let (Some(k), Some(v)) = (it.next(), it.next()) {
            push(&mut f, k, v);
        } else {
            f.free.push(tok.to_lowercase());
        }
    }
    f
}

fn push(f: &mut CompiledFilter, k: &str, v: &str) {
    let values: Vec<String> = v
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    // "any" anywhere in a facet lifts the restriction
    let any = values.iter().any(|s| s == "any");

    match &*k.to_lowercase() {
        "auth" => {
            if !any {
                f.auth.extend(values.iter().map(|s| AuthFacet::parse(s)));
            }
        }
        "https" => {
            if !any && values.iter().any(|s| s == "yes" || s == "true") {
                f.https_only = true;
            }
        }
        "cors" => {
            if !any {
                f.cors.extend(values.iter().map(|s| CorsStatus::from(s.clone())));
            }
        }
        "cat" | "category" => {
            for s in &values {
                match find_chip(&s.replace('-', " ")).or_else(|| find_chip(s)) {
                    Some("All") | None => {}
                    Some(chip) => f.chips.push(chip),
                }
            }
        }
        _ => f
            .free
            .extend(values.into_iter().map(|v| format!("{k}:{v}").to_lowercase())),
    }
}

pub fn is_empty(f: &CompiledFilter) -> bool {
    f.auth.is_empty() && !f.https_only && f.cors.is_empty() && f.chips.is_empty() && f.free.is_empty()
}

fn chip_accepts(chip: &str, category: &str) -> bool {
    categories_for_chip(chip).map_or(true, |cats| cats.contains(&category))
}

pub fn entry_matches_filter(entry: &ApiEntry, f: &CompiledFilter) -> bool {
    if is_empty(f) {
        return true;
    }
    let c = &entry.catalog;

    if !f.auth.is_empty() && !f.auth.iter().any(|a| a.accepts(&c.auth)) {
        return false;
    }
    if f.https_only && !c.https {
        return false;
    }
    if !f.cors.is_empty() && !f.cors.contains(&c.cors) {
        return false;
    }
    if !f.chips.is_empty() && !f.chips.iter().any(|chip| chip_accepts(chip, &c.category)) {
        return false;
    }

    if !f.free.is_empty() {
        let hay = format!("{} {} {}", c.name, c.description, c.category).to_lowercase();
        if !f.free.iter().all(|t| hay.contains(t.as_str())) {
            return false;
        }
    }
    true
}

/// Entries matching `query` and the active category chip, in input order.
pub fn search(entries: &[EntryRef], query: &str, chip: &str) -> Vec<EntryRef> {
    search_compiled(entries, &compile_filter(query), chip)
}

pub fn search_compiled(entries: &[EntryRef], f: &CompiledFilter, chip: &str) -> Vec<EntryRef> {
    entries
        .iter()
        .filter(|e| chip_accepts(chip, e.category()))
        .filter(|e| entry_matches_filter(e, f))
        .cloned()
        .collect()
}

/// Grid order: entries with a preview first, then by name ignoring case.
pub fn sort_entries(entries: &mut [EntryRef]) {
    entries.sort_by(|a, b| {
        b.has_preview()
            .cmp(&a.has_preview())
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
    });
}
