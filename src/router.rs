//! Deep link router.
//!
//! ## Routes
//!
//! - `/` (or empty) - catalog grid
//! - `/compare` - comparison view
//! - `/<slug>` - detail view for one API
//!
//! ## Accepted forms
//!
//! - Path only: `/open-meteo`
//! - Scheme, case-insensitive, any number of slashes: `apix://open-meteo`,
//!   `APIX:/open-meteo`
//! - Hash: `#/open-meteo`
//! - Query and fragment are stripped: `/open-meteo?ref=x#top`
//! - Segments are percent-decoded: `/pok%C3%A9api`

use crate::catalog::Catalog;
use crate::types::EntryRef;

pub const NOT_FOUND_MESSAGE: &str = "API not found";

#[inline]
fn strip_query_frag(s: &str) -> &str {
    match s.find(['?', '#']) {
        Some(i) => &s[..i],
        None => s,
    }
}

/// Path after an `apix:` scheme, if present.
#[inline]
fn after_apix_scheme(raw: &str) -> Option<&str> {
    let (scheme, rest) = raw.split_once(':')?;
    scheme
        .eq_ignore_ascii_case("apix")
        .then(|| rest.trim_start_matches('/'))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Compare,
    Detail { slug: String },
}

impl Route {
    /// Canonical path form.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Compare => "/compare".to_string(),
            Route::Detail { slug } => format!("/{slug}"),
        }
    }
}

/// Parse a route. Returns `None` for paths with more than one segment or
/// segments that are not valid percent-encoded UTF-8.
pub fn parse(raw: &str) -> Option<Route> {
    let s = raw.trim();

    let path = if let Some(rest) = after_apix_scheme(s) {
        rest
    } else if let Some(rest) = s.strip_prefix("#/") {
        rest
    } else {
        s.trim_start_matches('/')
    };

    let path = strip_query_frag(path);
    let mut segments = path.split('/').filter(|seg| !seg.is_empty());

    let Some(first) = segments.next() else {
        return Some(Route::Home);
    };
    if segments.next().is_some() {
        log::debug!("route {raw:?}: too many segments");
        return None;
    }

    let segment = urlencoding::decode(first).ok()?.into_owned();
    if segment.eq_ignore_ascii_case("compare") {
        Some(Route::Compare)
    } else {
        Some(Route::Detail { slug: segment })
    }
}

/// What a route points at once looked up in the catalog.
#[derive(Clone, Debug)]
pub enum Resolved {
    Home,
    Compare,
    Detail(EntryRef),
    NotFound { slug: String },
}

impl Resolved {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolved::NotFound { .. })
    }
}

pub fn resolve(route: &Route, catalog: &Catalog) -> Resolved {
    match route {
        Route::Home => Resolved::Home,
        Route::Compare => Resolved::Compare,
        Route::Detail { slug } => match catalog.by_slug(slug) {
            Some(entry) => Resolved::Detail(entry),
            None => {
                log::debug!("no entry for slug {slug:?}");
                Resolved::NotFound { slug: slug.clone() }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthKind, CatalogEntry, CorsStatus};

    fn detail(slug: &str) -> Option<Route> {
        Some(Route::Detail {
            slug: slug.to_string(),
        })
    }

    #[test]
    fn test_parse_home() {
        assert_eq!(parse(""), Some(Route::Home));
        assert_eq!(parse("/"), Some(Route::Home));
        assert_eq!(parse("apix://"), Some(Route::Home));
        assert_eq!(parse("#/"), Some(Route::Home));
        assert_eq!(parse("/?q=weather"), Some(Route::Home));
    }

    #[test]
    fn test_parse_detail_forms() {
        assert_eq!(parse("/open-meteo"), detail("open-meteo"));
        assert_eq!(parse("open-meteo"), detail("open-meteo"));
        assert_eq!(parse("#/open-meteo"), detail("open-meteo"));
        assert_eq!(parse("apix://open-meteo"), detail("open-meteo"));
        assert_eq!(parse("  /open-meteo/  "), detail("open-meteo"));
    }

    #[test]
    fn test_parse_case_insensitive_scheme() {
        assert_eq!(parse("APIX://dog-ceo"), detail("dog-ceo"));
        assert_eq!(parse("Apix:/dog-ceo"), detail("dog-ceo"));
        assert_eq!(parse("apix:////dog-ceo"), detail("dog-ceo"));
    }

    #[test]
    fn test_parse_query_and_fragment() {
        assert_eq!(parse("/jokeapi?utm=1"), detail("jokeapi"));
        assert_eq!(parse("apix://jokeapi#frag"), detail("jokeapi"));
        assert_eq!(parse("/compare?ref=ext#x"), Some(Route::Compare));
    }

    #[test]
    fn test_parse_percent_decoding() {
        assert_eq!(parse("/pok%C3%A9api"), detail("pok\u{e9}api"));
        assert_eq!(parse("/%FF"), None);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse("/a/b"), None);
        assert_eq!(parse("apix://compare/extra"), None);
    }

    #[test]
    fn test_path_round_trips() {
        for r in [Route::Home, Route::Compare, Route::Detail { slug: "ip-api".into() }] {
            assert_eq!(parse(&r.path()), Some(r));
        }
    }

    #[test]
    fn test_resolve_unknown_slug_is_not_found() {
        let catalog = Catalog::from_parts(
            vec![CatalogEntry {
                name: "IP API".into(),
                description: String::new(),
                auth: AuthKind::None,
                https: false,
                cors: CorsStatus::Unknown,
                link: "http://ip-api.com".into(),
                category: "Geocoding".into(),
            }],
            Vec::new(),
        );
        match resolve(&Route::Detail { slug: "ip-api".into() }, &catalog) {
            Resolved::Detail(e) => assert_eq!(e.name(), "IP API"),
            other => panic!("Expected detail, got {other:?}"),
        }
        let missing = resolve(&Route::Detail { slug: "nope".into() }, &catalog);
        assert!(missing.is_not_found());
        assert!(matches!(resolve(&Route::Home, &catalog), Resolved::Home));
    }
}
