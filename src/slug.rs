//! Slug derivation used for routing and for joining previews to entries.

/// Lowercase, collapse every run of non-alphanumeric characters to a single
/// `-`, then trim hyphens from both ends.
///
/// Distinct names may collide; lookups compare slugs with plain equality.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_collapses_to_single_hyphen() {
        assert_eq!(slugify("Open-Meteo API!"), "open-meteo-api");
    }

    #[test]
    fn leading_and_trailing_runs_are_trimmed() {
        assert_eq!(slugify("  --Dog CEO--  "), "dog-ceo");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn non_ascii_letters_act_as_separators() {
        assert_eq!(slugify("PokéAPI"), "pok-api");
    }

    #[test]
    fn collisions_are_allowed() {
        assert_eq!(slugify("REST Countries"), slugify("rest_countries"));
    }
}
