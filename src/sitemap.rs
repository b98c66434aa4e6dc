//! `sitemap.xml` for the hosted explorer.

use std::fmt::Write;

struct UrlEntry<'a> {
    loc: String,
    lastmod: &'a str,
    changefreq: &'static str,
    priority: &'static str,
}

fn push_url(out: &mut String, u: &UrlEntry<'_>) {
    let _ = write!(
        out,
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
        xml_escape(&u.loc),
        u.lastmod,
        u.changefreq,
        u.priority
    );
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Absolute page URL of one entry on the hosted explorer.
pub fn page_url(base_url: &str, slug: &str) -> String {
    format!("{}/{slug}", base_url.trim_end_matches('/'))
}

/// Home page (weekly, 1.0) followed by one URL per slug (monthly, 0.7).
/// `lastmod` is a `YYYY-MM-DD` date.
pub fn generate(base_url: &str, slugs: &[String], lastmod: &str) -> String {
    let base = base_url.trim_end_matches('/');

    let mut urls = Vec::with_capacity(slugs.len() + 1);
    urls.push(UrlEntry {
        loc: base.to_string(),
        lastmod,
        changefreq: "weekly",
        priority: "1.0",
    });
    urls.extend(slugs.iter().map(|slug| UrlEntry {
        loc: page_url(base, slug),
        lastmod,
        changefreq: "monthly",
        priority: "0.7",
    }));

    let mut body = String::new();
    for (i, u) in urls.iter().enumerate() {
        if i > 0 {
            body.push('\n');
        }
        push_url(&mut body, u);
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{body}\n</urlset>\n"
    )
}

/// Number of `<url>` elements [`generate`] emits for `slug_count` slugs.
pub fn url_count(slug_count: usize) -> usize {
    slug_count + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_first_then_slugs() {
        let xml = generate(
            "https://example.dev/",
            &["open-meteo".to_string(), "dog-ceo".to_string()],
            "2026-01-02",
        );
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert!(xml.ends_with("</urlset>\n"));
        assert_eq!(xml.matches("<url>").count(), url_count(2));

        let home = xml.find("<loc>https://example.dev</loc>").unwrap();
        let meteo = xml.find("<loc>https://example.dev/open-meteo</loc>").unwrap();
        let dog = xml.find("<loc>https://example.dev/dog-ceo</loc>").unwrap();
        assert!(home < meteo && meteo < dog);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 1);
        assert_eq!(xml.matches("<priority>0.7</priority>").count(), 2);
        assert_eq!(xml.matches("<lastmod>2026-01-02</lastmod>").count(), 3);
    }

    #[test]
    fn empty_catalog_still_has_home() {
        let xml = generate("https://example.dev", &[], "2026-01-02");
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn escapes_locations() {
        let xml = generate("https://example.dev?a=1&b=2", &[], "2026-01-02");
        assert!(xml.contains("a=1&amp;b=2"));
    }
}
