//! Category taxonomy: emoji per catalog category and the filter chips shown
//! above the catalog grid.

/// A catalog category with its display emoji and short filter label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDef {
    pub name: &'static str,
    pub emoji: &'static str,
    pub filter_label: &'static str,
}

const fn cat(name: &'static str, emoji: &'static str, filter_label: &'static str) -> CategoryDef {
    CategoryDef {
        name,
        emoji,
        filter_label,
    }
}

pub const CATEGORIES: &[CategoryDef] = &[
    cat("Animals", "🐾", "Animals"),
    cat("Anime", "🎌", "Anime"),
    cat("Anti-Malware", "🛡️", "Security"),
    cat("Art & Design", "🎨", "Art"),
    cat("Authentication & Authorization", "🔐", "Auth"),
    cat("Blockchain", "⛓️", "Blockchain"),
    cat("Books", "📚", "Books"),
    cat("Business", "💼", "Business"),
    cat("Calendar", "📅", "Calendar"),
    cat("Cloud Storage & File Sharing", "☁️", "Cloud"),
    cat("Continuous Integration", "🔄", "CI/CD"),
    cat("Cryptocurrency", "🪙", "Crypto"),
    cat("Currency Exchange", "💱", "Currency"),
    cat("Data Validation", "✅", "Validation"),
    cat("Development", "💻", "Dev Tools"),
    cat("Dictionaries", "📖", "Dictionaries"),
    cat("Documents & Productivity", "📄", "Docs"),
    cat("Email", "📧", "Email"),
    cat("Entertainment", "🎭", "Entertainment"),
    cat("Environment", "🌍", "Environment"),
    cat("Events", "🎪", "Events"),
    cat("Finance", "📈", "Finance"),
    cat("Food & Drink", "🍕", "Food"),
    cat("Games & Comics", "🎮", "Games"),
    cat("Geocoding", "🗺️", "Maps"),
    cat("Government", "🏛️", "Government"),
    cat("Health", "🏥", "Health"),
    cat("Jobs", "💼", "Jobs"),
    cat("Machine Learning", "🤖", "AI/ML"),
    cat("Music", "🎵", "Music"),
    cat("News", "📰", "News"),
    cat("Open Data", "📊", "Data"),
    cat("Open Source Projects", "🔓", "Open Source"),
    cat("Patent", "📜", "Patent"),
    cat("Personality", "🧠", "Personality"),
    cat("Phone", "📱", "Phone"),
    cat("Photography", "📷", "Photography"),
    cat("Podcasts", "🎙️", "Podcasts"),
    cat("Programming", "⌨️", "Programming"),
    cat("Science & Math", "🔬", "Science"),
    cat("Security", "🔒", "Security"),
    cat("Shopping", "🛒", "Shopping"),
    cat("Social", "👥", "Social"),
    cat("Sports & Fitness", "⚽", "Sports"),
    cat("Test Data", "🧪", "Test Data"),
    cat("Text Analysis", "📝", "Text"),
    cat("Tracking", "📦", "Tracking"),
    cat("Transportation", "🚌", "Transport"),
    cat("URL Shorteners", "🔗", "URLs"),
    cat("Vehicle", "🚗", "Vehicle"),
    cat("Video", "🎬", "Video"),
    cat("Weather", "⛅", "Weather"),
];

pub const DEFAULT_EMOJI: &str = "📦";

/// Chip labels in display order. `All` disables the category restriction.
pub const FILTER_CHIPS: &[&str] = &[
    "All",
    "Weather",
    "Maps",
    "Finance",
    "Music",
    "Social",
    "AI/ML",
    "Data",
    "Fun",
    "Dev Tools",
    "Science",
    "Animals",
    "Photography",
    "News",
    "Health",
    "Food",
    "Games",
];

pub fn category_emoji(category: &str) -> &'static str {
    CATEGORIES
        .iter()
        .find(|c| c.name == category)
        .map(|c| c.emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

/// Catalog categories a chip selects, or `None` when the chip places no
/// restriction (`All` or an unrecognised label).
pub fn categories_for_chip(chip: &str) -> Option<&'static [&'static str]> {
    let cats: &'static [&'static str] = match chip {
        "Weather" => &["Weather"],
        "Maps" => &["Geocoding"],
        "Finance" => &["Finance", "Currency Exchange", "Cryptocurrency"],
        "Music" => &["Music"],
        "Social" => &["Social"],
        "AI/ML" => &["Machine Learning"],
        "Data" => &["Open Data", "Data Validation"],
        "Fun" => &["Entertainment", "Games & Comics", "Personality"],
        "Dev Tools" => &["Development", "Test Data", "Continuous Integration"],
        "Science" => &["Science & Math"],
        "Animals" => &["Animals"],
        "Photography" => &["Photography"],
        "News" => &["News"],
        "Health" => &["Health"],
        "Food" => &["Food & Drink"],
        "Games" => &["Games & Comics"],
        _ => return None,
    };
    Some(cats)
}

/// Case-insensitive chip lookup, returning the canonical label.
pub fn find_chip(label: &str) -> Option<&'static str> {
    FILTER_CHIPS
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_lookup_with_default() {
        assert_eq!(category_emoji("Weather"), "⛅");
        assert_eq!(category_emoji("Nope"), DEFAULT_EMOJI);
    }

    #[test]
    fn all_chip_places_no_restriction() {
        assert!(categories_for_chip("All").is_none());
        assert!(categories_for_chip("Unknown").is_none());
    }

    #[test]
    fn grouped_chips() {
        let fun = categories_for_chip("Fun").unwrap();
        assert!(fun.contains(&"Personality"));
        assert_eq!(
            categories_for_chip("Finance").unwrap(),
            &["Finance", "Currency Exchange", "Cryptocurrency"]
        );
    }

    #[test]
    fn every_chip_except_all_maps_to_known_categories() {
        for chip in FILTER_CHIPS.iter().skip(1) {
            for name in categories_for_chip(chip).unwrap() {
                assert!(
                    CATEGORIES.iter().any(|c| c.name == *name),
                    "chip {chip} maps to unknown category {name}"
                );
            }
        }
    }

    #[test]
    fn chip_lookup_ignores_case() {
        assert_eq!(find_chip("dev tools"), Some("Dev Tools"));
        assert_eq!(find_chip("ai/ml"), Some("AI/ML"));
        assert_eq!(find_chip("zzz"), None);
    }
}
