use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::slug::slugify;

/// Authentication requirement advertised by a catalog entry.
///
/// The catalog document is not validated ahead of time, so unknown
/// schemes are kept verbatim in `Other` instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum AuthKind {
    #[default]
    None,
    ApiKey,
    OAuth,
    MashapeKey,
    UserAgent,
    Other(String),
}

impl From<String> for AuthKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" | "No" | "no" => AuthKind::None,
            "apiKey" => AuthKind::ApiKey,
            "OAuth" => AuthKind::OAuth,
            "X-Mashape-Key" => AuthKind::MashapeKey,
            "User-Agent" => AuthKind::UserAgent,
            _ => AuthKind::Other(s),
        }
    }
}

impl From<AuthKind> for String {
    fn from(a: AuthKind) -> Self {
        a.as_str().to_string()
    }
}

impl AuthKind {
    /// Raw value as written in the catalog document.
    pub fn as_str(&self) -> &str {
        match self {
            AuthKind::None => "",
            AuthKind::ApiKey => "apiKey",
            AuthKind::OAuth => "OAuth",
            AuthKind::MashapeKey => "X-Mashape-Key",
            AuthKind::UserAgent => "User-Agent",
            AuthKind::Other(s) => s,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, AuthKind::None)
    }

    /// Badge text shown next to an entry name.
    pub fn badge(&self) -> &str {
        match self {
            AuthKind::None => "Free",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.badge())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum CorsStatus {
    Yes,
    No,
    #[default]
    Unknown,
}

impl From<String> for CorsStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "yes" => CorsStatus::Yes,
            "no" => CorsStatus::No,
            _ => CorsStatus::Unknown,
        }
    }
}

impl From<CorsStatus> for String {
    fn from(c: CorsStatus) -> Self {
        c.to_string()
    }
}

impl fmt::Display for CorsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsStatus::Yes => write!(f, "yes"),
            CorsStatus::No => write!(f, "no"),
            CorsStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// One row of the static catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "API")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Auth", default)]
    pub auth: AuthKind,
    #[serde(rename = "HTTPS", default)]
    pub https: bool,
    #[serde(rename = "Cors", default)]
    pub cors: CorsStatus,
    #[serde(rename = "Link", default)]
    pub link: String,
    #[serde(rename = "Category", default)]
    pub category: String,
}

/// `{ count, entries }` as shipped in `catalog.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub count: usize,
    pub entries: Vec<CatalogEntry>,
}

/// Discriminant selecting a preview renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewType {
    Weather,
    Map,
    Chart,
    List,
    Media,
    Code,
    Card,
    /// Any tag this build does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PreviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PreviewType::Weather => "weather",
            PreviewType::Map => "map",
            PreviewType::Chart => "chart",
            PreviewType::List => "list",
            PreviewType::Media => "media",
            PreviewType::Code => "code",
            PreviewType::Card => "card",
            PreviewType::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

/// Declarative per-entry preview configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreviewConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
    /// Inline list overriding `sampleResponse.items`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_label_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_key: Option<String>,
}

/// Captured sample payload plus the config describing how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewData {
    pub id: String,
    pub preview_type: PreviewType,
    #[serde(default)]
    pub sample_response: Value,
    #[serde(default)]
    pub preview_config: PreviewConfig,
}

/// Catalog entry joined with its slug and optional preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEntry {
    #[serde(flatten)]
    pub catalog: CatalogEntry,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewData>,
}

impl ApiEntry {
    pub fn new(catalog: CatalogEntry, preview: Option<PreviewData>) -> Self {
        let slug = slugify(&catalog.name);
        Self {
            catalog,
            slug,
            preview,
        }
    }

    pub fn name(&self) -> &str {
        &self.catalog.name
    }

    pub fn category(&self) -> &str {
        &self.catalog.category
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }
}

/// Shared handle; entries live for the whole process.
pub type EntryRef = Arc<ApiEntry>;
