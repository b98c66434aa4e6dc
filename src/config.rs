use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::router::{self, Route};
use crate::theme::Theme;

pub const DEFAULT_CATALOG: &str = "data/catalog.json";
pub const DEFAULT_PREVIEWS: &str = "data/previews";
pub const DEFAULT_BASE_URL: &str = "https://public-apis-explorer.vercel.app";
pub const DEFAULT_LOG_FILE: &str = "apix.log";
pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_CARD_FIELDS: usize = 5;

/// apix - browse public APIs and preview their responses
///
/// Configuration priority: CLI args > Environment variables > Config file > Defaults
#[derive(Parser, Debug, Default)]
#[command(name = "apix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal explorer for public APIs", long_about = None)]
pub struct CliArgs {
    /// TOML config file
    #[arg(long, env = "APIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog document
    #[arg(long, env = "APIX_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Directory of preview documents (*.json)
    #[arg(long, env = "APIX_PREVIEWS")]
    pub previews: Option<PathBuf>,

    /// Color theme: nord, dos-blue, amber-crt, green-phosphor
    #[arg(long, env = "APIX_THEME", value_parser = clap::value_parser!(Theme))]
    pub theme: Option<Theme>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "APIX_RENDER_FPS")]
    pub fps: Option<u32>,

    /// Fields shown by a compact card preview (1-20)
    #[arg(long, env = "APIX_CARD_FIELDS")]
    pub card_fields: Option<usize>,

    /// Public site URL, used for absolute links
    #[arg(long, env = "APIX_BASE_URL")]
    pub base_url: Option<String>,

    /// Filter query applied on startup (e.g. "weather auth:free")
    #[arg(long, env = "APIX_QUERY")]
    pub query: Option<String>,

    /// Route opened on startup (e.g. "/open-meteo", "apix://compare")
    #[arg(long, env = "APIX_ROUTE")]
    pub route: Option<String>,

    /// Log file for the interactive UI
    #[arg(long, env = "APIX_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the preview view tree of SLUG as JSON and exit
    #[arg(long, value_name = "SLUG")]
    pub render: Option<String>,

    /// With --render: use the compact layout
    #[arg(long, requires = "render")]
    pub compact: bool,

    /// Print every slug and exit
    #[arg(long, conflicts_with = "render")]
    pub list: bool,
}

/// Settings accepted from the config file. Keys mirror the long flags.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub catalog: Option<PathBuf>,
    pub previews: Option<PathBuf>,
    pub theme: Option<String>,
    pub fps: Option<u32>,
    pub card_fields: Option<usize>,
    pub base_url: Option<String>,
    pub query: Option<String>,
    pub route: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// What the binary does after loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Render { slug: String, compact: bool },
    List,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub previews_dir: PathBuf,
    pub theme: Theme,
    pub render_fps: u32,
    pub card_compact_fields: usize,
    pub base_url: String,
    pub initial_query: String,
    pub initial_route: Route,
    pub log_file: PathBuf,
    pub run_mode: RunMode,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Basic http(s) URL check.
pub fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args, environment and the optional config file.
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

pub fn from_args(args: CliArgs) -> Result<Config> {
    let file = match &args.config {
        Some(path) => FileConfig::read(path)?,
        None => FileConfig::default(),
    };
    merge(args, file)
}

/// Combine parsed CLI/env values with file values and defaults.
pub fn merge(args: CliArgs, file: FileConfig) -> Result<Config> {
    let theme = match (args.theme, file.theme) {
        (Some(t), _) => t,
        (None, Some(name)) => name.parse::<Theme>().map_err(|e| anyhow!("theme: {e}"))?,
        (None, None) => Theme::default(),
    };

    let render_fps = args.fps.or(file.fps).unwrap_or(DEFAULT_FPS);
    let render_fps = validate_in_range(render_fps, 1, 120, "APIX_RENDER_FPS")?;

    let card_compact_fields = args
        .card_fields
        .or(file.card_fields)
        .unwrap_or(DEFAULT_CARD_FIELDS);
    let card_compact_fields = validate_in_range(card_compact_fields, 1, 20, "APIX_CARD_FIELDS")?;

    let base_url = args
        .base_url
        .or(file.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    validate_url(&base_url, "APIX_BASE_URL")?;

    let initial_route = match args.route.or(file.route) {
        Some(raw) => router::parse(&raw).ok_or_else(|| anyhow!("APIX_ROUTE: cannot parse route '{raw}'"))?,
        None => Route::Home,
    };

    let run_mode = match (args.render, args.list) {
        (Some(slug), _) => RunMode::Render {
            slug,
            compact: args.compact,
        },
        (None, true) => RunMode::List,
        (None, false) => RunMode::Interactive,
    };

    Ok(Config {
        catalog_path: args
            .catalog
            .or(file.catalog)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG)),
        previews_dir: args
            .previews
            .or(file.previews)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREVIEWS)),
        theme,
        render_fps,
        card_compact_fields,
        base_url,
        initial_query: args.query.or(file.query).unwrap_or_default(),
        initial_route,
        log_file: args
            .log_file
            .or(file.log_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        run_mode,
    })
}

impl Config {
    pub fn preview_options(&self) -> crate::preview::PreviewOptions {
        crate::preview::PreviewOptions {
            card_compact_fields: self.card_compact_fields,
        }
    }

    pub fn log_summary(&self) {
        log::info!("apix configuration:");
        log::info!("  Catalog: {}", self.catalog_path.display());
        log::info!("  Previews: {}", self.previews_dir.display());
        log::info!("  Theme: {}", self.theme);
        log::info!("  Render FPS: {}", self.render_fps);
        log::info!("  Card fields: {}", self.card_compact_fields);
        log::info!("  Base URL: {}", self.base_url);
        log::info!("  Route: {}", self.initial_route.path());
        if !self.initial_query.is_empty() {
            log::info!("  Query: {}", self.initial_query);
        }
    }
}
