//! apix - public API catalog browser
//!
//! A terminal catalog of free public web APIs. Each entry can carry a
//! declarative preview (weather, map, chart, list, media, code or card)
//! that is turned into a renderer-neutral view tree and drawn with
//! ratatui. The same view trees are available as JSON through
//! `apix --render <slug>`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin apix                      # browse
//! cargo run --bin apix -- --render open-meteo
//! cargo run --bin apix-sitemap -- --base-url https://apix.dev
//! ```

// Catalog data and lookups
pub mod catalog;
pub mod categories;
pub mod slug;
pub mod types;

// Preview engine (renderer-neutral view trees)
pub mod preview;
pub mod resolve;

// Syntax coloring shared by snippets, code previews and the sample panel
pub mod highlight;
pub mod json_syntax;
pub mod snippets;

// Query language for the grid
pub mod filter;

// Deep link router (apix:/slug, /compare)
pub mod router;

pub mod compare;
pub mod config;
pub mod theme;

pub mod app;
pub mod ui;
pub mod ui_preview;

// Copy functionality and its clipboard backend
pub mod copy_api;
pub mod platform;

pub mod sitemap;

// Re-export commonly used types
pub use app::{App, InputMode, View};
pub use catalog::Catalog;
pub use config::Config;
pub use preview::{Mode, PreviewOptions, PreviewView};
pub use types::{ApiEntry, CatalogEntry, EntryRef, PreviewData};
