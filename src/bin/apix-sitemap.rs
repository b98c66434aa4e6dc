use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};

use apix::{
    catalog::Catalog,
    config::{self, CliArgs},
    sitemap,
};

/// Write sitemap.xml for every catalog entry.
///
/// Catalog, previews and base URL resolve like `apix` (CLI > env > config file > defaults).
#[derive(Parser, Debug)]
#[command(name = "apix-sitemap", version)]
struct Args {
    /// TOML config file shared with apix
    #[arg(long, env = "APIX_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog document
    #[arg(long, env = "APIX_CATALOG")]
    catalog: Option<PathBuf>,

    /// Preview directory
    #[arg(long, env = "APIX_PREVIEWS")]
    previews: Option<PathBuf>,

    /// Public site origin, e.g. https://apix.dev
    #[arg(long, env = "APIX_BASE_URL")]
    base_url: Option<String>,

    /// Output file
    #[arg(long, default_value = "public/sitemap.xml")]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = config::from_args(CliArgs {
        config: args.config,
        catalog: args.catalog,
        previews: args.previews,
        base_url: args.base_url,
        ..Default::default()
    })
    .context("Failed to load configuration")?;
    log::info!("Base URL: {}", cfg.base_url);

    let catalog = Catalog::load(&cfg.catalog_path, &cfg.previews_dir)?;
    let slugs = catalog.slugs();
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let xml = sitemap::generate(&cfg.base_url, &slugs, &today);

    if let Some(dir) = args.out.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    fs::write(&args.out, xml)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    println!(
        "Sitemap generated: {} URLs \u{2192} {}",
        sitemap::url_count(slugs.len()),
        args.out.display()
    );
    Ok(())
}
