//! Static catalog: entries joined with their preview payloads by slug.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::types::{ApiEntry, CatalogDocument, CatalogEntry, EntryRef, PreviewData};

/// Maximum number of similar entries suggested on a detail view.
pub const SIMILAR_LIMIT: usize = 6;

/// The joined, immutable entry list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<EntryRef>,
}

impl Catalog {
    /// Join catalog rows with previews. Later previews with a duplicate id
    /// replace earlier ones.
    pub fn from_parts(rows: Vec<CatalogEntry>, previews: Vec<PreviewData>) -> Self {
        let mut by_id: HashMap<String, PreviewData> = HashMap::with_capacity(previews.len());
        for p in previews {
            by_id.insert(p.id.clone(), p);
        }

        let entries = rows
            .into_iter()
            .map(|row| {
                let slug = crate::slug::slugify(&row.name);
                let preview = by_id.get(&slug).cloned();
                Arc::new(ApiEntry::new(row, preview))
            })
            .collect();

        Self { entries }
    }

    /// Load `catalog_path` and every `*.json` file in `previews_dir`
    /// (file name order). Unparseable preview files are skipped.
    pub fn load(catalog_path: &Path, previews_dir: &Path) -> Result<Self> {
        let raw = fs::read_to_string(catalog_path)
            .with_context(|| format!("Failed to read catalog: {}", catalog_path.display()))?;
        let doc: CatalogDocument = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog: {}", catalog_path.display()))?;

        if doc.count != 0 && doc.count != doc.entries.len() {
            log::debug!(
                "catalog count field {} differs from {} entries",
                doc.count,
                doc.entries.len()
            );
        }

        let previews = load_previews(previews_dir)?;
        let catalog = Self::from_parts(doc.entries, previews);
        log::info!(
            "Loaded {} entries ({} with previews) from {}",
            catalog.len(),
            catalog.featured().len(),
            catalog_path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> &[EntryRef] {
        &self.entries
    }

    /// Entries that carry a preview.
    pub fn featured(&self) -> Vec<EntryRef> {
        self.entries
            .iter()
            .filter(|e| e.has_preview())
            .cloned()
            .collect()
    }

    /// First entry with exactly this slug.
    pub fn by_slug(&self, slug: &str) -> Option<EntryRef> {
        self.entries.iter().find(|e| e.slug == slug).cloned()
    }

    pub fn by_category(&self, category: &str) -> Vec<EntryRef> {
        self.entries
            .iter()
            .filter(|e| e.category() == category)
            .cloned()
            .collect()
    }

    pub fn slugs(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.slug.clone()).collect()
    }

    /// Same category, different slug, catalog order.
    pub fn similar(&self, entry: &ApiEntry, limit: usize) -> Vec<EntryRef> {
        self.entries
            .iter()
            .filter(|e| e.category() == entry.category() && e.slug != entry.slug)
            .take(limit)
            .cloned()
            .collect()
    }
}

fn load_previews(dir: &Path) -> Result<Vec<PreviewData>> {
    if !dir.exists() {
        log::warn!("Preview directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list previews: {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut previews = Vec::with_capacity(paths.len());
    for path in paths {
        let parsed = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| serde_json::from_str::<PreviewData>(&raw).map_err(Into::into));
        match parsed {
            Ok(p) => previews.push(p),
            Err(e) => log::warn!("Skipping preview {}: {e}", path.display()),
        }
    }
    Ok(previews)
}
