//! Bounded selection of entries to compare side by side.

use crate::types::EntryRef;

/// Maximum number of entries held at once.
pub const MAX_COMPARE: usize = 3;

/// Insertion-ordered, slug-unique selection. Adding beyond
/// [`MAX_COMPARE`] evicts the oldest entry.
#[derive(Debug, Clone, Default)]
pub struct CompareSet {
    entries: Vec<EntryRef>,
}

impl CompareSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// No-op when the slug is already selected.
    pub fn add(&mut self, entry: EntryRef) {
        if self.is_selected(&entry.slug) {
            return;
        }
        self.entries.push(entry);
        if self.entries.len() > MAX_COMPARE {
            let evicted = self.entries.remove(0);
            log::debug!("compare: evicted {}", evicted.slug);
        }
    }

    pub fn remove(&mut self, slug: &str) {
        self.entries.retain(|e| e.slug != slug);
    }

    /// Returns true when the entry ends up selected.
    pub fn toggle(&mut self, entry: EntryRef) -> bool {
        if self.is_selected(&entry.slug) {
            self.remove(&entry.slug);
            false
        } else {
            self.add(entry);
            true
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_selected(&self, slug: &str) -> bool {
        self.entries.iter().any(|e| e.slug == slug)
    }

    pub fn entries(&self) -> &[EntryRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
