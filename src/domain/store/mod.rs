//! Per-item crop settings in insertion order

use serde::{Deserialize, Serialize};

use crate::domain::model::CropRect;

/// A single committed crop setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropEntry {
    pub item: String,
    pub rect: CropRect,
}

/// Mapping from item id to its committed rectangle
///
/// Entries keep the position of their first commit. Rectangles go in and come
/// out by value, so a snapshot never changes after it is taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSettingsStore {
    entries: Vec<CropEntry>,
}

impl CropSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted entries; later duplicates overwrite earlier ones
    pub fn from_entries(entries: impl IntoIterator<Item = CropEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.upsert(&entry.item, entry.rect);
        }
        store
    }

    /// Record a committed rectangle
    ///
    /// A new entry is only created for a rectangle with area; an existing
    /// entry is updated in place with whatever was committed.
    /// Returns true when the store changed.
    pub fn commit(&mut self, item: &str, rect: CropRect) -> bool {
        if rect.is_degenerate() && !self.contains(item) {
            return false;
        }
        self.upsert(item, rect);
        true
    }

    fn upsert(&mut self, item: &str, rect: CropRect) {
        match self.entries.iter_mut().find(|e| e.item == item) {
            Some(entry) => entry.rect = rect,
            None => self.entries.push(CropEntry {
                item: item.to_string(),
                rect,
            }),
        }
    }

    pub fn get(&self, item: &str) -> Option<CropRect> {
        self.entries.iter().find(|e| e.item == item).map(|e| e.rect)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.entries.iter().any(|e| e.item == item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CropEntry] {
        &self.entries
    }

    /// Owned copy of every entry in insertion order
    pub fn snapshot(&self) -> Vec<(String, CropRect)> {
        self.entries
            .iter()
            .map(|e| (e.item.clone(), e.rect))
            .collect()
    }
}
