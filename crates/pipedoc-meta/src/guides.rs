//! Guide cross-references.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A guide as declared in metadata, with the components it covers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GuideEntry {
    pub title: String,
    /// Path relative to the documentation root (e.g. `guides/parsing.md`).
    pub path: String,
    /// Component names the guide is relevant to.
    #[serde(default)]
    pub components: Vec<String>,
}

/// A guide linked from a component page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guide {
    pub title: String,
    pub path: String,
}

/// Guides indexed by component name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuideIndex {
    by_component: BTreeMap<String, Vec<Guide>>,
}

impl GuideIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from declared entries, preserving declaration order.
    #[must_use]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a GuideEntry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.add_entry(entry);
        }
        index
    }

    /// Register an entry under each of its components.
    pub fn add_entry(&mut self, entry: &GuideEntry) {
        for component in &entry.components {
            self.insert(component, &entry.title, &entry.path);
        }
    }

    /// Register a guide for a component.
    pub fn insert(&mut self, component: &str, title: &str, path: &str) {
        self.by_component
            .entry(component.to_owned())
            .or_default()
            .push(Guide {
                title: title.to_owned(),
                path: path.to_owned(),
            });
    }

    /// Guides for a component (empty if none).
    #[must_use]
    pub fn get(&self, component: &str) -> &[Guide] {
        self.by_component
            .get(component)
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_component.is_empty()
    }
}
