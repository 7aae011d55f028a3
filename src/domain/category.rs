//! Display metadata for categories, resolved by id with a fixed fallback.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name, icon and color used to present a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl CategoryInfo {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }

    /// Shown for transactions whose category no longer resolves.
    pub fn other() -> Self {
        Self::new("Other", "category", "#9E9E9E")
    }
}

impl Default for CategoryInfo {
    fn default() -> Self {
        Self::other()
    }
}

/// Lookup table from category id to display metadata.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    entries: HashMap<String, CategoryInfo>,
    fallback: CategoryInfo,
}

impl CategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(mut self, fallback: CategoryInfo) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, info: CategoryInfo) {
        self.entries.insert(id.into(), info);
    }

    pub fn get(&self, id: &str) -> Option<&CategoryInfo> {
        self.entries.get(id)
    }

    /// Resolves `id`, returning the fallback entry when unknown.
    pub fn resolve(&self, id: &str) -> &CategoryInfo {
        self.entries.get(id).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &CategoryInfo {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CategoryInfo)> for CategoryDirectory {
    fn from_iter<T: IntoIterator<Item = (String, CategoryInfo)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            fallback: CategoryInfo::other(),
        }
    }
}
