//! Client-local set of highlighted map regions.
use std::collections::BTreeSet;

/// Canonical form of a region name: trimmed and upper-cased.
///
/// Map features, selections and the correct entity are all compared in this
/// form.
pub fn normalize_region_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Regions the player has toggled on the map.
///
/// Purely visual. Never validated against the catalog and never sent to the
/// remote authority. `revision` increases on every effective change so
/// observers can skip work when nothing moved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    names: BTreeSet<String>,
    revision: u64,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `name`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        let key = normalize_region_name(name);
        self.revision += 1;
        if self.names.remove(&key) {
            false
        } else {
            self.names.insert(key);
            true
        }
    }

    pub fn clear(&mut self) {
        if !self.names.is_empty() {
            self.names.clear();
            self.revision += 1;
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_region_name(name))
    }

    /// Membership test for a name already in canonical form.
    pub fn contains_key(&self, key: &str) -> bool {
        self.names.contains(key)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
