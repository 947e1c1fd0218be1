//! Guessable entities and the per-mode catalog used for autocomplete.
use std::fmt;

use crate::selection::normalize_region_name;

/// Identifier assigned to an entity by the remote authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A guessable region. Immutable once fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    /// Official name or postal code, depending on the mode.
    pub secondary_name: Option<String>,
}

impl Entity {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            secondary_name: None,
        }
    }

    pub fn with_secondary_name(mut self, secondary: impl Into<String>) -> Self {
        self.secondary_name = Some(secondary.into());
        self
    }

    /// Name in the canonical form used for map matching.
    pub fn region_key(&self) -> String {
        normalize_region_name(&self.name)
    }

    /// Case-insensitive exact name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.region_key() == normalize_region_name(name)
    }
}

/// Entities known for the active mode.
///
/// Order is whatever the remote authority returned; suggestions keep it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityCatalog {
    entities: Vec<Entity>,
}

impl EntityCatalog {
    pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Exact (case-insensitive) lookup by name.
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        let key = normalize_region_name(name);
        if key.is_empty() {
            return None;
        }
        self.entities
            .iter()
            .find(|entity| entity.region_key() == key)
    }

    /// Entities whose name contains `query`, ignoring case.
    ///
    /// Returns at most `limit` matches in catalog order. A blank query yields
    /// nothing.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&Entity> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        self.entities
            .iter()
            .filter(|entity| entity.name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}

impl FromIterator<Entity> for EntityCatalog {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
