//! Shared handle to the per-mode [`SelectionSet`].
//!
//! Map click handlers mutate it synchronously, the session engine clears it on
//! day rollover, and renderers read it every frame.
use std::sync::{Arc, PoisonError, RwLock};

use game_core::SelectionSet;

#[derive(Clone, Debug, Default)]
pub struct SharedSelection {
    inner: Arc<RwLock<SelectionSet>>,
}

impl SharedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `name`; returns whether it is selected afterwards.
    pub fn toggle(&self, name: &str) -> bool {
        self.write(|selection| selection.toggle(name))
    }

    pub fn clear(&self) {
        self.write(SelectionSet::clear);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read(|selection| selection.contains(name))
    }

    pub fn revision(&self) -> u64 {
        self.read(SelectionSet::revision)
    }

    pub fn len(&self) -> usize {
        self.read(SelectionSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(SelectionSet::is_empty)
    }

    /// Run `f` against the current selection without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&SelectionSet) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut SelectionSet) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let selection = SharedSelection::new();
        let map_side = selection.clone();

        assert!(map_side.toggle("Mazowieckie"));
        assert!(selection.contains("MAZOWIECKIE"));
        assert_eq!(selection.revision(), 1);

        selection.clear();
        assert!(map_side.is_empty());
    }
}
