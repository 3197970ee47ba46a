//! Selected entities.

use crate::entity::EntityId;

/// Ordered set of selected entities, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Vec<EntityId>,
}

impl Selection {
    /// Adds `entity` to the selection. Returns `false` if it was already selected.
    pub fn select(&mut self, entity: EntityId) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.selected.push(entity);
        true
    }

    /// Removes `entity` from the selection. Returns `false` if it was not selected.
    pub fn deselect(&mut self, entity: EntityId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|e| *e != entity);
        self.selected.len() != before
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.selected.contains(&entity)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
