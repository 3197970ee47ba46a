//! The scene document: an entity hierarchy with components, sky, animation,
//! playback and selection.

use std::collections::BTreeMap;

use rewind_core::Document;

use crate::animation::{AnimationSet, Curve};
use crate::entity::EntityId;
use crate::error::{SceneError, SceneResult};
use crate::playback::Playback;
use crate::selection::Selection;
use crate::sky::SkySettings;
use crate::value::FieldValue;

/// A named map of field values attached to an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    fields: BTreeMap<String, FieldValue>,
}

impl Component {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Field names and values, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityState {
    Live,
    /// Removed from the hierarchy but still restorable.
    Trashed,
}

#[derive(Debug)]
struct EntityRecord {
    name: String,
    parent: Option<EntityId>,
    components: BTreeMap<String, Component>,
    animation: Option<AnimationSet>,
    state: EntityState,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    record: Option<EntityRecord>,
}

/// An editable scene.
///
/// Entities live in a slot arena addressed by [`EntityId`]. Removing an
/// entity only moves it to the trash, where it keeps its components and
/// animation so the removal can be undone. [`purge_trash`](Self::purge_trash)
/// frees trashed slots for good and invalidates every handle to them.
#[derive(Debug, Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    sky: SkySettings,
    playback: Playback,
    selection: Selection,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Entity lifecycle
    // ---------------------------------------------------------------------

    /// Creates a live entity under `parent`, or at the root when `None`.
    pub fn spawn(&mut self, name: impl Into<String>, parent: Option<EntityId>) -> SceneResult<EntityId> {
        if let Some(parent) = parent
            && !self.is_live(parent)
        {
            return Err(SceneError::EntityNotFound(parent));
        }

        let record = EntityRecord {
            name: name.into(),
            parent,
            components: BTreeMap::new(),
            animation: None,
            state: EntityState::Live,
        };

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.record = Some(record);
        Ok(EntityId::new(index, slot.generation))
    }

    /// Moves a live entity to the trash and deselects it.
    ///
    /// Returns `false` only if the handle no longer resolves. Trashing an
    /// entity that is already trashed succeeds.
    pub fn trash(&mut self, id: EntityId) -> bool {
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        record.state = EntityState::Trashed;
        self.selection.deselect(id);
        true
    }

    /// Brings a trashed entity back under `parent`.
    ///
    /// A parent that is no longer live is replaced by the root. Returns
    /// `false` only if `id` no longer resolves.
    pub fn restore(&mut self, id: EntityId, parent: Option<EntityId>) -> bool {
        let parent = match parent {
            Some(p) if self.is_live(p) => Some(p),
            Some(p) => {
                log::debug!("Parent {p} of {id} is gone, restoring at root");
                None
            }
            None => None,
        };
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        record.state = EntityState::Live;
        record.parent = parent;
        true
    }

    /// Permanently frees every entity that is not reachable from a root:
    /// trashed entities and everything below them.
    ///
    /// Returns the number of entities freed.
    pub fn purge_trash(&mut self) -> usize {
        let doomed: Vec<EntityId> = self
            .all_ids()
            .filter(|id| !self.is_reachable(*id))
            .collect();

        for id in &doomed {
            let slot = &mut self.slots[id.index() as usize];
            slot.record = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index());
            self.selection.deselect(*id);
        }

        if !doomed.is_empty() {
            log::debug!("Purged {} entit(ies) from trash", doomed.len());
        }
        doomed.len()
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Returns `true` if the handle resolves, whether live or trashed.
    pub fn contains(&self, id: EntityId) -> bool {
        self.record(id).is_some()
    }

    /// Returns `true` if the handle resolves to an entity that is not trashed.
    pub fn is_live(&self, id: EntityId) -> bool {
        self.record(id)
            .is_some_and(|r| r.state == EntityState::Live)
    }

    /// Returns `true` if the entity and all of its ancestors are live.
    pub fn is_reachable(&self, id: EntityId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            let Some(record) = self.record(id) else {
                return false;
            };
            if record.state != EntityState::Live {
                return false;
            }
            current = record.parent;
        }
        true
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.record(id).map(|r| r.name.as_str())
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.record(id).and_then(|r| r.parent)
    }

    /// Live children of `id`, in slot order.
    pub fn children(&self, id: EntityId) -> Vec<EntityId> {
        self.live_children_of(Some(id)).collect()
    }

    /// Live entities without a parent, in slot order.
    pub fn roots(&self) -> Vec<EntityId> {
        self.live_children_of(None).collect()
    }

    /// Number of live entities.
    pub fn live_count(&self) -> usize {
        self.all_ids().filter(|id| self.is_live(*id)).count()
    }

    /// Resolves a `/`-separated name path from the root, e.g. `"World/Props/Chair"`.
    pub fn find_by_path(&self, path: &str) -> Option<EntityId> {
        self.find_by_path_from(None, path)
    }

    /// Resolves a name path relative to `base`. An empty path resolves to
    /// `base` itself.
    pub fn find_by_path_from(&self, base: Option<EntityId>, path: &str) -> Option<EntityId> {
        if path.is_empty() {
            return base.filter(|id| self.is_live(*id));
        }
        let mut current = base;
        for segment in path.split('/') {
            let next = self
                .live_children_of(current)
                .find(|id| self.name(*id) == Some(segment))?;
            current = Some(next);
        }
        current
    }

    /// Name path of `id` from its root.
    pub fn path_of(&self, id: EntityId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let record = self.record(id)?;
            names.push(record.name.as_str());
            current = record.parent;
        }
        names.reverse();
        Some(names.join("/"))
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    pub fn component(&self, id: EntityId, component: &str) -> Option<&Component> {
        self.record(id)?.components.get(component)
    }

    pub fn field(&self, id: EntityId, component: &str, field: &str) -> Option<&FieldValue> {
        self.component(id, component)?.get(field)
    }

    /// Sets a field, creating the component if needed.
    ///
    /// Returns `None` if the handle does not resolve, otherwise the previous
    /// value of the field.
    pub fn set_field(
        &mut self,
        id: EntityId,
        component: &str,
        field: &str,
        value: FieldValue,
    ) -> Option<Option<FieldValue>> {
        let record = self.record_mut(id)?;
        let component = record.components.entry(component.to_owned()).or_default();
        Some(component.fields.insert(field.to_owned(), value))
    }

    /// Removes a field. An emptied component is removed too.
    ///
    /// Returns `None` if the handle does not resolve, otherwise the removed value.
    pub fn remove_field(&mut self, id: EntityId, component: &str, field: &str) -> Option<Option<FieldValue>> {
        let record = self.record_mut(id)?;
        let Some(comp) = record.components.get_mut(component) else {
            return Some(None);
        };
        let old = comp.fields.remove(field);
        if comp.is_empty() {
            record.components.remove(component);
        }
        Some(old)
    }

    // ---------------------------------------------------------------------
    // Animation
    // ---------------------------------------------------------------------

    /// Animation of `id`, if it has any.
    pub fn animation(&self, id: EntityId) -> Option<&AnimationSet> {
        self.record(id)?.animation.as_ref()
    }

    /// Sets a key on one of the entity's animated properties.
    pub fn insert_key(&mut self, id: EntityId, property: &str, frame: i32, value: f32) -> SceneResult<Option<f32>> {
        let record = self.record_mut(id).ok_or(SceneError::EntityNotFound(id))?;
        Ok(record
            .animation
            .get_or_insert_with(AnimationSet::new)
            .insert_key(property, frame, value))
    }

    pub(crate) fn curve_mut(&mut self, id: EntityId, property: &str) -> Option<&mut Curve> {
        self.record_mut(id)?.animation.as_mut()?.curve_mut(property)
    }

    // ---------------------------------------------------------------------
    // Scene-wide state
    // ---------------------------------------------------------------------

    pub fn sky(&self) -> &SkySettings {
        &self.sky
    }

    /// Replaces the sky, returning the previous settings.
    pub fn set_sky(&mut self, sky: SkySettings) -> SkySettings {
        std::mem::replace(&mut self.sky, sky)
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selects a live entity. Returns `false` if it is not live or already selected.
    pub fn select(&mut self, id: EntityId) -> bool {
        self.is_live(id) && self.selection.select(id)
    }

    pub fn deselect(&mut self, id: EntityId) -> bool {
        self.selection.deselect(id)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.record.as_ref()
    }

    fn record_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.record.as_mut()
    }

    fn all_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.record
                .as_ref()
                .map(|_| EntityId::new(index as u32, slot.generation))
        })
    }

    fn live_children_of(&self, parent: Option<EntityId>) -> impl Iterator<Item = EntityId> + '_ {
        self.all_ids().filter(move |id| {
            self.record(*id)
                .is_some_and(|r| r.state == EntityState::Live && r.parent == parent)
        })
    }
}

impl Document for Scene {
    fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    fn reset_selection(&mut self) {
        self.selection.clear();
    }
}
