//! Component field edits.

use rewind_core::{FieldAddress, Operation, OperationResult};

use crate::entity::EntityId;
use crate::error::{SceneError, SceneResult, stale};
use crate::scene::Scene;
use crate::value::FieldValue;

/// Sets one field of one component, addressed as `entity/path/Component/field`.
///
/// Undo restores the previous value, or removes the field if it did not
/// exist before.
#[derive(Debug)]
pub struct SetField {
    entity: EntityId,
    component: String,
    field: String,
    old: Option<FieldValue>,
    new: FieldValue,
    label: String,
}

impl SetField {
    /// Resolves `address` from the scene root and sets the field.
    pub fn apply(scene: &mut Scene, address: &str, value: impl Into<FieldValue>) -> SceneResult<Self> {
        Self::resolve_and_set(scene, None, address, value.into())
    }

    /// Resolves `address` relative to `base` and sets the field. The entity
    /// path may be empty, naming `base` itself.
    pub fn apply_to(
        scene: &mut Scene,
        base: EntityId,
        address: &str,
        value: impl Into<FieldValue>,
    ) -> SceneResult<Self> {
        if !scene.is_live(base) {
            return Err(SceneError::EntityNotFound(base));
        }
        Self::resolve_and_set(scene, Some(base), address, value.into())
    }

    fn resolve_and_set(
        scene: &mut Scene,
        base: Option<EntityId>,
        address: &str,
        new: FieldValue,
    ) -> SceneResult<Self> {
        let FieldAddress {
            entity_path,
            component,
            field,
        } = FieldAddress::parse(address)?;

        let entity = scene
            .find_by_path_from(base, &entity_path)
            .ok_or_else(|| SceneError::PathNotFound(entity_path.clone()))?;
        let old = scene
            .set_field(entity, &component, &field, new.clone())
            .ok_or(SceneError::EntityNotFound(entity))?;

        Ok(Self {
            label: format!("Set {component}.{field}"),
            entity,
            component,
            field,
            old,
            new,
        })
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Value the field had before, `None` if it was created.
    pub fn old_value(&self) -> Option<&FieldValue> {
        self.old.as_ref()
    }

    pub fn new_value(&self) -> &FieldValue {
        &self.new
    }
}

impl Operation<Scene> for SetField {
    fn undo(&mut self, scene: &mut Scene) -> OperationResult {
        let result = match &self.old {
            Some(old) => scene.set_field(self.entity, &self.component, &self.field, old.clone()),
            None => scene.remove_field(self.entity, &self.component, &self.field),
        };
        result.map(|_| ()).ok_or_else(|| stale(self.entity))
    }

    fn redo(&mut self, scene: &mut Scene) -> OperationResult {
        scene
            .set_field(self.entity, &self.component, &self.field, self.new.clone())
            .map(|_| ())
            .ok_or_else(|| stale(self.entity))
    }

    fn label(&self) -> &str {
        &self.label
    }
}
