//! Entity creation and removal.

use rewind_core::{Operation, OperationResult};

use crate::entity::EntityId;
use crate::error::{SceneError, SceneResult, stale};
use crate::scene::Scene;

/// Creates an entity. Undo moves it to the trash, redo restores it under
/// the parent it was created with.
#[derive(Debug)]
pub struct AddEntity {
    entity: EntityId,
    parent: Option<EntityId>,
}

impl AddEntity {
    pub fn apply(scene: &mut Scene, name: impl Into<String>, parent: Option<EntityId>) -> SceneResult<Self> {
        let entity = scene.spawn(name, parent)?;
        log::debug!("Added {entity}");
        Ok(Self { entity, parent })
    }

    /// The created entity.
    pub fn entity(&self) -> EntityId {
        self.entity
    }
}

impl Operation<Scene> for AddEntity {
    fn undo(&mut self, scene: &mut Scene) -> OperationResult {
        if !scene.trash(self.entity) {
            return Err(stale(self.entity));
        }
        Ok(())
    }

    fn redo(&mut self, scene: &mut Scene) -> OperationResult {
        if !scene.restore(self.entity, self.parent) {
            return Err(stale(self.entity));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        "Add entity"
    }
}

/// Moves an entity (and so its subtree) to the trash.
#[derive(Debug)]
pub struct RemoveEntity {
    entity: EntityId,
    parent: Option<EntityId>,
}

impl RemoveEntity {
    pub fn apply(scene: &mut Scene, entity: EntityId) -> SceneResult<Self> {
        if !scene.is_live(entity) {
            return Err(SceneError::EntityNotFound(entity));
        }
        let parent = scene.parent(entity);
        scene.trash(entity);
        Ok(Self { entity, parent })
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }
}

impl Operation<Scene> for RemoveEntity {
    fn undo(&mut self, scene: &mut Scene) -> OperationResult {
        if !scene.restore(self.entity, self.parent) {
            return Err(stale(self.entity));
        }
        Ok(())
    }

    fn redo(&mut self, scene: &mut Scene) -> OperationResult {
        if !scene.trash(self.entity) {
            return Err(stale(self.entity));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        "Remove entity"
    }
}

#[cfg(test)]
mod tests {
    use rewind_core::OperationError;

    use super::*;

    #[test]
    fn add_undo_redo() {
        let mut scene = Scene::new();
        let world = scene.spawn("World", None).unwrap();
        let mut op = AddEntity::apply(&mut scene, "Chair", Some(world)).unwrap();
        let chair = op.entity();
        assert_eq!(scene.find_by_path("World/Chair"), Some(chair));

        op.undo(&mut scene).unwrap();
        assert!(!scene.is_live(chair));
        op.redo(&mut scene).unwrap();
        assert_eq!(scene.parent(chair), Some(world));
        assert_eq!(op.label(), "Add entity");
    }

    #[test]
    fn remove_keeps_parent_and_components() {
        let mut scene = Scene::new();
        let world = scene.spawn("World", None).unwrap();
        let chair = scene.spawn("Chair", Some(world)).unwrap();
        scene.set_field(chair, "Light", "Intensity", 3.0_f32.into());

        let mut op = RemoveEntity::apply(&mut scene, chair).unwrap();
        assert!(!scene.is_live(chair));
        op.undo(&mut scene).unwrap();
        assert_eq!(scene.parent(chair), Some(world));
        assert!(scene.field(chair, "Light", "Intensity").is_some());
    }

    #[test]
    fn remove_of_trashed_entity_fails() {
        let mut scene = Scene::new();
        let chair = scene.spawn("Chair", None).unwrap();
        scene.trash(chair);
        assert_eq!(
            RemoveEntity::apply(&mut scene, chair).unwrap_err(),
            SceneError::EntityNotFound(chair)
        );
    }

    #[test]
    fn purged_entity_is_stale() {
        let mut scene = Scene::new();
        let mut op = AddEntity::apply(&mut scene, "Chair", None).unwrap();
        op.undo(&mut scene).unwrap();
        scene.purge_trash();

        assert!(matches!(
            op.redo(&mut scene),
            Err(OperationError::TargetNotFound(_))
        ));
        assert_eq!(scene.live_count(), 0);
    }
}
