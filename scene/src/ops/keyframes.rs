//! Keyframe retiming.

use rewind_core::{GroupHost, Operation, OperationError, OperationResult, Submit};

use crate::entity::EntityId;
use crate::error::{SceneError, SceneResult, stale};
use crate::scene::Scene;

/// Moves the key of one animated property from one frame to another.
///
/// A key already sitting on the destination frame is overwritten and put
/// back on undo.
#[derive(Debug)]
pub struct MoveKeyframe {
    entity: EntityId,
    property: String,
    frame: i32,
    new_frame: i32,
    value: f32,
    displaced: Option<f32>,
}

impl MoveKeyframe {
    pub fn apply(
        scene: &mut Scene,
        entity: EntityId,
        property: impl Into<String>,
        frame: i32,
        new_frame: i32,
    ) -> SceneResult<Self> {
        let property = property.into();
        if !scene.contains(entity) {
            return Err(SceneError::EntityNotFound(entity));
        }
        if scene.animation(entity).is_none() {
            return Err(SceneError::NoAnimation(entity));
        }
        let Some(curve) = scene.curve_mut(entity, &property) else {
            return Err(SceneError::NoKeyframe { property, frame });
        };
        let Some(value) = curve.remove(frame) else {
            return Err(SceneError::NoKeyframe { property, frame });
        };
        let displaced = curve.insert(new_frame, value);

        Ok(Self {
            entity,
            property,
            frame,
            new_frame,
            value,
            displaced,
        })
    }

    pub fn property(&self) -> &str {
        &self.property
    }
}

impl Operation<Scene> for MoveKeyframe {
    fn undo(&mut self, scene: &mut Scene) -> OperationResult {
        let Some(curve) = scene.curve_mut(self.entity, &self.property) else {
            return Err(missing_curve(scene, self.entity, &self.property));
        };
        curve.remove(self.new_frame);
        if let Some(displaced) = self.displaced {
            curve.insert(self.new_frame, displaced);
        }
        curve.insert(self.frame, self.value);
        Ok(())
    }

    fn redo(&mut self, scene: &mut Scene) -> OperationResult {
        let Some(curve) = scene.curve_mut(self.entity, &self.property) else {
            return Err(missing_curve(scene, self.entity, &self.property));
        };
        curve.remove(self.frame);
        curve.insert(self.new_frame, self.value);
        Ok(())
    }

    fn label(&self) -> &str {
        "Move keyframe"
    }
}

fn missing_curve(scene: &Scene, entity: EntityId, property: &str) -> OperationError {
    if scene.contains(entity) {
        OperationError::InvalidState(format!("{entity} has no curve \"{property}\""))
    } else {
        stale(entity)
    }
}

/// Moves every key of `entity` at `frame` to `new_frame` as one
/// "Move keyframes" group recorded on `host`.
///
/// Returns how many curves were moved. Nothing is recorded when no curve has
/// a key at `frame`.
pub fn move_keyframes<H: GroupHost<Scene> + ?Sized>(
    host: &mut H,
    scene: &mut Scene,
    entity: EntityId,
    frame: i32,
    new_frame: i32,
) -> SceneResult<usize> {
    if !scene.contains(entity) {
        return Err(SceneError::EntityNotFound(entity));
    }
    let properties: Vec<String> = scene
        .animation(entity)
        .ok_or(SceneError::NoAnimation(entity))?
        .properties_keyed_at(frame)
        .map(str::to_owned)
        .collect();

    if properties.is_empty() {
        log::debug!("No keys of {entity} at frame {frame}");
        return Ok(0);
    }

    let mut group = host.open_group("Move keyframes");
    for property in &properties {
        MoveKeyframe::apply(scene, entity, property.as_str(), frame, new_frame)?.submit(&mut group);
    }
    group.commit();
    Ok(properties.len())
}
