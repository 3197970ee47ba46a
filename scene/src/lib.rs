//! # Rewind Scene
//!
//! A small scene document for [`rewind_core`] and the operations a scene
//! editor records in its history:
//!
//! - [`AddEntity`] / [`RemoveEntity`] - hierarchy edits backed by a trash bin
//! - [`SetField`] - one component field, addressed by path
//! - [`SetSky`] - sky gradient
//! - [`MoveKeyframe`] and [`move_keyframes`] - keyframe retiming, grouped per entity
//!
//! ```ignore
//! use rewind_core::{History, Submit};
//! use rewind_scene::{AddEntity, Scene, SetField};
//!
//! let mut scene = Scene::new();
//! let mut history = History::new();
//!
//! let world = AddEntity::apply(&mut scene, "World", None)?;
//! let world_id = world.entity();
//! world.submit(&mut history);
//! AddEntity::apply(&mut scene, "Chair", Some(world_id))?.submit(&mut history);
//! SetField::apply(&mut scene, "World/Chair/Transform/PositionX", 2.0_f32)?.submit(&mut history);
//!
//! history.undo(&mut scene);
//! ```

pub mod animation;
pub mod entity;
pub mod error;
pub mod ops;
pub mod playback;
pub mod scene;
pub mod selection;
pub mod sky;
pub mod value;

pub use animation::{AnimationSet, Curve};
pub use entity::EntityId;
pub use error::{SceneError, SceneResult};
pub use ops::{AddEntity, MoveKeyframe, RemoveEntity, SetField, SetSky, move_keyframes};
pub use playback::Playback;
pub use scene::{Component, Scene};
pub use selection::Selection;
pub use sky::SkySettings;
pub use value::FieldValue;
