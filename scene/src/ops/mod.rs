//! Reversible operations on a [`Scene`](crate::Scene).
//!
//! Every factory performs its forward effect on the scene and returns the
//! operation, ready to be submitted to a history or an open group:
//!
//! ```ignore
//! AddEntity::apply(&mut scene, "Chair", Some(props))?.submit(&mut history);
//! ```
//!
//! Operations keep [`EntityId`](crate::EntityId) handles. When a handle stops
//! resolving, undo/redo report [`OperationError::TargetNotFound`](rewind_core::OperationError)
//! and leave the scene untouched.

mod entity;
mod field;
mod keyframes;
mod sky;

pub use entity::{AddEntity, RemoveEntity};
pub use field::SetField;
pub use keyframes::{MoveKeyframe, move_keyframes};
pub use sky::SetSky;
