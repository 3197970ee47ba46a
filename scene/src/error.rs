//! Error types for scene operations.

use rewind_core::{AddressError, OperationError};
use thiserror::Error;

use crate::entity::EntityId;

/// Errors raised when constructing a scene operation.
///
/// Once an operation exists its undo/redo never fail loudly; these only come
/// out of the `apply` factories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error("{0} not found")]
    EntityNotFound(EntityId),
    #[error("no entity at path \"{0}\"")]
    PathNotFound(String),
    #[error("{0} has no animation")]
    NoAnimation(EntityId),
    #[error("no keyframe for \"{property}\" at frame {frame}")]
    NoKeyframe { property: String, frame: i32 },
}

/// Result type for scene operation factories.
pub type SceneResult<T> = Result<T, SceneError>;

/// Stale-handle error reported from inside undo/redo.
pub(crate) fn stale(entity: EntityId) -> OperationError {
    OperationError::TargetNotFound(entity.to_string())
}
