//! Documents and reversible operations.
//!
//! This module defines the contract every history entry satisfies:
//!
//! - [`Document`] - an editable target, with hooks for playback state and selection
//! - [`Operation`] - a reversible unit of work (Command pattern)
//! - [`Recorder`] / [`Submit`] - where finished operations get registered
//! - [`OperationError`] / [`OperationResult`] - stale-target reporting
//!
//! Operations are self-contained: each implementation stores whatever handles
//! and before/after values it needs to revert and reapply itself. The forward
//! effect is performed by whoever constructs the operation; submitting only
//! registers it.

use std::fmt;

use thiserror::Error;

/// A type that operations can edit: a scene graph, an ECS world, a text buffer.
///
/// The provided methods connect the history to the rest of the editor. Both
/// have inert defaults, so a plain marker impl is enough for simple targets.
///
/// # Example
///
/// ```ignore
/// struct MyScene { /* ... */ }
/// impl Document for MyScene {}
/// ```
pub trait Document: 'static {
    /// Whether an animation playback is currently running.
    ///
    /// While this returns `true`, [`History::undo`](crate::History::undo) and
    /// [`History::redo`](crate::History::redo) refuse to traverse.
    fn is_playing(&self) -> bool {
        false
    }

    /// Drops any selection state. Called by [`History::clear`](crate::History::clear),
    /// since selected handles would point at entities no longer reachable.
    fn reset_selection(&mut self) {}
}

/// Failure reported by an operation while reverting or reapplying itself.
///
/// The history never propagates these. A stale target is expected when the
/// document changed shape between stack traversals, so the entry is moved to
/// the other stack anyway and the error is only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The handle held by the operation no longer resolves.
    #[error("target not found: {0}")]
    TargetNotFound(String),
    /// The target exists but is in a state the operation cannot act on.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Result type for [`Operation::undo`] and [`Operation::redo`].
pub type OperationResult<T = ()> = Result<T, OperationError>;

/// A reversible operation recorded in a [`History`](crate::History).
///
/// There are two shapes: leaf operations (any user type) and
/// [`Group`](crate::Group), an ordered list of child operations handled as
/// one unit. Both are stored as `Box<dyn Operation<D>>`.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct Rename {
///     entity: EntityId,
///     old: String,
///     new: String,
/// }
///
/// impl Operation<Scene> for Rename {
///     fn undo(&mut self, scene: &mut Scene) -> OperationResult {
///         scene.rename(self.entity, &self.old)
///     }
///
///     fn redo(&mut self, scene: &mut Scene) -> OperationResult {
///         scene.rename(self.entity, &self.new)
///     }
///
///     fn label(&self) -> &str {
///         "Rename"
///     }
/// }
/// ```
pub trait Operation<D: Document>: fmt::Debug + Send {
    /// Reverses the forward effect.
    fn undo(&mut self, doc: &mut D) -> OperationResult;

    /// Reapplies the forward effect.
    ///
    /// Must leave the document in the same state the original application did.
    fn redo(&mut self, doc: &mut D) -> OperationResult;

    /// A short, human-readable label for history panels.
    ///
    /// Examples: `"Add entity"`, `"Set Transform.PositionX"`, `"Move keyframes"`.
    fn label(&self) -> &str;
}

/// Something an operation can be submitted to.
///
/// Implemented by [`History`](crate::History), which routes into the open
/// group if there is one, and by [`GroupScope`](crate::GroupScope).
pub trait Recorder<D: Document> {
    /// Registers an already-applied operation.
    fn record(&mut self, op: Box<dyn Operation<D>>);
}

/// Submission entry point, available on every sized operation.
///
/// `op.submit(&mut history)` boxes the operation and hands it to the
/// recorder. The operation must already have performed its forward effect.
pub trait Submit<D: Document>: Operation<D> + Sized + 'static {
    /// Registers `self` with `recorder`.
    fn submit<R: Recorder<D> + ?Sized>(self, recorder: &mut R) {
        recorder.record(Box::new(self));
    }
}

impl<D: Document, O: Operation<D> + 'static> Submit<D> for O {}
