//! # Rewind Core
//!
//! Transactional undo/redo history for editors that mutate an external
//! document such as a scene graph.
//!
//! - [`Document`] - the editable target, with playback and selection hooks
//! - [`Operation`] - a reversible unit of work (Command pattern)
//! - [`Group`] - an ordered set of operations undone/redone as one unit
//! - [`History`] - undo/redo stacks with nested groups and clean-state tracking
//! - [`GroupScope`] / [`GroupHost`] - guards that keep group nesting balanced
//! - [`FieldAddress`] - `entity/path/Component/field` parsing
//!
//! # Protocol
//!
//! Operations apply their forward effect when they are constructed and are
//! then submitted. Outside a group a submission becomes a new undo entry and
//! discards the redo stack. Inside a group it becomes a child of the
//! innermost group; the group is registered as a single entry when it is
//! closed. Traversal is refused while a group is open or while the document
//! reports an active playback.
//!
//! # Dirty state
//!
//! [`History::set_clean`] records the top undo entry as the clean checkpoint.
//! The document is dirty when the top entry differs from it, or when
//! dirtiness was forced. Listeners registered with
//! [`History::on_dirty_changed`] hear about every change.

pub mod address;
pub mod config;
pub mod group;
pub mod history;
pub mod operation;
pub mod scope;

pub use address::{AddressError, FieldAddress};
pub use config::HistoryConfig;
pub use group::Group;
pub use history::{History, ListenerId, Traversal};
pub use operation::{Document, Operation, OperationError, OperationResult, Recorder, Submit};
pub use scope::{GroupHost, GroupScope};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
