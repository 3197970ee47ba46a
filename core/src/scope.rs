//! Scoped group guards.
//!
//! [`GroupScope`] wraps the `begin_group` / `submit_group` / `end_group`
//! protocol of [`History`] in a guard that mutably borrows the history, so
//! the group level is always closed, even on early returns and `?`.

use super::group::Group;
use super::history::History;
use super::operation::{Document, Operation, Recorder};

/// An open group on a [`History`], closed when the guard goes away.
///
/// Children are added with [`submit`](Self::submit) or by passing the scope
/// as the recorder: `op.submit(&mut scope)`. Nested scopes borrow the outer
/// one, so the inner level is closed before the outer can be touched again.
///
/// Finishing:
///
/// - [`commit`](Self::commit) registers the group one level up.
/// - [`rollback`](Self::rollback) reverts the children collected so far and
///   discards the group.
/// - Dropping an unfinished scope registers a non-empty group and discards
///   an empty one.
///
/// # Example
///
/// ```ignore
/// let mut drag = history.group("Drag");
/// for x in positions {
///     SetField::apply(&mut scene, "Chair/Transform/PositionX", x)?.submit(&mut drag);
/// }
/// drag.commit();
/// ```
pub struct GroupScope<'h, D: Document> {
    history: &'h mut History<D>,
    depth: usize,
    finished: bool,
}

/// Something a group can be opened on: a [`History`] or an open [`GroupScope`].
///
/// Builders that emit a group of operations take a `GroupHost` so they work
/// both at top level and nested inside a caller's group.
pub trait GroupHost<D: Document>: Recorder<D> {
    /// Opens a group one level below `self`.
    fn open_group(&mut self, label: &str) -> GroupScope<'_, D>;
}

impl<D: Document> History<D> {
    /// Opens a group and returns a guard that closes it.
    pub fn group(&mut self, label: impl Into<String>) -> GroupScope<'_, D> {
        GroupScope::open(self, Group::new(label))
    }
}

impl<D: Document> GroupHost<D> for History<D> {
    fn open_group(&mut self, label: &str) -> GroupScope<'_, D> {
        self.group(label)
    }
}

impl<'h, D: Document> GroupScope<'h, D> {
    fn open(history: &'h mut History<D>, group: Group<D>) -> Self {
        history.begin_group(group);
        let depth = history.group_depth();
        Self {
            history,
            depth,
            finished: false,
        }
    }

    /// Adds an already-applied operation to this group.
    pub fn submit(&mut self, op: Box<dyn Operation<D>>) {
        debug_assert_eq!(self.history.group_depth(), self.depth);
        self.history.submit(op);
    }

    /// Opens a nested group inside this one.
    pub fn group(&mut self, label: impl Into<String>) -> GroupScope<'_, D> {
        GroupScope::open(&mut *self.history, Group::new(label))
    }

    /// Label of the group this scope guards.
    pub fn label(&self) -> &str {
        self.history.current_group().map_or("", |g| g.label())
    }

    /// Number of children collected so far.
    pub fn len(&self) -> usize {
        self.history.current_group().map_or(0, |g| g.len())
    }

    /// Returns `true` if nothing has been submitted to this group yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers the group as one entry one level up and closes it.
    pub fn commit(mut self) {
        self.close(true);
    }

    /// Reverts every child collected so far, newest first, and closes the
    /// group without registering anything.
    pub fn rollback(mut self, doc: &mut D) {
        self.finished = true;
        if let Some(mut group) = self.history.take_open_group() {
            log::debug!(
                "Rolling back group \"{}\" ({} operation(s))",
                group.label(),
                group.len()
            );
            if let Err(e) = group.undo(doc) {
                log::debug!("Rollback of \"{}\" skipped: {e}", group.label());
            }
        }
    }

    fn close(&mut self, submit: bool) {
        self.finished = true;
        if submit {
            self.history.submit_group();
        }
        self.history.end_group();
    }
}

impl<D: Document> Recorder<D> for GroupScope<'_, D> {
    fn record(&mut self, op: Box<dyn Operation<D>>) {
        self.submit(op);
    }
}

impl<D: Document> GroupHost<D> for GroupScope<'_, D> {
    fn open_group(&mut self, label: &str) -> GroupScope<'_, D> {
        self.group(label)
    }
}

impl<D: Document> Drop for GroupScope<'_, D> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let keep = !self.is_empty();
        if keep {
            log::warn!(
                "Group \"{}\" dropped without commit, registering {} operation(s)",
                self.label(),
                self.len()
            );
        }
        self.close(keep);
    }
}
