//! Composite operations.

use std::fmt;

use super::operation::{Document, Operation, OperationError, OperationResult};

/// An ordered list of operations undone and redone as one atomic unit.
///
/// Children run in insertion order on [`redo`](Operation::redo) and in
/// reverse on [`undo`](Operation::undo), so a child may depend on state an
/// earlier sibling established. A group is itself an [`Operation`] and can be
/// nested inside another group to any depth.
///
/// Children are best-effort: if one reports a stale target the rest still
/// run, and the first error is returned.
pub struct Group<D: Document> {
    label: String,
    children: Vec<Box<dyn Operation<D>>>,
}

impl<D: Document> Group<D> {
    /// Creates an empty group with a display label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child. Children are never removed or reordered.
    pub fn add_child(&mut self, op: Box<dyn Operation<D>>) {
        self.children.push(op);
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the group has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Labels of the direct children, in insertion order.
    pub fn child_labels(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.label())
    }
}

impl<D: Document> Operation<D> for Group<D> {
    fn undo(&mut self, doc: &mut D) -> OperationResult {
        let mut first_error: Option<OperationError> = None;
        for child in self.children.iter_mut().rev() {
            if let Err(e) = child.undo(doc) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn redo(&mut self, doc: &mut D) -> OperationResult {
        let mut first_error: Option<OperationError> = None;
        for child in self.children.iter_mut() {
            if let Err(e) = child.redo(doc) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl<D: Document> fmt::Debug for Group<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("label", &self.label)
            .field("children", &self.children)
            .finish()
    }
}
