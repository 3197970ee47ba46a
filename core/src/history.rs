//! Undo/redo history with nested groups and clean-state tracking.
//!
//! [`History`] owns the undo stack, the redo stack, the stack of currently
//! open [`Group`]s and the clean checkpoint. Submitting a new operation
//! outside any group clears the redo stack (standard editor behavior); inside
//! a group it is appended to the innermost open group instead.

use std::collections::VecDeque;
use std::fmt;

use super::config::HistoryConfig;
use super::group::Group;
use super::operation::{Document, Operation, Recorder};

/// Identity of a top-level history entry.
///
/// Assigned once when the entry is registered and kept while it moves between
/// the undo and redo stacks. The clean checkpoint compares these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct EntryId(u64);

/// Handle returned by [`History::on_dirty_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Outcome of [`History::undo`] / [`History::redo`].
///
/// Guarded calls are not errors; callers that care can check why nothing
/// happened, everyone else can ignore the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// An entry was moved to the other stack.
    Applied,
    /// The stack to pop from was empty.
    Empty,
    /// A group is open; close it before traversing.
    GroupOpen,
    /// The document reports an active playback.
    PlaybackActive,
}

struct Entry<D: Document> {
    id: EntryId,
    op: Box<dyn Operation<D>>,
}

struct OpenGroup<D: Document> {
    group: Group<D>,
    submitted: bool,
}

type DirtyListener = Box<dyn FnMut(bool) + Send>;

/// Manages undo/redo stacks, open groups and the dirty flag for one document.
///
/// A `History` is created when a document is loaded and cleared or dropped
/// when it is closed. It never touches the document on its own: operations
/// mutate it, the history only decides *when*.
///
/// # Example
///
/// ```ignore
/// let mut history = History::new();
/// let mut scene = Scene::new();
///
/// // The factory applies the effect, submit records it
/// AddEntity::apply(&mut scene, "Chair", None)?.submit(&mut history);
///
/// history.undo(&mut scene);
/// history.redo(&mut scene);
/// ```
///
/// # Groups
///
/// ```ignore
/// history.begin_group(Group::new("Drag"));
/// for frame in drag {
///     SetField::apply(&mut scene, "Chair/Transform/PositionX", frame.x)?
///         .submit(&mut history);
/// }
/// history.submit_group();
/// history.end_group();
/// ```
///
/// [`History::group`](Self::group) wraps the same protocol in a guard that
/// closes the group on every exit path.
pub struct History<D: Document> {
    undo_stack: VecDeque<Entry<D>>,
    redo_stack: Vec<Entry<D>>,
    group_stack: Vec<OpenGroup<D>>,
    clean_checkpoint: Option<EntryId>,
    /// Last entry dropped by the undo bound. Stands in for the top when the
    /// undo stack has been emptied past it.
    floor: Option<EntryId>,
    force_dirty: bool,
    max_undo: Option<usize>,
    next_entry: u64,
    listeners: Vec<(ListenerId, DirtyListener)>,
    next_listener: u64,
}

impl<D: Document> History<D> {
    /// Creates an empty, unbounded history. An empty history is clean.
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    /// Creates an empty history using `config`.
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            group_stack: Vec::new(),
            clean_checkpoint: None,
            floor: None,
            force_dirty: false,
            max_undo: config.effective_max_undo(),
            next_entry: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Registers an operation whose forward effect has already been applied.
    ///
    /// With a group open the operation becomes a child of the innermost
    /// group. Otherwise it is pushed onto the undo stack and the redo stack
    /// is discarded. Listeners are notified either way.
    pub fn submit(&mut self, op: Box<dyn Operation<D>>) {
        if let Some(open) = self.group_stack.last_mut() {
            log::debug!(
                "Recorded \"{}\" into group \"{}\"",
                op.label(),
                open.group.label()
            );
            open.group.add_child(op);
        } else {
            log::debug!("Recorded \"{}\"", op.label());
            let id = EntryId(self.next_entry);
            self.next_entry += 1;
            self.undo_stack.push_back(Entry { id, op });
            self.redo_stack.clear();
            self.enforce_max_undo();
        }
        self.notify_dirty();
    }

    /// Reverts the most recent entry and moves it to the redo stack.
    ///
    /// Does nothing while playback is active, while a group is open, or when
    /// there is nothing to undo. A stale target inside the entry is logged
    /// and the entry still moves.
    pub fn undo(&mut self, doc: &mut D) -> Traversal {
        if let Some(blocked) = self.traversal_guard(doc) {
            return blocked;
        }
        let Some(mut entry) = self.undo_stack.pop_back() else {
            return Traversal::Empty;
        };
        if let Err(e) = entry.op.undo(doc) {
            log::debug!("Undo of \"{}\" skipped: {e}", entry.op.label());
        } else {
            log::debug!("Undid \"{}\"", entry.op.label());
        }
        self.redo_stack.push(entry);
        self.notify_dirty();
        Traversal::Applied
    }

    /// Reapplies the most recently undone entry and moves it back to the
    /// undo stack. Guarded exactly like [`undo`](Self::undo).
    pub fn redo(&mut self, doc: &mut D) -> Traversal {
        if let Some(blocked) = self.traversal_guard(doc) {
            return blocked;
        }
        let Some(mut entry) = self.redo_stack.pop() else {
            return Traversal::Empty;
        };
        if let Err(e) = entry.op.redo(doc) {
            log::debug!("Redo of \"{}\" skipped: {e}", entry.op.label());
        } else {
            log::debug!("Redid \"{}\"", entry.op.label());
        }
        self.undo_stack.push_back(entry);
        self.notify_dirty();
        Traversal::Applied
    }

    /// Opens a group. Until the matching [`end_group`](Self::end_group),
    /// every submission lands in `group` and traversal is refused.
    pub fn begin_group(&mut self, group: Group<D>) {
        log::debug!(
            "Opened group \"{}\" at depth {}",
            group.label(),
            self.group_stack.len() + 1
        );
        self.group_stack.push(OpenGroup {
            group,
            submitted: false,
        });
    }

    /// Marks the innermost open group to be registered as a single entry
    /// when it is closed.
    ///
    /// Registration goes one level up: into the enclosing group if there is
    /// one, otherwise onto the undo stack.
    pub fn submit_group(&mut self) {
        match self.group_stack.last_mut() {
            Some(open) => open.submitted = true,
            None => log::warn!("submit_group called with no open group"),
        }
    }

    /// Closes the innermost open group.
    ///
    /// A group marked by [`submit_group`](Self::submit_group) is submitted
    /// one level up; an unmarked one is discarded along with its children.
    pub fn end_group(&mut self) {
        let Some(open) = self.group_stack.pop() else {
            log::warn!("end_group called with no open group");
            return;
        };
        if open.submitted {
            self.submit(Box::new(open.group));
        } else if !open.group.is_empty() {
            log::warn!(
                "Group \"{}\" closed without submit, dropping {} operation(s)",
                open.group.label(),
                open.group.len()
            );
        }
    }

    /// Pops the innermost open group without registering it.
    pub(crate) fn take_open_group(&mut self) -> Option<Group<D>> {
        self.group_stack.pop().map(|open| open.group)
    }

    /// Marks the document clean (`dirty == false`) or forces it dirty.
    ///
    /// Marking clean records the current top of the undo stack as the
    /// checkpoint and lifts any forced dirtiness.
    pub fn set_clean(&mut self, dirty: bool) {
        if dirty {
            self.force_dirty = true;
        } else {
            self.force_dirty = false;
            self.clean_checkpoint = self.position();
            log::info!("History marked clean at {:?}", self.clean_checkpoint);
        }
        self.notify_dirty();
    }

    /// Returns `true` if the document differs from its clean checkpoint.
    ///
    /// An empty undo stack counts as clean unless dirtiness was forced or
    /// the undo bound has dropped entries below it.
    pub fn is_dirty(&self) -> bool {
        if self.force_dirty {
            return true;
        }
        match self.position() {
            Some(position) => Some(position) != self.clean_checkpoint,
            None => false,
        }
    }

    /// Top of the undo stack, or the last dropped entry once the stack has
    /// been undone past the bound.
    fn position(&self) -> Option<EntryId> {
        self.undo_stack.back().map(|e| e.id).or(self.floor)
    }

    /// Drops every entry and open group and resets the document's selection.
    pub fn clear(&mut self, doc: &mut D) {
        log::info!(
            "Clearing history ({} undo, {} redo, {} open group(s))",
            self.undo_stack.len(),
            self.redo_stack.len(),
            self.group_stack.len()
        );
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.group_stack.clear();
        self.floor = None;
        doc.reset_selection();
    }

    /// Registers a callback invoked with [`is_dirty`](Self::is_dirty) after
    /// every submit, undo, redo and clean marking.
    pub fn on_dirty_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(bool) + Send + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregisters a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Returns `true` if there are entries that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns `true` if there are entries that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Returns the number of entries in the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of entries in the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo entry labels, most recent first.
    pub fn undo_labels(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(|e| e.op.label())
    }

    /// Redo entry labels, next-to-redo first.
    pub fn redo_labels(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(|e| e.op.label())
    }

    /// Returns `true` while at least one group is open.
    pub fn is_group_open(&self) -> bool {
        !self.group_stack.is_empty()
    }

    /// Number of currently open groups.
    pub fn group_depth(&self) -> usize {
        self.group_stack.len()
    }

    /// The innermost open group, if any.
    pub fn current_group(&self) -> Option<&Group<D>> {
        self.group_stack.last().map(|open| &open.group)
    }

    /// The undo depth bound, or `None` when unbounded.
    pub fn max_undo(&self) -> Option<usize> {
        self.max_undo
    }

    fn traversal_guard(&self, doc: &D) -> Option<Traversal> {
        if doc.is_playing() {
            Some(Traversal::PlaybackActive)
        } else if self.is_group_open() {
            Some(Traversal::GroupOpen)
        } else {
            None
        }
    }

    fn enforce_max_undo(&mut self) {
        let Some(max) = self.max_undo else {
            return;
        };
        while self.undo_stack.len() > max {
            if let Some(dropped) = self.undo_stack.pop_front() {
                self.floor = Some(dropped.id);
                log::debug!("Undo limit {max} reached, dropping \"{}\"", dropped.op.label());
            }
        }
    }

    fn notify_dirty(&mut self) {
        let dirty = self.is_dirty();
        for (_, listener) in &mut self.listeners {
            listener(dirty);
        }
    }
}

impl<D: Document> Default for History<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> Recorder<D> for History<D> {
    fn record(&mut self, op: Box<dyn Operation<D>>) {
        self.submit(op);
    }
}

impl<D: Document> fmt::Debug for History<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("group_depth", &self.group_stack.len())
            .field("clean_checkpoint", &self.clean_checkpoint)
            .field("floor", &self.floor)
            .field("force_dirty", &self.force_dirty)
            .field("max_undo", &self.max_undo)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::operation::{OperationError, OperationResult, Submit};

    /// Document with a value and a journal of what ran, in order.
    #[derive(Default)]
    struct Counter {
        value: i32,
        journal: Vec<String>,
        playing: bool,
        selection_resets: usize,
    }

    impl Document for Counter {
        fn is_playing(&self) -> bool {
            self.playing
        }

        fn reset_selection(&mut self) {
            self.selection_resets += 1;
        }
    }

    #[derive(Debug)]
    struct Add {
        name: &'static str,
        amount: i32,
    }

    impl Add {
        /// Applies the effect and returns the operation, ready to submit.
        fn apply(counter: &mut Counter, name: &'static str, amount: i32) -> Self {
            counter.value += amount;
            Self { name, amount }
        }
    }

    impl Operation<Counter> for Add {
        fn undo(&mut self, target: &mut Counter) -> OperationResult {
            target.value -= self.amount;
            target.journal.push(format!("undo {}", self.name));
            Ok(())
        }

        fn redo(&mut self, target: &mut Counter) -> OperationResult {
            target.value += self.amount;
            target.journal.push(format!("redo {}", self.name));
            Ok(())
        }

        fn label(&self) -> &str {
            self.name
        }
    }

    #[derive(Debug)]
    struct StaleTarget;

    impl Operation<Counter> for StaleTarget {
        fn undo(&mut self, _target: &mut Counter) -> OperationResult {
            Err(OperationError::TargetNotFound("entity 7".into()))
        }

        fn redo(&mut self, _target: &mut Counter) -> OperationResult {
            Err(OperationError::TargetNotFound("entity 7".into()))
        }

        fn label(&self) -> &str {
            "Stale"
        }
    }

    fn submit_add(history: &mut History<Counter>, counter: &mut Counter, name: &'static str, amount: i32) {
        Add::apply(counter, name, amount).submit(history);
    }

    #[test]
    fn submit_pushes_onto_undo_stack() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 5);

        assert_eq!(counter.value, 5);
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn undo_reverses_and_moves_to_redo() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 5);
        assert_eq!(history.undo(&mut counter), Traversal::Applied);

        assert_eq!(counter.value, 0);
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 1);
    }

    #[test]
    fn redo_reapplies_and_moves_to_undo() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 5);
        history.undo(&mut counter);
        assert_eq!(history.redo(&mut counter), Traversal::Applied);

        assert_eq!(counter.value, 5);
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut history = History::<Counter>::new();
        let mut counter = Counter::default();

        assert_eq!(history.undo(&mut counter), Traversal::Empty);
        assert_eq!(history.redo(&mut counter), Traversal::Empty);
        assert_eq!(counter.value, 0);
    }

    #[test]
    fn round_trip_restores_state() {
        let mut history = History::new();
        let mut counter = Counter::default();
        let amounts = [3, -1, 10, 7, 2];

        for amount in amounts {
            submit_add(&mut history, &mut counter, "step", amount);
        }
        let after_submits = counter.value;

        for _ in amounts {
            history.undo(&mut counter);
        }
        assert_eq!(counter.value, 0);

        for _ in amounts {
            history.redo(&mut counter);
        }
        assert_eq!(counter.value, after_submits);
        assert_eq!(history.undo_count(), amounts.len());
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn new_submission_invalidates_redo() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "A", 1);
        submit_add(&mut history, &mut counter, "B", 10);
        history.undo(&mut counter);
        assert_eq!(history.redo_labels().collect::<Vec<_>>(), vec!["B"]);

        submit_add(&mut history, &mut counter, "C", 100);
        assert_eq!(history.redo_count(), 0);
        assert_eq!(history.redo(&mut counter), Traversal::Empty);
        assert_eq!(counter.value, 101);
    }

    #[test]
    fn labels_most_recent_first() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "first", 1);
        submit_add(&mut history, &mut counter, "second", 1);
        assert_eq!(
            history.undo_labels().collect::<Vec<_>>(),
            vec!["second", "first"]
        );

        history.undo(&mut counter);
        history.undo(&mut counter);
        assert_eq!(
            history.redo_labels().collect::<Vec<_>>(),
            vec!["first", "second"]
        );
    }

    #[test]
    fn can_undo_can_redo() {
        let mut history = History::new();
        let mut counter = Counter::default();

        assert!(!history.can_undo());
        assert!(!history.can_redo());

        submit_add(&mut history, &mut counter, "a", 1);
        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo(&mut counter);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    // --- Groups ---

    #[test]
    fn group_is_one_atomic_entry() {
        let mut history = History::new();
        let mut counter = Counter::default();

        history.begin_group(Group::new("G"));
        submit_add(&mut history, &mut counter, "op1", 1);
        submit_add(&mut history, &mut counter, "op2", 2);
        assert_eq!(history.undo_count(), 0);
        history.submit_group();
        history.end_group();

        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.undo_labels().collect::<Vec<_>>(), vec!["G"]);

        history.undo(&mut counter);
        assert_eq!(counter.value, 0);
        assert_eq!(counter.journal, vec!["undo op2", "undo op1"]);

        history.redo(&mut counter);
        assert_eq!(counter.value, 3);
        assert_eq!(
            counter.journal[2..],
            ["redo op1".to_string(), "redo op2".to_string()]
        );
    }

    #[test]
    fn nested_groups_collapse_into_outer_entry() {
        let mut history = History::new();
        let mut counter = Counter::default();

        history.begin_group(Group::new("A"));
        submit_add(&mut history, &mut counter, "op1", 1);
        history.begin_group(Group::new("B"));
        submit_add(&mut history, &mut counter, "op2", 2);
        assert_eq!(history.group_depth(), 2);
        history.submit_group();
        history.end_group();
        assert_eq!(history.current_group().map(|g| g.len()), Some(2));
        history.submit_group();
        history.end_group();

        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.undo_labels().collect::<Vec<_>>(), vec!["A"]);

        history.undo(&mut counter);
        assert_eq!(counter.journal, vec!["undo op2", "undo op1"]);
        assert_eq!(counter.value, 0);
    }

    #[test]
    fn traversal_refused_while_group_open() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        submit_add(&mut history, &mut counter, "b", 1);
        history.undo(&mut counter);

        history.begin_group(Group::new("Open"));
        assert_eq!(history.undo(&mut counter), Traversal::GroupOpen);
        assert_eq!(history.redo(&mut counter), Traversal::GroupOpen);
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 1);
        assert_eq!(counter.value, 1);

        history.end_group();
        assert_eq!(history.undo(&mut counter), Traversal::Applied);
    }

    #[test]
    fn group_submission_keeps_redo_until_registered() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        history.undo(&mut counter);

        history.begin_group(Group::new("G"));
        submit_add(&mut history, &mut counter, "b", 1);
        assert_eq!(history.redo_count(), 1);
        history.submit_group();
        history.end_group();
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn unsubmitted_group_is_discarded() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "undone", 100);
        history.undo(&mut counter);

        history.begin_group(Group::new("Abandoned"));
        submit_add(&mut history, &mut counter, "a", 1);
        history.end_group();

        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 1);
        assert_eq!(counter.value, 1);
        assert!(!history.is_group_open());
    }

    #[test]
    fn end_group_without_open_group_is_noop() {
        let mut history = History::<Counter>::new();
        history.end_group();
        history.submit_group();
        assert_eq!(history.group_depth(), 0);
        assert_eq!(history.undo_count(), 0);
    }

    // --- Playback guard ---

    #[test]
    fn traversal_refused_during_playback() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 4);
        counter.playing = true;
        assert_eq!(history.undo(&mut counter), Traversal::PlaybackActive);
        assert_eq!(counter.value, 4);

        counter.playing = false;
        history.undo(&mut counter);
        counter.playing = true;
        assert_eq!(history.redo(&mut counter), Traversal::PlaybackActive);
        assert_eq!(counter.value, 0);
    }

    // --- Stale targets ---

    #[test]
    fn stale_target_still_moves_entry() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        StaleTarget.submit(&mut history);
        submit_add(&mut history, &mut counter, "b", 2);

        history.undo(&mut counter);
        assert_eq!(history.undo(&mut counter), Traversal::Applied);
        history.undo(&mut counter);
        assert_eq!(counter.value, 0);
        assert_eq!(history.redo_count(), 3);

        for _ in 0..3 {
            history.redo(&mut counter);
        }
        assert_eq!(counter.value, 3);
    }

    // --- Dirty tracking ---

    #[test]
    fn fresh_history_is_clean() {
        let history = History::<Counter>::new();
        assert!(!history.is_dirty());
    }

    #[test]
    fn dirty_sequence() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        assert!(history.is_dirty());

        history.set_clean(false);
        assert!(!history.is_dirty());

        submit_add(&mut history, &mut counter, "b", 1);
        assert!(history.is_dirty());

        history.undo(&mut counter);
        assert!(!history.is_dirty());

        history.redo(&mut counter);
        assert!(history.is_dirty());
    }

    #[test]
    fn undo_past_checkpoint_is_dirty() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        submit_add(&mut history, &mut counter, "b", 1);
        history.set_clean(false);

        history.undo(&mut counter);
        assert!(history.is_dirty());
        history.redo(&mut counter);
        assert!(!history.is_dirty());
    }

    #[test]
    fn undo_to_empty_stack_is_clean() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        history.set_clean(false);
        history.undo(&mut counter);
        assert!(!history.is_dirty());
    }

    #[test]
    fn checkpoint_lost_on_new_branch() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        submit_add(&mut history, &mut counter, "b", 1);
        history.set_clean(false);
        history.undo(&mut counter);
        submit_add(&mut history, &mut counter, "c", 1);

        assert!(history.is_dirty());
        history.undo(&mut counter);
        // Back at "a", which is not the checkpoint
        assert!(history.is_dirty());
    }

    #[test]
    fn forced_dirty_overrides_stack_state() {
        let mut history = History::<Counter>::new();
        history.set_clean(true);
        assert!(history.is_dirty());

        history.set_clean(false);
        assert!(!history.is_dirty());
    }

    #[test]
    fn submit_into_group_does_not_move_checkpoint() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        history.set_clean(false);

        history.begin_group(Group::new("G"));
        submit_add(&mut history, &mut counter, "b", 1);
        assert!(!history.is_dirty());
        history.submit_group();
        history.end_group();
        assert!(history.is_dirty());
    }

    #[test]
    fn listeners_receive_dirty_state() {
        let mut history = History::new();
        let mut counter = Counter::default();
        let (tx, rx) = mpsc::channel();
        history.on_dirty_changed(move |dirty| {
            let _ = tx.send(dirty);
        });

        submit_add(&mut history, &mut counter, "a", 1);
        history.set_clean(false);
        history.begin_group(Group::new("G"));
        submit_add(&mut history, &mut counter, "b", 1);
        history.submit_group();
        history.end_group();
        history.undo(&mut counter);
        history.set_clean(true);

        // The submit into the open group notifies too, while still clean.
        let seen: Vec<bool> = rx.try_iter().collect();
        assert_eq!(seen, vec![true, false, false, true, false, true]);
    }

    #[test]
    fn guarded_traversal_does_not_notify() {
        let mut history = History::new();
        let mut counter = Counter::default();
        submit_add(&mut history, &mut counter, "a", 1);

        let (tx, rx) = mpsc::channel();
        history.on_dirty_changed(move |dirty| {
            let _ = tx.send(dirty);
        });
        history.begin_group(Group::new("Open"));
        history.undo(&mut counter);
        history.redo(&mut counter);

        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn removed_listener_is_silent() {
        let mut history = History::new();
        let mut counter = Counter::default();
        let (tx, rx) = mpsc::channel();
        let id = history.on_dirty_changed(move |dirty| {
            let _ = tx.send(dirty);
        });

        assert!(history.remove_listener(id));
        assert!(!history.remove_listener(id));
        submit_add(&mut history, &mut counter, "a", 1);
        assert_eq!(rx.try_iter().count(), 0);
    }

    // --- Clear ---

    #[test]
    fn clear_empties_everything_and_resets_selection() {
        let mut history = History::new();
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        submit_add(&mut history, &mut counter, "b", 1);
        history.undo(&mut counter);
        history.begin_group(Group::new("Open"));

        history.clear(&mut counter);
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 0);
        assert!(!history.is_group_open());
        assert_eq!(counter.selection_resets, 1);
        assert_eq!(history.undo(&mut counter), Traversal::Empty);
    }

    // --- Undo bound ---

    #[test]
    fn max_undo_drops_oldest() {
        let mut history = History::with_config(HistoryConfig::bounded(2));
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        submit_add(&mut history, &mut counter, "b", 2);
        submit_add(&mut history, &mut counter, "c", 3);
        assert_eq!(history.undo_count(), 2);
        assert_eq!(history.max_undo(), Some(2));

        history.undo(&mut counter);
        history.undo(&mut counter);
        assert_eq!(counter.value, 1);
        assert_eq!(history.undo(&mut counter), Traversal::Empty);
    }

    #[test]
    fn dropped_checkpoint_stays_dirty() {
        let mut history = History::with_config(HistoryConfig::bounded(1));
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        history.set_clean(false);
        submit_add(&mut history, &mut counter, "b", 1);
        assert_eq!(history.undo_count(), 1);
        assert!(history.is_dirty());
    }

    #[test]
    fn undoing_past_the_bound_is_dirty() {
        let mut history = History::with_config(HistoryConfig::bounded(2));
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "e1", 1);
        submit_add(&mut history, &mut counter, "e2", 10);
        history.set_clean(false);
        submit_add(&mut history, &mut counter, "e3", 100);
        assert_eq!(history.undo_count(), 2);

        history.undo(&mut counter);
        assert!(!history.is_dirty());
        history.undo(&mut counter);
        assert_eq!(counter.value, 1);
        assert!(history.is_dirty());

        history.redo(&mut counter);
        assert!(!history.is_dirty());
    }

    #[test]
    fn clean_mark_below_the_bound() {
        let mut history = History::with_config(HistoryConfig::bounded(1));
        let mut counter = Counter::default();

        submit_add(&mut history, &mut counter, "a", 1);
        submit_add(&mut history, &mut counter, "b", 1);
        history.undo(&mut counter);
        history.set_clean(false);
        assert!(!history.is_dirty());

        history.redo(&mut counter);
        assert!(history.is_dirty());
        history.undo(&mut counter);
        assert!(!history.is_dirty());
    }

    #[test]
    fn zero_bound_keeps_one_entry() {
        let mut history = History::with_config(HistoryConfig { max_undo: Some(0) });
        let mut counter = Counter::default();
        assert_eq!(history.max_undo(), Some(1));

        history.set_clean(false);
        submit_add(&mut history, &mut counter, "a", 5);
        assert_eq!(history.undo_count(), 1);
        assert!(history.is_dirty());
    }

    #[test]
    fn redo_stays_within_bound() {
        let mut history = History::with_config(HistoryConfig::bounded(2));
        let mut counter = Counter::default();

        for name in ["a", "b", "c"] {
            submit_add(&mut history, &mut counter, name, 1);
        }
        history.undo(&mut counter);
        history.undo(&mut counter);
        history.redo(&mut counter);
        history.redo(&mut counter);
        assert_eq!(history.undo_count(), 2);
        assert_eq!(counter.value, 3);
    }

    #[test]
    fn debug_impl() {
        let history = History::<Counter>::new();
        let debug = format!("{history:?}");
        assert!(debug.contains("History"));
        assert!(debug.contains("undo_count"));
    }
}
