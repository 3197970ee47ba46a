//! History configuration.

use serde::Deserialize;

/// Tunables for a [`History`](crate::History).
///
/// Deserializable so editors can keep it in their project or session file:
///
/// ```toml
/// [history]
/// max_undo = 64
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undo entries. When exceeded, the oldest entry is
    /// dropped. `None` keeps everything. Zero is treated as one.
    pub max_undo: Option<usize>,
}

impl HistoryConfig {
    /// A configuration that never drops entries.
    pub fn unbounded() -> Self {
        Self { max_undo: None }
    }

    /// A configuration that keeps at most `max_undo` undo entries, and
    /// never fewer than one.
    pub fn bounded(max_undo: usize) -> Self {
        Self {
            max_undo: Some(max_undo.max(1)),
        }
    }

    /// The bound a [`History`](crate::History) actually applies.
    ///
    /// A bound of zero is raised to one.
    pub fn effective_max_undo(&self) -> Option<usize> {
        match self.max_undo {
            Some(0) => {
                log::warn!("max_undo = 0 would keep no history, using 1");
                Some(1)
            }
            other => other,
        }
    }
}
