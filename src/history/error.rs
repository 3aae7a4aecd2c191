//! Errors surfaced by the edit history.

use std::fmt;

use thiserror::Error;

use crate::document::DocumentError;

/// Which of the two history stacks an operation concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryStack {
    Undo,
    Redo,
}

impl fmt::Display for HistoryStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryStack::Undo => write!(f, "undo"),
            HistoryStack::Redo => write!(f, "redo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Nothing to undo/redo (or to peek at)
    #[error("nothing on the {0} stack")]
    EmptyHistory(HistoryStack),
    #[error("failed to serialize document: {0}")]
    Serialization(#[source] DocumentError),
    #[error("failed to restore document: {0}")]
    Restore(#[source] DocumentError),
}
