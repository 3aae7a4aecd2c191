//! Read-only projection of a history stack.

use std::num::NonZeroUsize;

use super::bounded_stack::{BoundedHistoryStack, PushTag};
use super::error::{HistoryError, HistoryStack};

/// Read access to one of the controller's stacks. Only the controller itself
/// can push or pop; subscribe through
/// [`EditHistoryController::add_listener`](super::EditHistoryController::add_listener).
#[derive(Debug)]
pub struct StackView<'a, S> {
    kind: HistoryStack,
    stack: &'a BoundedHistoryStack<S>,
}

// Manual impls: a view is copyable regardless of `S`
impl<S> Clone for StackView<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for StackView<'_, S> {}

impl<'a, S> StackView<'a, S> {
    pub(super) fn new(kind: HistoryStack, stack: &'a BoundedHistoryStack<S>) -> Self {
        Self { kind, stack }
    }

    pub fn kind(&self) -> HistoryStack {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.stack.capacity()
    }

    /// Most recent snapshot on this stack
    pub fn peek(&self) -> Result<&'a S, HistoryError> {
        self.stack
            .peek()
            .map_err(|_| HistoryError::EmptyHistory(self.kind))
    }

    /// Tag of the push that produced the most recent snapshot
    pub fn top_tag(&self) -> Result<PushTag, HistoryError> {
        self.stack
            .top_tag()
            .map_err(|_| HistoryError::EmptyHistory(self.kind))
    }

    /// Snapshots from oldest to most recent
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a S> + ExactSizeIterator + use<'a, S> {
        self.stack.iter()
    }
}
