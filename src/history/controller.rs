//! Undo/redo orchestration over a [`Document`].

use std::num::NonZeroUsize;

use tracing::{debug, warn};

use crate::constants::DEFAULT_HISTORY_CAPACITY;
use crate::document::Document;

use super::bounded_stack::BoundedHistoryStack;
use super::error::{HistoryError, HistoryStack};
use super::listeners::ListenerId;
use super::view::StackView;

/// Snapshot-based undo/redo for a document.
///
/// Callers take a snapshot with [`push_undo_stack`](Self::push_undo_stack)
/// before mutating the document; [`undo`](Self::undo) and [`redo`](Self::redo)
/// then move snapshots between the two stacks and restore the document.
///
/// After a successful or failed `push_undo_stack` the redo stack is empty.
pub struct EditHistoryController<D: Document> {
    document: D,
    undo_stack: BoundedHistoryStack<D::State>,
    redo_stack: BoundedHistoryStack<D::State>,
}

impl<D: Document> EditHistoryController<D> {
    /// Both stacks hold up to `capacity` snapshots
    pub fn new(document: D, capacity: NonZeroUsize) -> Self {
        Self {
            document,
            undo_stack: BoundedHistoryStack::new(capacity),
            redo_stack: BoundedHistoryStack::new(capacity),
        }
    }

    pub fn with_default_capacity(document: D) -> Self {
        Self::new(document, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access for edits. Take a snapshot with `push_undo_stack` first
    /// if the edit should be undoable.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    /// Snapshot the current document onto the undo stack.
    ///
    /// The redo stack is cleared before serializing and stays cleared even if
    /// serialization fails: the caller is about to start a new edit either way.
    pub fn push_undo_stack(&mut self) -> Result<(), HistoryError> {
        self.redo_stack.empty();

        let state = self.document.serialize().map_err(|e| {
            warn!("Failed to snapshot document for undo: {}", e);
            HistoryError::Serialization(e)
        })?;

        self.undo_stack.push(state);
        debug!("Pushed undo snapshot ({} on undo stack)", self.undo_stack.len());
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Restore the most recent undo snapshot, keeping the current state for redo.
    ///
    /// If the restore fails the popped snapshot is dropped, the document is
    /// left as it was and nothing is pushed onto the redo stack.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        Self::step(
            &mut self.document,
            &mut self.undo_stack,
            &mut self.redo_stack,
            HistoryStack::Undo,
        )
    }

    /// Mirror image of [`undo`](Self::undo)
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        Self::step(
            &mut self.document,
            &mut self.redo_stack,
            &mut self.undo_stack,
            HistoryStack::Redo,
        )
    }

    /// Move one snapshot from `source` to `target`, applying it to the document
    fn step(
        document: &mut D,
        source: &mut BoundedHistoryStack<D::State>,
        target: &mut BoundedHistoryStack<D::State>,
        kind: HistoryStack,
    ) -> Result<(), HistoryError> {
        let current = document.serialize().map_err(HistoryError::Serialization)?;

        let previous = source
            .pop()
            .map_err(|_| HistoryError::EmptyHistory(kind))?;

        if let Err(e) = document.restore(&previous) {
            warn!("Failed to restore document during {}: {}", kind, e);
            return Err(HistoryError::Restore(e));
        }

        target.push(current);
        debug!("Applied {} ({} left)", kind, source.len());
        Ok(())
    }

    pub fn undo_stack(&self) -> StackView<'_, D::State> {
        StackView::new(HistoryStack::Undo, &self.undo_stack)
    }

    pub fn redo_stack(&self) -> StackView<'_, D::State> {
        StackView::new(HistoryStack::Redo, &self.redo_stack)
    }

    /// Be notified whenever the contents of the given stack change
    pub fn add_listener(
        &mut self,
        stack: HistoryStack,
        listener: impl FnMut() + Send + Sync + 'static,
    ) -> ListenerId {
        self.stack_mut(stack).add_listener(listener)
    }

    pub fn remove_listener(&mut self, stack: HistoryStack, id: ListenerId) -> bool {
        self.stack_mut(stack).remove_listener(id)
    }

    /// Drop all history, e.g. after opening a different file
    pub fn clear(&mut self) {
        self.undo_stack.empty();
        self.redo_stack.empty();
    }

    fn stack_mut(&mut self, stack: HistoryStack) -> &mut BoundedHistoryStack<D::State> {
        match stack {
            HistoryStack::Undo => &mut self.undo_stack,
            HistoryStack::Redo => &mut self.redo_stack,
        }
    }
}
