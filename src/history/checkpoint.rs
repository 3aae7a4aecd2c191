//! Coalescing of repeated small edits into a single undo step.

use crate::document::Document;

use super::bounded_stack::PushTag;
use super::controller::EditHistoryController;
use super::error::HistoryError;

/// Remembers the push it last made so that a burst of edits (say, holding an
/// arrow key to nudge bases) produces one undo step instead of one per edit.
///
/// A new snapshot is pushed only when the undo stack is empty or its top entry
/// did not come from this checkpoint's last push, i.e. someone else pushed,
/// undid or redid in the meantime. Entries are told apart by their
/// [`PushTag`], so a redo that puts back an equal snapshot still counts.
#[derive(Debug, Clone, Default)]
pub struct Checkpoint {
    last_pushed: Option<PushTag>,
}

impl Checkpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an undo snapshot unless this checkpoint's push is still on top.
    /// Returns whether a snapshot was pushed.
    pub fn ensure<D: Document>(
        &mut self,
        history: &mut EditHistoryController<D>,
    ) -> Result<bool, HistoryError> {
        let top = history.undo_stack().top_tag().ok();
        if top.is_some() && top == self.last_pushed {
            return Ok(false);
        }

        history.push_undo_stack()?;
        self.last_pushed = history.undo_stack().top_tag().ok();
        Ok(true)
    }

    /// Forget the remembered push so the next `ensure` always pushes
    pub fn reset(&mut self) {
        self.last_pushed = None;
    }
}
