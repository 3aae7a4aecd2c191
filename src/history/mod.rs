//! Undo/redo history for editable documents.
//!
//! The history works on full snapshots: before an edit the caller pushes a
//! snapshot of the [`Document`](crate::document::Document) onto the undo
//! stack, and undo/redo swap snapshots between the undo and redo stacks while
//! restoring the document.
//!
//! ## Module Structure
//!
//! - [`bounded_stack`] - Fixed-capacity snapshot stack with drop-oldest overflow
//! - [`listeners`] - Observer list for stack change notifications
//! - [`controller`] - `EditHistoryController` enforcing the push/undo/redo protocol
//! - [`view`] - Read-only stack projections handed out by the controller
//! - [`checkpoint`] - Coalescing of bursts of edits into one undo step
//! - [`error`] - `HistoryError` and the `HistoryStack` discriminator

pub mod bounded_stack;
pub mod checkpoint;
pub mod controller;
pub mod error;
pub mod listeners;
pub mod view;

#[cfg(test)]
mod tests;

// Re-exports
pub use bounded_stack::{BoundedHistoryStack, EmptyStackError, PushTag};
pub use checkpoint::Checkpoint;
pub use controller::EditHistoryController;
pub use error::{HistoryError, HistoryStack};
pub use listeners::{ChangeListener, ChangeListeners, ListenerId};
pub use view::StackView;
