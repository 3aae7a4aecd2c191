//! Unit tests for the history module.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use crate::document::{Document, DocumentError};

use super::{
    BoundedHistoryStack, Checkpoint, EditHistoryController, EmptyStackError, HistoryError,
    HistoryStack,
};

fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

/// Document holding a single sequence string, with switchable failures
#[derive(Debug, Default)]
struct SequenceDocument {
    sequence: String,
    fail_serialize: bool,
    fail_restore: bool,
}

impl SequenceDocument {
    fn new(sequence: &str) -> Self {
        Self {
            sequence: sequence.to_string(),
            ..Default::default()
        }
    }
}

impl Document for SequenceDocument {
    type State = String;

    fn serialize(&self) -> Result<String, DocumentError> {
        if self.fail_serialize {
            return Err(DocumentError::DuplicateId("b1".into()));
        }
        Ok(self.sequence.clone())
    }

    fn restore(&mut self, state: &String) -> Result<(), DocumentError> {
        if self.fail_restore {
            return Err(DocumentError::UnknownId("b7".into()));
        }
        self.sequence = state.clone();
        Ok(())
    }
}

fn counter() -> (Arc<Mutex<usize>>, impl FnMut() + Send + Sync + 'static) {
    let count = Arc::new(Mutex::new(0));
    let inner = Arc::clone(&count);
    (count, move || *inner.lock().unwrap() += 1)
}

// BoundedHistoryStack tests

#[test]
fn test_stack_evicts_oldest_on_overflow() {
    let mut stack = BoundedHistoryStack::new(capacity(2));
    stack.push("a");
    stack.push("b");
    stack.push("c");

    assert_eq!(stack.len(), 2);
    assert_eq!(stack.peek(), Ok(&"c"));
    assert_eq!(stack.pop(), Ok("c"));
    assert_eq!(stack.pop(), Ok("b"));
    assert_eq!(stack.pop(), Err(EmptyStackError));
}

#[test]
fn test_stack_pop_and_peek_on_empty() {
    let mut stack: BoundedHistoryStack<i32> = BoundedHistoryStack::new(capacity(3));
    assert!(stack.is_empty());
    assert_eq!(stack.peek(), Err(EmptyStackError));
    assert_eq!(stack.pop(), Err(EmptyStackError));
    assert!(stack.is_empty());
}

#[test]
fn test_stack_iter_oldest_first() {
    let mut stack = BoundedHistoryStack::new(capacity(3));
    for i in 0..5 {
        stack.push(i);
    }
    assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
}

#[test]
fn test_stack_notifies_on_push_and_pop() {
    let (count, listener) = counter();
    let mut stack = BoundedHistoryStack::new(capacity(2));
    stack.add_listener(listener);

    stack.push(1);
    stack.push(2);
    stack.push(3);
    assert_eq!(*count.lock().unwrap(), 3);

    stack.pop().unwrap();
    assert_eq!(*count.lock().unwrap(), 4);
}

#[test]
fn test_stack_failed_pop_and_peek_do_not_notify() {
    let (count, listener) = counter();
    let mut stack: BoundedHistoryStack<i32> = BoundedHistoryStack::new(capacity(2));
    stack.add_listener(listener);

    let _ = stack.pop();
    let _ = stack.peek();
    assert_eq!(*count.lock().unwrap(), 0);
}

#[test]
fn test_stack_empty_notifies_only_when_non_empty() {
    let (count, listener) = counter();
    let mut stack = BoundedHistoryStack::new(capacity(4));
    stack.add_listener(listener);

    stack.empty();
    assert_eq!(*count.lock().unwrap(), 0);

    stack.push(1);
    stack.push(2);
    stack.empty();
    assert!(stack.is_empty());
    assert_eq!(*count.lock().unwrap(), 3);
}

#[test]
fn test_stack_removed_listener_not_notified() {
    let (count, listener) = counter();
    let mut stack = BoundedHistoryStack::new(capacity(4));
    let id = stack.add_listener(listener);
    assert!(stack.remove_listener(id));

    stack.push(1);
    assert_eq!(*count.lock().unwrap(), 0);
}

#[test]
fn test_push_tags_are_distinct_for_equal_entries() {
    let mut stack = BoundedHistoryStack::new(capacity(2));
    assert_eq!(stack.top_tag(), Err(EmptyStackError));

    let first = stack.push("a");
    stack.pop().unwrap();
    let second = stack.push("a");

    assert_ne!(first, second);
    assert_eq!(stack.top_tag(), Ok(second));

    // Eviction keeps the surviving entries' tags
    let third = stack.push("b");
    let fourth = stack.push("c");
    assert!(third < fourth);
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.top_tag(), Ok(fourth));
    stack.pop().unwrap();
    assert_eq!(stack.top_tag(), Ok(third));
}

proptest! {
    #[test]
    fn prop_stack_keeps_last_n_pushed(cap in 1usize..8, values in proptest::collection::vec(any::<u16>(), 0..40)) {
        let mut stack = BoundedHistoryStack::new(capacity(cap));
        for (k, value) in values.iter().enumerate() {
            stack.push(*value);
            prop_assert_eq!(stack.len(), (k + 1).min(cap));
        }

        let start = values.len().saturating_sub(cap);
        let retained: Vec<u16> = stack.iter().copied().collect();
        prop_assert_eq!(retained, values[start..].to_vec());
    }

    #[test]
    fn prop_push_then_pop_restores_stack(cap in 1usize..8, values in proptest::collection::vec(any::<u16>(), 0..7), extra in any::<u16>()) {
        let mut stack = BoundedHistoryStack::new(capacity(cap.max(values.len() + 1)));
        for value in &values {
            stack.push(*value);
        }
        let before: Vec<u16> = stack.iter().copied().collect();

        stack.push(extra);
        prop_assert_eq!(stack.pop(), Ok(extra));
        prop_assert_eq!(stack.iter().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    fn prop_history_undo_redo_inverse(edits in proptest::collection::vec("[ACGU]{1,6}", 1..10)) {
        let mut history = EditHistoryController::new(SequenceDocument::new(""), capacity(32));
        for edit in &edits {
            history.push_undo_stack().unwrap();
            history.document_mut().sequence.push_str(edit);
        }
        let final_sequence = history.document().sequence.clone();

        for _ in &edits {
            history.undo().unwrap();
        }
        prop_assert_eq!(history.document().sequence.as_str(), "");
        prop_assert!(!history.can_undo());

        for _ in &edits {
            history.redo().unwrap();
        }
        prop_assert_eq!(&history.document().sequence, &final_sequence);
        prop_assert!(!history.can_redo());
    }
}

// EditHistoryController tests

#[test]
fn test_fresh_controller_push_then_undo() {
    let mut history = EditHistoryController::new(SequenceDocument::new("ABC"), capacity(10));
    assert!(!history.can_undo());
    assert!(!history.can_redo());

    history.push_undo_stack().unwrap();
    assert!(history.can_undo());

    history.undo().unwrap();
    assert!(!history.can_undo());
    assert!(history.can_redo());
}

#[test]
fn test_undo_and_redo_restore_sequences() {
    let mut history = EditHistoryController::new(SequenceDocument::new("ABC"), capacity(10));

    history.push_undo_stack().unwrap();
    history.document_mut().sequence = "ABCD".into();

    history.undo().unwrap();
    assert_eq!(history.document().sequence, "ABC");

    history.redo().unwrap();
    assert_eq!(history.document().sequence, "ABCD");
}

#[test]
fn test_undo_on_empty_history() {
    let mut history = EditHistoryController::new(SequenceDocument::new("ABC"), capacity(10));

    assert_eq!(
        history.undo(),
        Err(HistoryError::EmptyHistory(HistoryStack::Undo))
    );
    assert_eq!(history.document().sequence, "ABC");
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_redo_on_empty_history() {
    let mut history = EditHistoryController::new(SequenceDocument::new("ABC"), capacity(10));
    assert_eq!(
        history.redo(),
        Err(HistoryError::EmptyHistory(HistoryStack::Redo))
    );
    assert_eq!(history.document().sequence, "ABC");
}

#[test]
fn test_push_clears_redo() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    history.push_undo_stack().unwrap();
    history.document_mut().sequence = "AG".into();
    history.undo().unwrap();
    assert!(history.can_redo());

    history.push_undo_stack().unwrap();
    assert!(!history.can_redo());
}

#[test]
fn test_failed_push_still_clears_redo() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    history.push_undo_stack().unwrap();
    history.document_mut().sequence = "AG".into();
    history.undo().unwrap();
    assert!(history.can_redo());
    let undo_depth = history.undo_stack().len();

    history.document_mut().fail_serialize = true;
    let result = history.push_undo_stack();

    assert!(matches!(result, Err(HistoryError::Serialization(_))));
    assert!(!history.can_redo());
    assert_eq!(history.undo_stack().len(), undo_depth);
}

#[test]
fn test_failed_restore_during_undo_drops_snapshot() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    history.push_undo_stack().unwrap();
    history.document_mut().sequence = "AU".into();

    history.document_mut().fail_restore = true;
    let result = history.undo();

    assert!(matches!(result, Err(HistoryError::Restore(_))));
    assert_eq!(history.document().sequence, "AU");
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_failed_restore_during_redo_drops_snapshot() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    history.push_undo_stack().unwrap();
    history.document_mut().sequence = "AU".into();
    history.undo().unwrap();
    let undo_depth = history.undo_stack().len();

    history.document_mut().fail_restore = true;
    let result = history.redo();

    assert!(matches!(result, Err(HistoryError::Restore(_))));
    assert_eq!(history.document().sequence, "A");
    assert!(!history.can_redo());
    assert_eq!(history.undo_stack().len(), undo_depth);
}

#[test]
fn test_failed_serialize_during_undo_changes_nothing() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    history.push_undo_stack().unwrap();
    history.document_mut().sequence = "AC".into();

    history.document_mut().fail_serialize = true;
    let result = history.undo();

    assert!(matches!(result, Err(HistoryError::Serialization(_))));
    assert_eq!(history.document().sequence, "AC");
    assert_eq!(history.undo_stack().len(), 1);
    assert!(!history.can_redo());
}

#[test]
fn test_history_is_bounded() {
    let mut history = EditHistoryController::new(SequenceDocument::new(""), capacity(3));
    for base in ["A", "C", "G", "U", "A"] {
        history.push_undo_stack().unwrap();
        history.document_mut().sequence.push_str(base);
    }

    assert_eq!(history.undo_stack().len(), 3);
    assert_eq!(history.undo_stack().peek(), Ok(&"ACGU".to_string()));

    for _ in 0..3 {
        history.undo().unwrap();
    }
    assert_eq!(history.document().sequence, "AC");
    assert_eq!(
        history.undo(),
        Err(HistoryError::EmptyHistory(HistoryStack::Undo))
    );
}

#[test]
fn test_stack_views() {
    let mut history = EditHistoryController::new(SequenceDocument::new("G"), capacity(5));
    assert_eq!(
        history.redo_stack().peek(),
        Err(HistoryError::EmptyHistory(HistoryStack::Redo))
    );
    assert_eq!(history.undo_stack().kind(), HistoryStack::Undo);
    assert_eq!(history.undo_stack().capacity(), capacity(5));

    history.push_undo_stack().unwrap();
    history.document_mut().sequence = "GG".into();
    history.push_undo_stack().unwrap();

    let undo = history.undo_stack();
    assert!(!undo.is_empty());
    assert_eq!(undo.peek(), Ok(&"GG".to_string()));
    assert_eq!(undo.iter().cloned().collect::<Vec<_>>(), vec!["G", "GG"]);
}

#[test]
fn test_controller_listeners() {
    let mut history = EditHistoryController::new(SequenceDocument::new("C"), capacity(5));
    let (undo_count, undo_listener) = counter();
    let (redo_count, redo_listener) = counter();
    history.add_listener(HistoryStack::Undo, undo_listener);
    let redo_id = history.add_listener(HistoryStack::Redo, redo_listener);

    history.push_undo_stack().unwrap();
    assert_eq!(*undo_count.lock().unwrap(), 1);
    assert_eq!(*redo_count.lock().unwrap(), 0);

    history.undo().unwrap();
    assert_eq!(*undo_count.lock().unwrap(), 2);
    assert_eq!(*redo_count.lock().unwrap(), 1);

    assert!(history.remove_listener(HistoryStack::Redo, redo_id));
    history.push_undo_stack().unwrap();
    assert_eq!(*undo_count.lock().unwrap(), 3);
    assert_eq!(*redo_count.lock().unwrap(), 1);
}

#[test]
fn test_clear() {
    let mut history = EditHistoryController::new(SequenceDocument::new("C"), capacity(5));
    history.push_undo_stack().unwrap();
    history.push_undo_stack().unwrap();
    history.undo().unwrap();

    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.into_document().sequence, "C");
}

// Checkpoint tests

#[test]
fn test_checkpoint_coalesces_repeated_edits() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    let mut checkpoint = Checkpoint::new();

    assert_eq!(checkpoint.ensure(&mut history), Ok(true));
    history.document_mut().sequence.push('C');
    assert_eq!(checkpoint.ensure(&mut history), Ok(false));
    history.document_mut().sequence.push('G');

    assert_eq!(history.undo_stack().len(), 1);
    history.undo().unwrap();
    assert_eq!(history.document().sequence, "A");
}

#[test]
fn test_checkpoint_pushes_again_after_foreign_push() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    let mut checkpoint = Checkpoint::new();

    checkpoint.ensure(&mut history).unwrap();
    history.document_mut().sequence.push('C');

    history.push_undo_stack().unwrap();
    history.document_mut().sequence.push('G');

    assert_eq!(checkpoint.ensure(&mut history), Ok(true));
    assert_eq!(history.undo_stack().len(), 3);
}

#[test]
fn test_checkpoint_pushes_again_after_undo() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    let mut checkpoint = Checkpoint::new();

    checkpoint.ensure(&mut history).unwrap();
    history.document_mut().sequence.push('U');
    history.undo().unwrap();

    assert_eq!(checkpoint.ensure(&mut history), Ok(true));
    assert!(!history.can_redo());
}

#[test]
fn test_checkpoint_pushes_again_after_undo_then_redo() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    let mut checkpoint = Checkpoint::new();

    checkpoint.ensure(&mut history).unwrap();
    history.document_mut().sequence.push('C');
    history.undo().unwrap();
    history.redo().unwrap();

    // The redone snapshot equals the one pushed above but is a separate step
    assert_eq!(checkpoint.ensure(&mut history), Ok(true));
    history.document_mut().sequence.push('G');

    history.undo().unwrap();
    assert_eq!(history.document().sequence, "AC");
    history.undo().unwrap();
    assert_eq!(history.document().sequence, "A");
}

#[test]
fn test_checkpoint_pushes_again_after_clear() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    let mut checkpoint = Checkpoint::new();

    checkpoint.ensure(&mut history).unwrap();
    history.clear();
    history.push_undo_stack().unwrap();

    assert_eq!(checkpoint.ensure(&mut history), Ok(true));
    assert_eq!(history.undo_stack().len(), 2);
}

#[test]
fn test_checkpoint_reset() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    let mut checkpoint = Checkpoint::new();

    checkpoint.ensure(&mut history).unwrap();
    checkpoint.reset();
    assert_eq!(checkpoint.ensure(&mut history), Ok(true));
    assert_eq!(history.undo_stack().len(), 2);
}

#[test]
fn test_checkpoint_propagates_serialization_failure() {
    let mut history = EditHistoryController::new(SequenceDocument::new("A"), capacity(10));
    let mut checkpoint = Checkpoint::new();
    history.document_mut().fail_serialize = true;

    assert!(matches!(
        checkpoint.ensure(&mut history),
        Err(HistoryError::Serialization(_))
    ));
    assert!(!history.can_undo());
}
