//! Fixed-capacity stack of snapshots that drops its oldest entry on overflow.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use thiserror::Error;

use super::listeners::{ChangeListeners, ListenerId};

/// Returned by [`BoundedHistoryStack::pop`] and [`BoundedHistoryStack::peek`] on an empty stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("history stack is empty")]
pub struct EmptyStackError;

/// Identifies one push onto a [`BoundedHistoryStack`].
///
/// Tags increase with every push and are never reused by the same stack, so two
/// entries with equal contents pushed at different times carry different tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PushTag(u64);

#[derive(Debug)]
struct Entry<S> {
    tag: PushTag,
    state: S,
}

/// Last-in-first-out sequence of at most `capacity` snapshots.
///
/// Pushing onto a full stack evicts the bottom (oldest) entry. Every mutation
/// that changes the contents notifies the registered change listeners after
/// the mutation has completed.
#[derive(Debug)]
pub struct BoundedHistoryStack<S> {
    capacity: NonZeroUsize,
    /// Oldest first, top of the stack last
    entries: VecDeque<Entry<S>>,
    next_tag: u64,
    listeners: ChangeListeners,
}

impl<S> BoundedHistoryStack<S> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.get()),
            next_tag: 0,
            listeners: ChangeListeners::new(),
        }
    }

    /// Push a new top entry, evicting the oldest entry if the stack is full
    pub fn push(&mut self, state: S) -> PushTag {
        let tag = PushTag(self.next_tag);
        self.next_tag += 1;
        self.entries.push_back(Entry { tag, state });
        while self.entries.len() > self.capacity.get() {
            self.entries.pop_front();
        }
        self.listeners.notify();
        tag
    }

    /// Remove and return the top entry
    pub fn pop(&mut self) -> Result<S, EmptyStackError> {
        let entry = self.entries.pop_back().ok_or(EmptyStackError)?;
        self.listeners.notify();
        Ok(entry.state)
    }

    /// Top entry, without removing it
    pub fn peek(&self) -> Result<&S, EmptyStackError> {
        self.entries
            .back()
            .map(|entry| &entry.state)
            .ok_or(EmptyStackError)
    }

    /// Tag of the push that put the top entry there
    pub fn top_tag(&self) -> Result<PushTag, EmptyStackError> {
        self.entries
            .back()
            .map(|entry| entry.tag)
            .ok_or(EmptyStackError)
    }

    /// Remove every entry. Listeners are only notified if there was something to remove.
    pub fn empty(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.listeners.notify();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Entries from oldest to most recent
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &S> + ExactSizeIterator {
        self.entries.iter().map(|entry| &entry.state)
    }

    pub fn add_listener(&mut self, listener: impl FnMut() + Send + Sync + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
