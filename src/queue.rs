//! Double-ended work queue and the removal orders the dispatcher uses.

use std::collections::vec_deque::{self, VecDeque};

/// End of the queue that supplies the next dispatched input.
///
/// New inputs are always appended at the tail; only removal differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueueOrder {
    /// Take from the head: breadth-first expansion.
    #[default]
    Fifo,
    /// Take from the tail: depth-first expansion.
    Lifo,
}

/// Pending inputs, owned by the control thread.
#[derive(Debug, Clone)]
pub struct WorkQueue<T> {
    items: VecDeque<T>,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn head(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn tail(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn push_head(&mut self, item: T) {
        self.items.push_front(item);
    }

    pub fn push_tail(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn pop_head(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn pop_tail(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Remove the next item according to `order`.
    pub fn take(&mut self, order: QueueOrder) -> Option<T> {
        match order {
            QueueOrder::Fifo => self.pop_head(),
            QueueOrder::Lifo => self.pop_tail(),
        }
    }

    /// Undo a `take` with the same `order`.
    pub fn restore(&mut self, order: QueueOrder, item: T) {
        match order {
            QueueOrder::Fifo => self.push_head(item),
            QueueOrder::Lifo => self.push_tail(item),
        }
    }

    /// Iterate head to tail.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for WorkQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for WorkQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
