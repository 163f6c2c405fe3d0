//! Insertion Order Module
//!
//! Tracks the order in which keys were first inserted, for FIFO eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// FIFO key order.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest insertion (next eviction candidate)
/// - Back = Newest insertion
///
/// Reads never reorder keys, and re-inserting a tracked key keeps its slot.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates an empty order tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push ==
    /// Appends a key if it is not already tracked.
    pub fn push(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_back(key.to_string());
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop Oldest ==
    /// Returns and removes the earliest inserted key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    // == Iter ==
    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
