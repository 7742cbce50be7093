// SPDX-License-Identifier: MPL-2.0
//! Bounded ring buffer for diagnostic events.

use std::collections::VecDeque;

pub use crate::domain::diagnostics::BufferCapacity;

/// A fixed-capacity buffer that evicts its oldest element when full.
///
/// Elements are kept in chronological order (oldest first).
///
/// # Example
///
/// ```
/// use image_cropping::diagnostics::{BufferCapacity, CircularBuffer};
///
/// let mut buffer: CircularBuffer<u32> = CircularBuffer::new(BufferCapacity::default());
/// buffer.push(1);
/// buffer.push(2);
///
/// assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a buffer with an unclamped capacity (at least 1); handy in tests.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
