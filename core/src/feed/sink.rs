//! Bounded, newest-first sink backing every rendered list.

use crate::prelude::{FeedSink, SiteError, SiteResult};
use serde::Serialize;
use std::collections::VecDeque;

/// Fixed-capacity list that inserts at the front and evicts from the back.
#[derive(Debug, Clone)]
pub struct BoundedSink<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> BoundedSink<T> {
    pub fn new(capacity: usize) -> SiteResult<Self> {
        if capacity == 0 {
            return Err(SiteError::InvalidCapacity);
        }
        Ok(Self {
            capacity,
            items: VecDeque::with_capacity(capacity + 1),
        })
    }

    /// Pushes `item` to the front and trims to capacity. Returns the number
    /// of evicted items.
    pub fn insert(&mut self, item: T) -> usize {
        self.push(item);
        self.evict_overflow(self.capacity)
    }

    /// Inserts each item in order, so the last one ends up at the front.
    pub fn insert_all(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        items.into_iter().map(|item| self.insert(item)).sum()
    }

    /// Drops the current contents and fills the sink from `items`.
    pub fn replace(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        self.items.clear();
        self.insert_all(items)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> FeedSink<T> for BoundedSink<T> {
    fn push(&mut self, item: T) {
        self.items.push_front(item);
    }

    fn evict_overflow(&mut self, capacity: usize) -> usize {
        let overflow = self.items.len().saturating_sub(capacity);
        self.items.truncate(self.items.len() - overflow);
        overflow
    }

    fn list(&self) -> Vec<&T> {
        self.items.iter().collect()
    }
}

impl<T: Serialize> Serialize for BoundedSink<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            BoundedSink::<u32>::new(0),
            Err(SiteError::InvalidCapacity)
        ));
    }

    #[test]
    fn overflow_keeps_most_recent_items() {
        let mut sink = BoundedSink::new(20).unwrap();
        let evicted = sink.insert_all(1..=25);
        assert_eq!(evicted, 5);
        assert_eq!(sink.len(), 20);
        let kept: Vec<u32> = sink.iter().copied().collect();
        let expected: Vec<u32> = (6..=25).rev().collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn sink_never_exceeds_capacity() {
        let mut sink = BoundedSink::new(3).unwrap();
        for value in 0..50 {
            sink.insert(value);
            assert!(sink.len() <= sink.capacity());
        }
        assert_eq!(sink.front(), Some(&49));
    }

    #[test]
    fn evict_overflow_removes_from_back() {
        let mut sink = BoundedSink::new(10).unwrap();
        sink.insert_all(["a", "b", "c", "d"]);
        assert_eq!(sink.evict_overflow(2), 2);
        assert_eq!(sink.list(), vec![&"d", &"c"]);
        assert_eq!(sink.evict_overflow(5), 0);
    }

    #[test]
    fn replace_discards_previous_items() {
        let mut sink = BoundedSink::new(5).unwrap();
        sink.insert_all([1, 2, 3]);
        sink.replace([7, 8]);
        assert_eq!(sink.list(), vec![&8, &7]);
    }

    #[test]
    fn serializes_newest_first() {
        let mut sink = BoundedSink::new(4).unwrap();
        sink.insert_all([1, 2, 3]);
        assert_eq!(serde_json::to_string(&sink).unwrap(), "[3,2,1]");
    }
}
