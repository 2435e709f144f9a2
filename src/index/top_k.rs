//! Bounded top-K selection over a stream of weighted values
//!
//! `Largest` keeps the K highest-weighted values seen so far in a binary
//! min-heap, so the lowest retained weight is always at the root and each
//! offer costs O(log K). The full candidate set is never sorted.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A value paired with its weight. Ordered by weight only.
#[derive(Debug, Clone)]
struct Weighted<T> {
    weight: f64,
    value: T,
}

impl<T> PartialEq for Weighted<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Weighted<T> {}

impl<T> PartialOrd for Weighted<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Weighted<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.total_cmp(&other.weight)
    }
}

/// Retains the `capacity` highest-weighted values offered to it.
///
/// One instance per query; offers take `&mut self`.
#[derive(Debug)]
pub struct Largest<T> {
    capacity: usize,
    heap: BinaryHeap<Reverse<Weighted<T>>>,
}

impl<T> Largest<T> {
    /// Create a selector holding at most `capacity` values.
    ///
    /// A capacity of zero collects nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(1024)),
        }
    }

    /// Offer a value.
    ///
    /// Below capacity the value is kept unconditionally. At capacity it
    /// replaces the lowest-weighted held value only if `weight` is strictly
    /// greater, so ties at the boundary never evict.
    pub fn offer(&mut self, value: T, weight: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(Weighted { weight, value }));
            return;
        }
        if let Some(mut lowest) = self.heap.peek_mut() {
            if weight > lowest.0.weight {
                lowest.0 = Weighted { weight, value };
            }
        }
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Lowest weight currently held, if any.
    pub fn min_weight(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.0.weight)
    }

    /// Borrow the held values with their weights, highest weight first.
    pub fn items(&self) -> Vec<(&T, f64)> {
        let mut items: Vec<(&T, f64)> = self
            .heap
            .iter()
            .map(|entry| (&entry.0.value, entry.0.weight))
            .collect();
        items.sort_by(|a, b| b.1.total_cmp(&a.1));
        items
    }

    /// Consume the selector, returning values with their weights, highest
    /// weight first.
    pub fn into_sorted(self) -> Vec<(T, f64)> {
        // ascending by Reverse is descending by weight
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(entry)| (entry.value, entry.weight))
            .collect()
    }
}
