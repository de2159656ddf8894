//! Insertion-ordered set
//!
//! Every aggregation step (interface closures, member unions, annotation
//! unions) dedups through this type and keeps first-seen order.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Set that iterates in insertion order
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    seen: FxHashSet<T>,
    items: Vec<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            seen: FxHashSet::default(),
            items: Vec::new(),
        }
    }

    /// Insert an element; returns `false` if it was already present
    pub fn insert(&mut self, item: T) -> bool {
        if self.seen.insert(item.clone()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    /// Whether the element is present
    pub fn contains(&self, item: &T) -> bool {
        self.seen.contains(item)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in insertion order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume into a vector, keeping insertion order
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
