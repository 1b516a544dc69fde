use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use rustc_hash::FxHashMap;

/// A set that assigns a unique, dense index to every element in insertion
/// order. The element belonging to an index can be retrieved in constant time.
pub struct IndexedSet<T> {
    elements: Vec<T>,
    index: FxHashMap<T, usize>,
}

impl<T: Clone + Eq + Hash> IndexedSet<T> {
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Inserts the given element, and returns its index together with true iff
    /// the element was not yet present.
    pub fn insert(&mut self, element: T) -> (usize, bool) {
        if let Some(&index) = self.index.get(&element) {
            return (index, false);
        }

        let index = self.elements.len();
        self.index.insert(element.clone(), index);
        self.elements.push(element);
        (index, true)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

impl<T: Clone + Eq + Hash> Default for IndexedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for IndexedSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.elements.iter().enumerate()).finish()
    }
}
