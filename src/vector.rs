//! Growable contiguous storage used as the representation of JSON arrays
use std::fmt::{Debug, Formatter};
use std::ops::Index;

use tracing::error;

use crate::errors::ParserResult;
use crate::storage_error;
use crate::value::JsonValue;

/// Default number of elements allocated for a new array
pub const DEFAULT_VECTOR_CAPACITY: usize = 8;

/// Ordered sequence of [JsonValue]s. Capacity is managed explicitly: it doubles as soon as a
/// push would leave fewer than two free slots.
#[derive(Clone)]
pub struct ElementVector<'a> {
    elements: Vec<JsonValue<'a>>,
    capacity: usize,
}

impl<'a> ElementVector<'a> {
    /// Create a vector able to hold `capacity` elements. A zero capacity is bumped to one.
    pub fn with_capacity(capacity: usize) -> ParserResult<Self> {
        let capacity = capacity.max(1);
        let mut elements = Vec::new();
        if elements.try_reserve_exact(capacity).is_err() {
            error!(capacity, "unable to allocate element vector");
            return storage_error!();
        }
        Ok(ElementVector { elements, capacity })
    }

    /// Append a value, growing first if needed
    pub fn push(&mut self, value: JsonValue<'a>) -> ParserResult<()> {
        if self.elements.len() + 2 > self.capacity {
            let capacity = self.capacity * 2;
            if self
                .elements
                .try_reserve_exact(capacity - self.elements.len())
                .is_err()
            {
                error!(capacity, "unable to grow element vector");
                return storage_error!();
            }
            self.capacity = capacity;
        }
        self.elements.push(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&JsonValue<'a>> {
        self.elements.get(index)
    }

    /// Number of elements pushed
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements the vector can hold before it next grows
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JsonValue<'a>> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[JsonValue<'a>] {
        &self.elements
    }
}

impl Default for ElementVector<'_> {
    fn default() -> Self {
        ElementVector {
            elements: Vec::with_capacity(DEFAULT_VECTOR_CAPACITY),
            capacity: DEFAULT_VECTOR_CAPACITY,
        }
    }
}

impl<'a> Index<usize> for ElementVector<'a> {
    type Output = JsonValue<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<'v, 'a> IntoIterator for &'v ElementVector<'a> {
    type Item = &'v JsonValue<'a>;
    type IntoIter = std::slice::Iter<'v, JsonValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl PartialEq for ElementVector<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Debug for ElementVector<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}
