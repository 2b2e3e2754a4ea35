//! Open-addressed hash table used as the representation of JSON objects.
//!
//! Keys are slices borrowed from the source text and are compared byte for byte. Slots are
//! located with FNV-1a and linear probing, and the table doubles in size whenever an insertion
//! would push the load factor above 0.75.
use std::fmt::{Debug, Formatter};

use tracing::error;

use crate::errors::ParserResult;
use crate::storage_error;
use crate::value::JsonValue;

/// Default number of slots allocated for a new object
pub const DEFAULT_TABLE_CAPACITY: usize = 25;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over the key bytes
#[inline]
pub fn fnv1a(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, b| {
        (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// A single key/value pair stored in a [PropertyTable]
#[derive(Debug, Clone, PartialEq)]
pub struct Property<'a> {
    pub key: &'a str,
    pub value: JsonValue<'a>,
}

/// A table slot. Occupancy is explicit, so the empty string is an ordinary key.
#[derive(Debug, Clone, Default)]
pub enum Slot<'a> {
    #[default]
    Empty,
    Occupied(Property<'a>),
}

/// Hash map from borrowed keys to [JsonValue]s
#[derive(Clone)]
pub struct PropertyTable<'a> {
    slots: Vec<Slot<'a>>,
    size: usize,
}

/// Allocate `capacity` empty slots, reporting failure rather than aborting
fn allocate_slots<'a>(capacity: usize) -> ParserResult<Vec<Slot<'a>>> {
    let mut slots = Vec::new();
    if slots.try_reserve_exact(capacity).is_err() {
        error!(capacity, "unable to allocate property table");
        return storage_error!();
    }
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

/// Probe `slots` for `key`, returning the index of either the slot holding it or the first
/// empty slot encountered. `slots` must contain at least one empty slot.
fn find_slot(slots: &[Slot], key: &str) -> usize {
    let capacity = slots.len();
    let mut index = fnv1a(key) as usize % capacity;
    loop {
        match &slots[index] {
            Slot::Empty => return index,
            Slot::Occupied(property) if property.key == key => return index,
            Slot::Occupied(_) => index = (index + 1) % capacity,
        }
    }
}

impl<'a> PropertyTable<'a> {
    /// Create a table with `capacity` empty slots. A zero capacity is bumped to one so the
    /// table can always be probed.
    pub fn with_capacity(capacity: usize) -> ParserResult<Self> {
        Ok(PropertyTable {
            slots: allocate_slots(capacity.max(1))?,
            size: 0,
        })
    }

    /// Number of properties stored
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert a property, overwriting the value of an existing key. Returns whether the key was
    /// new. Grows the table first if the insertion could take it past the load factor.
    pub fn insert(&mut self, key: &'a str, value: JsonValue<'a>) -> ParserResult<bool> {
        if (self.size + 1) * 4 > self.capacity() * 3 {
            self.grow()?;
        }
        let index = find_slot(&self.slots, key);
        let is_new = matches!(self.slots[index], Slot::Empty);
        if is_new {
            self.size += 1;
        }
        self.slots[index] = Slot::Occupied(Property { key, value });
        Ok(is_new)
    }

    /// Look up the value stored against `key`
    pub fn get(&self, key: &str) -> Option<&JsonValue<'a>> {
        match &self.slots[find_slot(&self.slots, key)] {
            Slot::Occupied(property) => Some(&property.value),
            Slot::Empty => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over the stored properties in slot order. This is not insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Property<'a>> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(property) => Some(property),
            Slot::Empty => None,
        })
    }

    /// Double the capacity and rehash every occupied slot into the new storage
    fn grow(&mut self) -> ParserResult<()> {
        let mut slots = allocate_slots(self.capacity() * 2)?;
        for slot in self.slots.drain(..) {
            if let Slot::Occupied(property) = slot {
                let index = find_slot(&slots, property.key);
                slots[index] = Slot::Occupied(property);
            }
        }
        self.slots = slots;
        Ok(())
    }
}

impl Default for PropertyTable<'_> {
    fn default() -> Self {
        PropertyTable {
            slots: vec![Slot::Empty; DEFAULT_TABLE_CAPACITY],
            size: 0,
        }
    }
}

impl PartialEq for PropertyTable<'_> {
    /// Two tables are equal when they hold the same keys with equal values, regardless of
    /// capacity or slot order
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .iter()
                .all(|property| other.get(property.key) == Some(&property.value))
    }
}

impl Debug for PropertyTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|property| (property.key, &property.value)))
            .finish()
    }
}
