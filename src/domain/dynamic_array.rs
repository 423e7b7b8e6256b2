//! Growable array backed by a fixed-capacity buffer.
//!
//! The buffer is a boxed slice of slots. When an append finds it full, a new
//! buffer of twice the capacity is allocated, the existing elements are moved
//! over in order and the old buffer is dropped. Capacity never shrinks.

use std::fmt;
use std::iter::FusedIterator;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::error::{ContainerError, ContainerResult};

/// Capacity of an array created with [`DynamicArray::new`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Index-addressable, append-only sequence with amortized O(1) append.
///
/// Slots `[0, size)` hold values, slots `[size, capacity)` are vacant.
///
/// No internal locking: sharing one array between threads needs external
/// mutual exclusion (e.g. a `Mutex`).
#[derive(Clone)]
pub struct DynamicArray<T> {
    buffer: Box<[Option<T>]>,
    size: usize,
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicArray<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Empty array with room for `capacity` elements before the first growth.
    /// A capacity of 0 is allowed; the first append then grows to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Self::allocate(capacity),
            size: 0,
        }
    }

    fn allocate(capacity: usize) -> Box<[Option<T>]> {
        std::iter::repeat_with(|| None).take(capacity).collect()
    }

    #[instrument(level = "trace", skip(self, value), fields(size = self.size))]
    pub fn append(&mut self, value: T) {
        if self.size == self.capacity() {
            self.grow();
        }
        self.buffer[self.size] = Some(value);
        self.size += 1;
    }

    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.saturating_mul(2).max(1);
        let mut buffer = Self::allocate(new_capacity);
        for (slot, old) in buffer.iter_mut().zip(self.buffer.iter_mut()) {
            *slot = old.take();
        }
        self.buffer = buffer;
        debug!(old_capacity, new_capacity, "grew buffer");
    }

    /// Element at `index`, or `OutOfRange` if `index >= size`.
    pub fn get(&self, index: usize) -> ContainerResult<&T> {
        self.buffer[..self.size]
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(ContainerError::OutOfRange {
                index: index as i128,
                size: self.size,
            })
    }

    /// Same as [`get`](Self::get) for a signed index; negative indices are
    /// always `OutOfRange`.
    pub fn get_signed(&self, index: i64) -> ContainerResult<&T> {
        let idx = usize::try_from(index).map_err(|_| ContainerError::OutOfRange {
            index: index.into(),
            size: self.size,
        })?;
        self.get(idx)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Restartable view over `[0, size)` in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.buffer[..self.size].iter(),
        }
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Snapshot of the elements in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

/// Space separated elements, e.g. `Apple Banana Cherry`.
impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().format(" "))
    }
}

/// Borrowing iterator over the occupied slots of a [`DynamicArray`].
pub struct Iter<'a, T> {
    slots: std::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(value) = slot {
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Some(value) = slot {
                return Some(value);
            }
        }
        None
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
