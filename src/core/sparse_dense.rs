//! Adaptive sparse/dense indexed storage.
//!
//! [`SparseDense`] backs every index-addressed collection of the engine: the
//! branch→child map of split nodes, class weight vectors, categorical
//! contingency rows and post-split distributions. It starts sparse and is
//! promoted to a flat vector once [`should_densify`] holds; it is never
//! demoted. Both representations iterate in ascending index order and skip
//! vacant slots, so callers cannot observe which one is active.

use crate::core::constants::{DENSE_MIN_OCCUPIED, DENSE_RATIO};
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap};
use std::{iter, slice};

/// Promotion policy shared by every [`SparseDense`] instance.
#[inline]
pub fn should_densify(occupied: usize, capacity: usize) -> bool {
    occupied > DENSE_MIN_OCCUPIED && occupied * DENSE_RATIO > capacity
}

/// A value that can live in a [`SparseDense`] slot.
///
/// The default value marks an empty slot.
pub trait Slot: Clone + Default {
    /// Returns true if the slot holds no information.
    fn is_vacant(&self) -> bool;
}

impl Slot for f64 {
    fn is_vacant(&self) -> bool {
        *self == 0.0
    }
}

impl Slot for usize {
    fn is_vacant(&self) -> bool {
        *self == 0
    }
}

/// Index-addressed storage with a sparse and a dense representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SparseDense<T> {
    /// Ordered map of occupied slots plus the addressed capacity
    Sparse {
        /// Occupied slots
        entries: BTreeMap<usize, T>,
        /// Highest addressed index + 1
        capacity: usize,
    },
    /// Flat vector, vacant slots hold the default value
    Dense(Vec<T>),
}

impl<T> Default for SparseDense<T> {
    fn default() -> Self {
        SparseDense::Sparse {
            entries: BTreeMap::new(),
            capacity: 0,
        }
    }
}

impl<T: Slot> SparseDense<T> {
    /// Creates empty sparse storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty storage that is dense from the start.
    pub fn dense() -> Self {
        SparseDense::Dense(Vec::new())
    }

    /// Returns true once the storage has been promoted.
    pub fn is_dense(&self) -> bool {
        matches!(self, SparseDense::Dense(_))
    }

    /// Highest addressable index + 1.
    pub fn capacity(&self) -> usize {
        match self {
            SparseDense::Sparse { capacity, .. } => *capacity,
            SparseDense::Dense(values) => values.len(),
        }
    }

    /// Number of non-vacant slots.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if no slot holds a value.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Returns the value at `index`, or `None` for vacant slots.
    pub fn get(&self, index: usize) -> Option<&T> {
        let value = match self {
            SparseDense::Sparse { entries, .. } => entries.get(&index),
            SparseDense::Dense(values) => values.get(index),
        };
        value.filter(|v| !v.is_vacant())
    }

    /// Returns a mutable slot at `index`, inserting a vacant one if needed.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        let promote = match self {
            SparseDense::Sparse { entries, capacity } => {
                if !entries.contains_key(&index) {
                    entries.insert(index, T::default());
                    *capacity = (*capacity).max(index.saturating_add(1));
                }
                should_densify(entries.len(), *capacity)
            }
            SparseDense::Dense(_) => false,
        };
        if promote {
            self.densify();
        }

        match self {
            SparseDense::Sparse { entries, .. } => entries.entry(index).or_default(),
            SparseDense::Dense(values) => {
                grow(values, index.saturating_add(1));
                &mut values[index]
            }
        }
    }

    /// Stores `value` at `index`.
    pub fn set(&mut self, index: usize, value: T) {
        *self.get_mut(index) = value;
    }

    /// Iterates over non-vacant slots in ascending index order.
    pub fn iter(&self) -> Iter<'_, T> {
        let inner = match self {
            SparseDense::Sparse { entries, .. } => IterInner::Sparse(entries.iter()),
            SparseDense::Dense(values) => IterInner::Dense(values.iter().enumerate()),
        };
        Iter { inner }
    }

    fn densify(&mut self) {
        *self = match std::mem::take(self) {
            SparseDense::Sparse { entries, capacity } => {
                let mut values = Vec::with_capacity(capacity * 2);
                values.resize(capacity, T::default());
                for (index, value) in entries {
                    values[index] = value;
                }
                SparseDense::Dense(values)
            }
            dense => dense,
        };
    }
}

/// Dense storage grows to twice the required length.
fn grow<T: Slot>(values: &mut Vec<T>, len: usize) {
    if values.len() >= len {
        return;
    }
    if values.capacity() < len {
        values.reserve_exact(len.saturating_mul(2) - values.len());
    }
    values.resize(len, T::default());
}

impl<T: Slot + PartialEq> PartialEq for SparseDense<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Slot> FromIterator<(usize, T)> for SparseDense<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        let mut storage = SparseDense::new();
        for (index, value) in iter {
            storage.set(index, value);
        }
        storage
    }
}

/// Iterator over the occupied slots of a [`SparseDense`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: IterInner<'a, T>,
}

#[derive(Debug)]
enum IterInner<'a, T> {
    Sparse(btree_map::Iter<'a, usize, T>),
    Dense(iter::Enumerate<slice::Iter<'a, T>>),
}

impl<'a, T: Slot> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, value) = match &mut self.inner {
                IterInner::Sparse(entries) => entries.next().map(|(i, v)| (*i, v))?,
                IterInner::Dense(values) => values.next()?,
            };
            if !value.is_vacant() {
                return Some((index, value));
            }
        }
    }
}
