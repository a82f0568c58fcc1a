//! Collection types and utilities
//!
//! Generational handle storage used for imported assets. Handles stay valid
//! only as long as the slot they point at is occupied; stale handles resolve
//! to `None` instead of aliasing a newer entry.

use serde::{Deserialize, Serialize};
use slotmap::{DefaultKey, Key, SlotMap};
use std::marker::PhantomData;

/// Type-safe handle into a [`HandleMap`]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypedHandle<T> {
    key: DefaultKey,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedHandle<T> {
    fn new(key: DefaultKey) -> Self {
        Self { key, _marker: PhantomData }
    }

    /// A handle that never resolves
    pub fn null() -> Self {
        Self::new(DefaultKey::null())
    }
}

impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> std::hash::Hash for TypedHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> std::fmt::Debug for TypedHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypedHandle({:?})", self.key)
    }
}

/// Slot map keyed by [`TypedHandle`]
#[derive(Debug, Clone)]
pub struct HandleMap<T> {
    slots: SlotMap<DefaultKey, T>,
}

impl<T> Default for HandleMap<T> {
    fn default() -> Self {
        Self { slots: SlotMap::new() }
    }
}

impl<T> HandleMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value and return its handle
    pub fn insert(&mut self, value: T) -> TypedHandle<T> {
        TypedHandle::new(self.slots.insert(value))
    }

    /// Look up a value
    pub fn get(&self, handle: TypedHandle<T>) -> Option<&T> {
        self.slots.get(handle.key)
    }

    /// Remove a value, invalidating its handle
    pub fn remove(&mut self, handle: TypedHandle<T>) -> Option<T> {
        self.slots.remove(handle.key)
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut map = HandleMap::new();
        let handle = map.insert("sofa");
        assert_eq!(map.get(handle), Some(&"sofa"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_stale_handle_does_not_alias() {
        let mut map = HandleMap::new();
        let first = map.insert(1);
        map.remove(first);
        let second = map.insert(2);
        assert!(map.get(first).is_none());
        assert_eq!(map.get(second), Some(&2));
        assert_ne!(first, second);
    }

    #[test]
    fn test_null_handle() {
        let map: HandleMap<u8> = HandleMap::new();
        assert!(map.get(TypedHandle::null()).is_none());
    }
}
