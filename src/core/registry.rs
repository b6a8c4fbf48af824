//! # Weak Registry
//!
//! Keyed, insertion-ordered collection of weakly-held values. Used by every
//! coordinator to remember its children without keeping them alive.
//!
//! ```text
//! WeakRegistry
//! ├── [0] (First,  None)        → Weak<dyn Coordinator>   (live)
//! ├── [1] (Picker, Some("to"))  → Weak<dyn Coordinator>   (dead, evicted on next read)
//! └── [2] (Picker, Some("from"))→ Weak<dyn Coordinator>   (live)
//! ```
//!
//! Misses are absence, never failure. Dead slots are compacted lazily: `get`
//! evicts the slot it finds dead, `values` skips dead slots without mutating.
//! Child registries hold a handful of entries, so slots live in a `Vec` and
//! lookups are linear scans that keep registration order for free.

use std::fmt;
use std::rc::{Rc, Weak};

struct Slot<K, V: ?Sized> {
    key: K,
    value: Weak<V>,
}

pub struct WeakRegistry<K, V: ?Sized> {
    slots: Vec<Slot<K, V>>,
}

impl<K: PartialEq, V: ?Sized> WeakRegistry<K, V> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register `value` under `key`. An existing entry for the same key is
    /// replaced and the new entry moves to the end of the order.
    pub fn set(&mut self, key: K, value: &Rc<V>) {
        self.slots.retain(|slot| slot.key != key);
        self.slots.push(Slot {
            key,
            value: Rc::downgrade(value),
        });
    }

    /// Look up `key`. A slot whose referent is gone is evicted and reported
    /// as a miss.
    pub fn get(&mut self, key: &K) -> Option<Rc<V>> {
        let index = self.slots.iter().position(|slot| slot.key == *key)?;
        match self.slots[index].value.upgrade() {
            Some(value) => Some(value),
            None => {
                self.slots.remove(index);
                None
            }
        }
    }

    /// Remove the entry for `key`, live or not. Returns whether a slot existed.
    pub fn remove(&mut self, key: &K) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.key != *key);
        self.slots.len() != before
    }

    /// Remove the entry for `key` only if its referent is already gone.
    ///
    /// A newer live value registered under the same key stays in place.
    pub fn remove_if_dead(&mut self, key: &K) -> bool {
        let before = self.slots.len();
        self.slots
            .retain(|slot| slot.key != *key || slot.value.strong_count() > 0);
        self.slots.len() != before
    }

    /// Live values in registration order. Dead slots are skipped.
    pub fn values(&self) -> impl Iterator<Item = Rc<V>> + '_ {
        self.slots.iter().filter_map(|slot| slot.value.upgrade())
    }

    /// Live `(key, value)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, Rc<V>)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.value.upgrade().map(|value| (&slot.key, value)))
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.value.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every dead slot. Returns how many were evicted.
    pub fn compact(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.value.strong_count() > 0);
        before - self.slots.len()
    }
}

impl<K: PartialEq, V: ?Sized> Default for WeakRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: ?Sized> fmt::Debug for WeakRegistry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.slots
                    .iter()
                    .map(|slot| (&slot.key, slot.value.strong_count() > 0)),
            )
            .finish()
    }
}
