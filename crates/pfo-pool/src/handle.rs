//! Generic slot+generation handle table.
//!
//! Destroyed handles have stale generation counters and safely return
//! `None` instead of resolving to whatever object reused the slot.
//! Double-remove is a safe no-op (returns `None`).

use std::marker::PhantomData;

use pfo_core::ObjectKey;

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// A slot+generation table mapping typed keys to owned values.
///
/// Reuses slots via a free list. Generation counters increment on removal,
/// making stale keys detectable.
pub struct HandleTable<K, T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: usize,
    _key: PhantomData<K>,
}

impl<K: ObjectKey, T> HandleTable<K, T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty table with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
            _key: PhantomData,
        }
    }

    /// Insert a value and return its key.
    pub fn insert(&mut self, value: T) -> K {
        self.live += 1;
        if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.data = Some(value);
            K::from_parts(slot_idx, slot.generation)
        } else {
            let slot_idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                data: Some(value),
            });
            K::from_parts(slot_idx, 0)
        }
    }

    /// Whether the key refers to a live value.
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Shared access to the value behind a key.
    ///
    /// Returns `None` if the key is stale or was never issued.
    pub fn get(&self, key: K) -> Option<&T> {
        let slot = self.slots.get(key.slot() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.data.as_ref()
    }

    /// Mutable access to the value behind a key.
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let slot = self.slots.get_mut(key.slot() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.data.as_mut()
    }

    /// Mutable access to two distinct live values at once.
    ///
    /// Returns `None` if either key is stale or both keys name the same slot.
    pub fn get_pair_mut(&mut self, a: K, b: K) -> Option<(&mut T, &mut T)> {
        let (ia, ib) = (a.slot() as usize, b.slot() as usize);
        if ia == ib || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let (lo, hi) = if ia < ib { (ia, ib) } else { (ib, ia) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let lo_ref = head[lo].data.as_mut()?;
        let hi_ref = tail[0].data.as_mut()?;
        if ia < ib {
            Some((lo_ref, hi_ref))
        } else {
            Some((hi_ref, lo_ref))
        }
    }

    /// Remove the value behind a key, returning it.
    ///
    /// Increments the generation counter and recycles the slot. A slot whose
    /// generation wraps back to 0 is permanently retired so stale keys from
    /// its first epoch can never resolve again.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let slot_idx = key.slot();
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        let value = slot.data.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free_list.push(slot_idx);
        }
        self.live -= 1;
        Some(value)
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the table holds no live values.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterate over live `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.data
                .as_ref()
                .map(|v| (K::from_parts(idx as u32, slot.generation), v))
        })
    }

    /// Drop every value. Generations are bumped so previously issued keys
    /// stay stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.data.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            if slot.generation != 0 {
                self.free_list.push(idx as u32);
            }
        }
        // Pop order hands out low slots first.
        self.free_list.reverse();
        self.live = 0;
    }
}

impl<K: ObjectKey, T> Default for HandleTable<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfo_core::PfoId;

    #[test]
    fn insert_get_round_trip() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let h = table.insert(42);
        assert_eq!(table.get(h), Some(&42));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn stale_generation_returns_none() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let h = table.insert(1);
        table.remove(h);
        assert_eq!(table.get(h), None);
        assert_eq!(table.get_mut(h), None);
        assert!(table.is_empty());
    }

    #[test]
    fn double_remove_returns_none() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let h = table.insert(1);
        assert_eq!(table.remove(h), Some(1));
        assert_eq!(table.remove(h), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn free_list_reuses_slots_with_new_generation() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let h1 = table.insert(1);
        table.remove(h1);
        let h2 = table.insert(2);
        assert_eq!(h1.slot(), h2.slot());
        assert_eq!(h2.generation(), h1.generation() + 1);
        assert_eq!(table.get(h1), None);
        assert_eq!(table.get(h2), Some(&2));
    }

    #[test]
    fn pair_mut_gives_both_in_argument_order() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let a = table.insert(1);
        let b = table.insert(2);
        {
            let (x, y) = table.get_pair_mut(b, a).unwrap();
            assert_eq!((*x, *y), (2, 1));
            *x = 20;
            *y = 10;
        }
        assert_eq!(table.get(a), Some(&10));
        assert_eq!(table.get(b), Some(&20));
    }

    #[test]
    fn pair_mut_rejects_same_or_stale() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let a = table.insert(1);
        let b = table.insert(2);
        assert!(table.get_pair_mut(a, a).is_none());
        table.remove(b);
        assert!(table.get_pair_mut(a, b).is_none());
    }

    #[test]
    fn iter_skips_removed() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let a = table.insert(1);
        let b = table.insert(2);
        let c = table.insert(3);
        table.remove(b);
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![a, c]);
    }

    #[test]
    fn clear_invalidates_outstanding_keys() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let a = table.insert(1);
        let b = table.insert(2);
        table.clear();
        assert!(table.is_empty());
        assert!(!table.contains(a));
        assert!(!table.contains(b));
        let c = table.insert(3);
        assert_eq!(c.slot(), 0);
        assert_ne!(c, a);
    }

    #[test]
    fn generation_exhaustion_retires_slot() {
        let mut table: HandleTable<PfoId, i32> = HandleTable::new();
        let h = table.insert(1);
        table.remove(h);

        table.slots[0].generation = u32::MAX;
        let h2 = table.insert(2);
        assert_eq!(h2.generation(), u32::MAX);

        // Wraps to 0: slot must not be recycled.
        table.remove(h2);
        assert_eq!(table.slots[0].generation, 0);
        assert!(!table.free_list.contains(&0));
        assert_eq!(table.get(PfoId::from_parts(0, 0)), None);

        let h3 = table.insert(3);
        assert_ne!(h3.slot(), 0, "retired slot must not be reused");
    }
}
