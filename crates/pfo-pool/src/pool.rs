//! The algorithm-scoped object pool.
//!
//! [`AlgorithmObjectPool`] is the single owner of every object of type `T`
//! during a processing pass. Each object may be registered to the algorithm
//! that was running when it was created, which lets the framework enumerate
//! "the objects this algorithm made". The pool knows nothing about the
//! objects' internal structure; domain rules live in the layer above.

use indexmap::{IndexMap, IndexSet};
use log::trace;

use pfo_core::{AlgorithmId, ObjectKey};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::handle::HandleTable;

struct Entry<T> {
    value: T,
    owner: Option<AlgorithmId>,
}

/// Generational pool that tracks which algorithm created each object.
pub struct AlgorithmObjectPool<K, T> {
    table: HandleTable<K, Entry<T>>,
    /// Running algorithms, innermost last.
    algorithm_stack: Vec<AlgorithmId>,
    /// AlgorithmId → live keys registered to it, in creation order.
    ///
    /// Unregistering uses `shift_remove`, which is O(k) in the algorithm's
    /// object count; enumeration order stays the creation order.
    by_algorithm: IndexMap<AlgorithmId, IndexSet<K>>,
    max_algorithm_depth: usize,
}

impl<K: ObjectKey, T> AlgorithmObjectPool<K, T> {
    /// Create an empty pool.
    pub fn new(config: &PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self {
            table: HandleTable::with_capacity(config.initial_capacity),
            algorithm_stack: Vec::new(),
            by_algorithm: IndexMap::new(),
            max_algorithm_depth: config.max_algorithm_depth,
        })
    }

    // ── algorithm scope ─────────────────────────────────────────

    /// Push `algorithm` as the innermost running algorithm.
    pub fn begin_algorithm(&mut self, algorithm: AlgorithmId) -> Result<(), PoolError> {
        if self.algorithm_stack.contains(&algorithm) {
            return Err(PoolError::AlgorithmAlreadyRunning { algorithm });
        }
        if self.algorithm_stack.len() >= self.max_algorithm_depth {
            return Err(PoolError::AlgorithmDepthExceeded {
                max_depth: self.max_algorithm_depth,
            });
        }
        self.algorithm_stack.push(algorithm);
        Ok(())
    }

    /// Pop `algorithm`, which must be the innermost running algorithm.
    ///
    /// Objects registered to it stay alive until destroyed or [`reset`](Self::reset).
    pub fn end_algorithm(&mut self, algorithm: AlgorithmId) -> Result<(), PoolError> {
        let current = self.current_algorithm();
        if current != Some(algorithm) {
            return Err(PoolError::AlgorithmMismatch {
                requested: algorithm,
                current,
            });
        }
        self.algorithm_stack.pop();
        Ok(())
    }

    /// The innermost running algorithm, if any.
    pub fn current_algorithm(&self) -> Option<AlgorithmId> {
        self.algorithm_stack.last().copied()
    }

    /// Number of algorithms currently running.
    pub fn algorithm_depth(&self) -> usize {
        self.algorithm_stack.len()
    }

    // ── object lifecycle ────────────────────────────────────────

    /// Store an object without registering it to any algorithm.
    pub fn allocate(&mut self, value: T) -> K {
        self.table.insert(Entry { value, owner: None })
    }

    /// Register a live object to the innermost running algorithm.
    ///
    /// Re-registering moves the object to the current algorithm.
    pub fn register_to_current_algorithm(&mut self, key: K) -> Result<(), PoolError> {
        let algorithm = self.current_algorithm().ok_or(PoolError::NoCurrentAlgorithm)?;
        let entry = self.table.get_mut(key).ok_or_else(|| stale(key))?;
        let previous = entry.owner.replace(algorithm);
        if let Some(previous) = previous {
            if let Some(keys) = self.by_algorithm.get_mut(&previous) {
                keys.shift_remove(&key);
            }
        }
        self.by_algorithm.entry(algorithm).or_default().insert(key);
        Ok(())
    }

    /// Allocate and register in one step.
    ///
    /// If no algorithm is running the allocation is undone and the error
    /// returned, so a failed create leaves the pool unchanged.
    pub fn create(&mut self, value: T) -> Result<K, PoolError> {
        if self.current_algorithm().is_none() {
            return Err(PoolError::NoCurrentAlgorithm);
        }
        let key = self.allocate(value);
        if let Err(e) = self.register_to_current_algorithm(key) {
            self.table.remove(key);
            return Err(e);
        }
        trace!("pool: created {key:?} under {:?}", self.current_algorithm());
        Ok(key)
    }

    /// Remove an object, returning it. Double-destroy returns `None`.
    pub fn destroy(&mut self, key: K) -> Option<T> {
        let entry = self.table.remove(key)?;
        if let Some(owner) = entry.owner {
            if let Some(keys) = self.by_algorithm.get_mut(&owner) {
                keys.shift_remove(&key);
            }
        }
        Some(entry.value)
    }

    /// End-of-pass teardown: drop every object, every registration and the
    /// algorithm stack. Outstanding keys become stale.
    pub fn reset(&mut self) {
        self.table.clear();
        self.by_algorithm.clear();
        self.algorithm_stack.clear();
    }

    // ── access ──────────────────────────────────────────────────

    /// Whether the key refers to a live object.
    pub fn contains(&self, key: K) -> bool {
        self.table.contains(key)
    }

    /// Shared access to a live object.
    pub fn get(&self, key: K) -> Option<&T> {
        self.table.get(key).map(|e| &e.value)
    }

    /// Mutable access to a live object.
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.table.get_mut(key).map(|e| &mut e.value)
    }

    /// Mutable access to two distinct live objects.
    pub fn get_pair_mut(&mut self, a: K, b: K) -> Option<(&mut T, &mut T)> {
        self.table
            .get_pair_mut(a, b)
            .map(|(x, y)| (&mut x.value, &mut y.value))
    }

    /// Algorithm an object is registered to.
    pub fn owner_of(&self, key: K) -> Option<AlgorithmId> {
        self.table.get(key).and_then(|e| e.owner)
    }

    /// Live objects registered to `algorithm`, in creation order.
    pub fn list_for_algorithm(&self, algorithm: AlgorithmId) -> Vec<K> {
        self.by_algorithm
            .get(&algorithm)
            .map(|keys| keys.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the pool holds no objects.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over live objects in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.table.iter().map(|(k, e)| (k, &e.value))
    }
}

fn stale<K: ObjectKey>(key: K) -> PoolError {
    PoolError::StaleHandle {
        slot: key.slot(),
        generation: key.generation(),
    }
}
