//! Algorithm-scoped generational object pool.
//!
//! The pool owns every object of one type for the duration of a
//! processing pass. Objects are addressed by typed `(slot, generation)`
//! handles, so a handle to a destroyed object is detected rather than
//! silently aliasing whatever reused its slot.
//!
//! # Architecture
//!
//! ```text
//! AlgorithmObjectPool<K, T>
//! ├── HandleTable<K, Entry<T>>   (slot + generation storage, free list)
//! ├── algorithm stack            (innermost running algorithm on top)
//! └── per-algorithm registry     (AlgorithmId → keys in creation order)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod pool;

pub use config::PoolConfig;
pub use error::PoolError;
pub use handle::HandleTable;
pub use pool::AlgorithmObjectPool;
