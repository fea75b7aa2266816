//! Abstraction traits shared between the pool and its users.

/// A typed handle that the object pool can issue and decode.
///
/// The pool addresses objects by `(slot, generation)`. Implementors wrap
/// that pair in their own type so handles for different object kinds can
/// never be mixed up.
pub trait ObjectKey: Copy + Eq + std::hash::Hash + std::fmt::Debug {
    /// Build a key from its slot index and generation.
    fn from_parts(slot: u32, generation: u32) -> Self;

    /// Slot index within the pool.
    fn slot(self) -> u32;

    /// Generation of the slot when the key was issued.
    fn generation(self) -> u32;
}
