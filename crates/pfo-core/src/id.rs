//! Strongly-typed identifiers for PFOs, constituents and algorithms.

use std::fmt;

use crate::traits::ObjectKey;

/// Opaque handle to a particle flow object.
///
/// Encoding: upper 32 bits = pool slot index, lower 32 bits = slot
/// generation. A handle is only ever issued for one object; once that
/// object is destroyed the generation moves on and the handle goes stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PfoId(u64);

impl PfoId {
    /// The raw 64-bit encoding.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl ObjectKey for PfoId {
    fn from_parts(slot: u32, generation: u32) -> Self {
        Self(((slot as u64) << 32) | generation as u64)
    }

    fn slot(self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn generation(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for PfoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pfo#{}v{}", self.slot(), self.generation())
    }
}

/// Identifies a cluster owned outside the PFO layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub u32);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster#{}", self.0)
    }
}

impl From<u32> for ClusterId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a track owned outside the PFO layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track#{}", self.0)
    }
}

impl From<u32> for TrackId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an algorithm invocation within a processing pass.
///
/// Objects created while an algorithm is running are registered under
/// its id and can be enumerated per algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlgorithmId(pub u32);

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "algorithm#{}", self.0)
    }
}

impl From<u32> for AlgorithmId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
