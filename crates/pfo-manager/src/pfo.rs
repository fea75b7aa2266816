//! The particle flow object entity.
//!
//! A [`ParticleFlowObject`] is a node in the reconstruction output graph.
//! It references (never owns) its constituent clusters and tracks, and
//! its parent and daughter PFOs. All link sets preserve insertion order
//! so iteration is reproducible.
//!
//! Everything that changes structure is crate-private: only
//! [`ParticleFlowObjectManager`](crate::ParticleFlowObjectManager) mutates
//! PFOs, after checking the graph invariants.

use indexmap::IndexSet;

use pfo_core::{ClusterId, Momentum, PfoId, PfoMetadata, PfoParameters, TrackId};

/// One reconstructed-particle candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleFlowObject {
    particle_id: i32,
    charge: i32,
    mass: f32,
    energy: f32,
    momentum: Momentum,
    clusters: IndexSet<ClusterId>,
    tracks: IndexSet<TrackId>,
    parents: IndexSet<PfoId>,
    daughters: IndexSet<PfoId>,
}

impl ParticleFlowObject {
    /// Build from an already validated parameter bundle.
    pub(crate) fn from_parameters(params: &PfoParameters) -> Self {
        Self {
            particle_id: params.particle_id,
            charge: params.charge,
            mass: params.mass,
            energy: params.energy,
            momentum: params.momentum,
            clusters: params.clusters.iter().copied().collect(),
            tracks: params.tracks.iter().copied().collect(),
            parents: IndexSet::new(),
            daughters: IndexSet::new(),
        }
    }

    /// Particle-type hypothesis.
    pub fn particle_id(&self) -> i32 {
        self.particle_id
    }

    /// Charge in units of e.
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Mass estimate.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Energy estimate.
    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Momentum estimate.
    pub fn momentum(&self) -> Momentum {
        self.momentum
    }

    /// Constituent clusters in insertion order.
    pub fn clusters(&self) -> &IndexSet<ClusterId> {
        &self.clusters
    }

    /// Constituent tracks in insertion order.
    pub fn tracks(&self) -> &IndexSet<TrackId> {
        &self.tracks
    }

    /// PFOs this one is a daughter of.
    pub fn parents(&self) -> &IndexSet<PfoId> {
        &self.parents
    }

    /// PFOs this one is a parent of.
    pub fn daughters(&self) -> &IndexSet<PfoId> {
        &self.daughters
    }

    /// Clusters plus tracks.
    pub fn constituent_count(&self) -> usize {
        self.clusters.len() + self.tracks.len()
    }

    /// Whether the PFO has no constituents at all.
    ///
    /// Only possible between creation from an empty bundle and the first
    /// addition; removal never empties a PFO.
    pub fn is_empty(&self) -> bool {
        self.constituent_count() == 0
    }

    pub(crate) fn insert_cluster(&mut self, cluster: ClusterId) -> bool {
        self.clusters.insert(cluster)
    }

    pub(crate) fn insert_track(&mut self, track: TrackId) -> bool {
        self.tracks.insert(track)
    }

    pub(crate) fn remove_cluster(&mut self, cluster: ClusterId) -> bool {
        self.clusters.shift_remove(&cluster)
    }

    pub(crate) fn remove_track(&mut self, track: TrackId) -> bool {
        self.tracks.shift_remove(&track)
    }

    pub(crate) fn insert_parent(&mut self, parent: PfoId) -> bool {
        self.parents.insert(parent)
    }

    pub(crate) fn insert_daughter(&mut self, daughter: PfoId) -> bool {
        self.daughters.insert(daughter)
    }

    pub(crate) fn remove_parent(&mut self, parent: PfoId) -> bool {
        self.parents.shift_remove(&parent)
    }

    pub(crate) fn remove_daughter(&mut self, daughter: PfoId) -> bool {
        self.daughters.shift_remove(&daughter)
    }

    pub(crate) fn apply_metadata(&mut self, metadata: &PfoMetadata) {
        if let Some(v) = metadata.particle_id {
            self.particle_id = v;
        }
        if let Some(v) = metadata.charge {
            self.charge = v;
        }
        if let Some(v) = metadata.mass {
            self.mass = v;
        }
        if let Some(v) = metadata.energy {
            self.energy = v;
        }
        if let Some(v) = metadata.momentum {
            self.momentum = v;
        }
    }
}
