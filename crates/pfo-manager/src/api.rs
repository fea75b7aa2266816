//! Trusted caller surfaces.
//!
//! Both surfaces wrap an injected `&mut dyn PfoMutator` and can only be
//! built inside this crate, by [`PfoPipeline`](crate::PfoPipeline):
//!
//! - [`ConstructionApi`]: outward-facing; registers the event's constituents
//!   and creates input PFOs.
//! - [`ContentApi`]: algorithm-facing; the structural operations an
//!   algorithm may perform while it runs, plus daughter algorithm calls.

use pfo_core::{
    AlgorithmId, ClusterId, PfoId, PfoMetadata, PfoParameters, PfoResult, TrackId,
};
use pfo_pool::PoolError;

use crate::driver::{run_scoped, AlgorithmScope};
use crate::manager::ParticleFlowObjectManager;
use crate::mutator::PfoMutator;
use crate::pfo::ParticleFlowObject;

// ── ConstructionApi ─────────────────────────────────────────────

/// Surface used by the client application to describe an event.
pub struct ConstructionApi<'a> {
    mutator: &'a mut dyn PfoMutator,
    algorithm: AlgorithmId,
}

impl<'a> ConstructionApi<'a> {
    pub(crate) fn new(mutator: &'a mut dyn PfoMutator, algorithm: AlgorithmId) -> Self {
        Self { mutator, algorithm }
    }

    /// The input algorithm id new PFOs are registered under.
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Read-only view of the PFO graph.
    pub fn pfos(&self) -> &ParticleFlowObjectManager {
        self.mutator.view()
    }

    /// Declare a cluster as available for use as a constituent.
    pub fn register_cluster(&mut self, cluster: ClusterId) -> PfoResult<()> {
        self.mutator.register_cluster(cluster)
    }

    /// Declare a track as available for use as a constituent.
    pub fn register_track(&mut self, track: TrackId) -> PfoResult<()> {
        self.mutator.register_track(track)
    }

    /// Withdraw a cluster. Refused with `NotAllowed` while a PFO uses it.
    pub fn retire_cluster(&mut self, cluster: ClusterId) -> PfoResult<()> {
        self.mutator.retire_cluster(cluster)
    }

    /// Withdraw a track. Refused with `NotAllowed` while a PFO uses it.
    pub fn retire_track(&mut self, track: TrackId) -> PfoResult<()> {
        self.mutator.retire_track(track)
    }

    /// Create an input PFO.
    pub fn create_pfo(&mut self, params: &PfoParameters) -> PfoResult<PfoId> {
        self.mutator.create_pfo(params)
    }

    /// Link two input PFOs.
    pub fn set_parent_daughter_association(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<()> {
        self.mutator.set_parent_daughter_association(parent, daughter)
    }
}

// ── ContentApi ──────────────────────────────────────────────────

/// Surface handed to a running algorithm.
pub struct ContentApi<'a> {
    mutator: &'a mut dyn PfoMutator,
    scope: &'a mut AlgorithmScope,
    algorithm: AlgorithmId,
}

impl<'a> ContentApi<'a> {
    pub(crate) fn new(
        mutator: &'a mut dyn PfoMutator,
        scope: &'a mut AlgorithmScope,
        algorithm: AlgorithmId,
    ) -> Self {
        Self {
            mutator,
            scope,
            algorithm,
        }
    }

    /// The id of the running algorithm.
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Name the running algorithm was started under.
    pub fn algorithm_name(&self) -> Option<&str> {
        self.scope.name(self.algorithm)
    }

    /// Read-only view of the PFO graph.
    pub fn pfos(&self) -> &ParticleFlowObjectManager {
        self.mutator.view()
    }

    /// Look up a live PFO.
    pub fn pfo(&self, pfo: PfoId) -> Option<&ParticleFlowObject> {
        self.mutator.view().get(pfo)
    }

    /// PFOs created so far by this algorithm invocation.
    pub fn created_pfos(&self) -> Vec<PfoId> {
        self.mutator.view().pfos_for_algorithm(self.algorithm)
    }

    /// Create a PFO owned by this algorithm.
    pub fn create_pfo(&mut self, params: &PfoParameters) -> PfoResult<PfoId> {
        self.mutator.create_pfo(params)
    }

    /// Delete a PFO, detaching it from its parents and daughters.
    pub fn delete_pfo(&mut self, pfo: PfoId) -> PfoResult<()> {
        self.mutator.delete_pfo(pfo)
    }

    /// Update a PFO's scalar properties.
    pub fn alter_metadata(&mut self, pfo: PfoId, metadata: &PfoMetadata) -> PfoResult<()> {
        self.mutator.alter_metadata(pfo, metadata)
    }

    /// Add a cluster to a PFO.
    pub fn add_cluster_to_pfo(&mut self, pfo: PfoId, cluster: ClusterId) -> PfoResult<()> {
        self.mutator.add_cluster_to_pfo(pfo, cluster)
    }

    /// Add a track to a PFO.
    pub fn add_track_to_pfo(&mut self, pfo: PfoId, track: TrackId) -> PfoResult<()> {
        self.mutator.add_track_to_pfo(pfo, track)
    }

    /// Remove a cluster from a PFO.
    ///
    /// Returns `NotAllowed` instead of removing the PFO's final
    /// constituent; delete the PFO in that case.
    pub fn remove_cluster_from_pfo(&mut self, pfo: PfoId, cluster: ClusterId) -> PfoResult<()> {
        self.mutator.remove_cluster_from_pfo(pfo, cluster)
    }

    /// Remove a track from a PFO.
    ///
    /// Returns `NotAllowed` instead of removing the PFO's final
    /// constituent; delete the PFO in that case.
    pub fn remove_track_from_pfo(&mut self, pfo: PfoId, track: TrackId) -> PfoResult<()> {
        self.mutator.remove_track_from_pfo(pfo, track)
    }

    /// Add a parent-daughter relationship.
    pub fn set_parent_daughter_association(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<()> {
        self.mutator.set_parent_daughter_association(parent, daughter)
    }

    /// Remove a parent-daughter relationship.
    pub fn remove_parent_daughter_association(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<()> {
        self.mutator
            .remove_parent_daughter_association(parent, daughter)
    }

    /// Run a daughter algorithm nested inside this one.
    ///
    /// PFOs the daughter creates are registered to the daughter's own id.
    pub fn run_daughter_algorithm<R>(
        &mut self,
        name: &str,
        body: impl FnOnce(&mut ContentApi<'_>) -> R,
    ) -> Result<R, PoolError> {
        run_scoped(&mut *self.mutator, &mut *self.scope, name, body)
    }
}
