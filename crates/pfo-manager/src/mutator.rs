//! The mutation capability handed to trusted caller surfaces.
//!
//! [`PfoMutator`] is sealed: only [`ParticleFlowObjectManager`] implements
//! it, and the pipeline never exposes the manager mutably. A caller can
//! therefore change PFO structure only through a surface that was given a
//! `&mut dyn PfoMutator` at construction: [`ConstructionApi`], [`ContentApi`]
//! or the [`PfoPipeline`] driver itself.
//!
//! Refused operations are logged at `debug` level. The returned outcome is
//! the contract; the log line is a diagnostic only.
//!
//! [`ConstructionApi`]: crate::ConstructionApi
//! [`ContentApi`]: crate::ContentApi
//! [`PfoPipeline`]: crate::PfoPipeline

use log::debug;

use pfo_core::{
    AlgorithmId, ClusterId, PfoError, PfoId, PfoMetadata, PfoParameters, PfoResult, TrackId,
};
use pfo_pool::PoolError;

use crate::manager::ParticleFlowObjectManager;

mod private {
    pub trait Sealed {}
}

/// Mutation-only interface over the PFO graph.
pub trait PfoMutator: private::Sealed {
    /// Read access to the underlying manager.
    fn view(&self) -> &ParticleFlowObjectManager;

    /// Push an algorithm scope.
    fn begin_algorithm(&mut self, algorithm: AlgorithmId) -> Result<(), PoolError>;

    /// Pop an algorithm scope.
    fn end_algorithm(&mut self, algorithm: AlgorithmId) -> Result<(), PoolError>;

    /// Record a cluster as a valid constituent.
    fn register_cluster(&mut self, cluster: ClusterId) -> PfoResult<()>;

    /// Record a track as a valid constituent.
    fn register_track(&mut self, track: TrackId) -> PfoResult<()>;

    /// Forget a cluster no PFO references.
    fn retire_cluster(&mut self, cluster: ClusterId) -> PfoResult<()>;

    /// Forget a track no PFO references.
    fn retire_track(&mut self, track: TrackId) -> PfoResult<()>;

    /// Create a PFO under the running algorithm.
    fn create_pfo(&mut self, params: &PfoParameters) -> PfoResult<PfoId>;

    /// Delete a PFO and every hierarchy edge touching it.
    fn delete_pfo(&mut self, pfo: PfoId) -> PfoResult<()>;

    /// Update a PFO's scalar properties.
    fn alter_metadata(&mut self, pfo: PfoId, metadata: &PfoMetadata) -> PfoResult<()>;

    /// Add a cluster constituent.
    fn add_cluster_to_pfo(&mut self, pfo: PfoId, cluster: ClusterId) -> PfoResult<()>;

    /// Add a track constituent.
    fn add_track_to_pfo(&mut self, pfo: PfoId, track: TrackId) -> PfoResult<()>;

    /// Remove a cluster constituent; never removes the last constituent.
    fn remove_cluster_from_pfo(&mut self, pfo: PfoId, cluster: ClusterId) -> PfoResult<()>;

    /// Remove a track constituent; never removes the last constituent.
    fn remove_track_from_pfo(&mut self, pfo: PfoId, track: TrackId) -> PfoResult<()>;

    /// Add a reciprocal parent → daughter edge.
    fn set_parent_daughter_association(&mut self, parent: PfoId, daughter: PfoId)
        -> PfoResult<()>;

    /// Remove a reciprocal parent → daughter edge.
    fn remove_parent_daughter_association(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<()>;
}

fn logged<T>(op: &str, result: PfoResult<T>) -> PfoResult<T> {
    result.inspect_err(|e: &PfoError| debug!("{op} refused ({}): {e}", e.status()))
}

impl private::Sealed for ParticleFlowObjectManager {}

impl PfoMutator for ParticleFlowObjectManager {
    fn view(&self) -> &ParticleFlowObjectManager {
        self
    }

    fn begin_algorithm(&mut self, algorithm: AlgorithmId) -> Result<(), PoolError> {
        ParticleFlowObjectManager::begin_algorithm(self, algorithm)
    }

    fn end_algorithm(&mut self, algorithm: AlgorithmId) -> Result<(), PoolError> {
        ParticleFlowObjectManager::end_algorithm(self, algorithm)
    }

    fn register_cluster(&mut self, cluster: ClusterId) -> PfoResult<()> {
        logged(
            "register_cluster",
            ParticleFlowObjectManager::register_cluster(self, cluster),
        )
    }

    fn register_track(&mut self, track: TrackId) -> PfoResult<()> {
        logged(
            "register_track",
            ParticleFlowObjectManager::register_track(self, track),
        )
    }

    fn retire_cluster(&mut self, cluster: ClusterId) -> PfoResult<()> {
        logged(
            "retire_cluster",
            ParticleFlowObjectManager::retire_cluster(self, cluster),
        )
    }

    fn retire_track(&mut self, track: TrackId) -> PfoResult<()> {
        logged(
            "retire_track",
            ParticleFlowObjectManager::retire_track(self, track),
        )
    }

    fn create_pfo(&mut self, params: &PfoParameters) -> PfoResult<PfoId> {
        logged(
            "create_pfo",
            ParticleFlowObjectManager::create_pfo(self, params),
        )
    }

    fn delete_pfo(&mut self, pfo: PfoId) -> PfoResult<()> {
        logged("delete_pfo", ParticleFlowObjectManager::delete_pfo(self, pfo))
    }

    fn alter_metadata(&mut self, pfo: PfoId, metadata: &PfoMetadata) -> PfoResult<()> {
        logged(
            "alter_metadata",
            ParticleFlowObjectManager::alter_metadata(self, pfo, metadata),
        )
    }

    fn add_cluster_to_pfo(&mut self, pfo: PfoId, cluster: ClusterId) -> PfoResult<()> {
        logged(
            "add_cluster_to_pfo",
            ParticleFlowObjectManager::add_cluster_to_pfo(self, pfo, cluster),
        )
    }

    fn add_track_to_pfo(&mut self, pfo: PfoId, track: TrackId) -> PfoResult<()> {
        logged(
            "add_track_to_pfo",
            ParticleFlowObjectManager::add_track_to_pfo(self, pfo, track),
        )
    }

    fn remove_cluster_from_pfo(&mut self, pfo: PfoId, cluster: ClusterId) -> PfoResult<()> {
        logged(
            "remove_cluster_from_pfo",
            ParticleFlowObjectManager::remove_cluster_from_pfo(self, pfo, cluster),
        )
    }

    fn remove_track_from_pfo(&mut self, pfo: PfoId, track: TrackId) -> PfoResult<()> {
        logged(
            "remove_track_from_pfo",
            ParticleFlowObjectManager::remove_track_from_pfo(self, pfo, track),
        )
    }

    fn set_parent_daughter_association(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<()> {
        logged(
            "set_parent_daughter_association",
            ParticleFlowObjectManager::set_parent_daughter_association(self, parent, daughter),
        )
    }

    fn remove_parent_daughter_association(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<()> {
        logged(
            "remove_parent_daughter_association",
            ParticleFlowObjectManager::remove_parent_daughter_association(self, parent, daughter),
        )
    }
}
