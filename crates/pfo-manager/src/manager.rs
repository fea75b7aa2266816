//! Invariant-enforcing manager for particle flow objects.
//!
//! [`ParticleFlowObjectManager`] sits on top of the generic
//! [`AlgorithmObjectPool`] and is the only code path that changes PFO
//! structure. Every mutation follows the same order:
//!
//! 1. handle and reference validity (`InvalidParameter`),
//! 2. relationship existence (`NotFound` / `AlreadyAssociated`),
//! 3. the non-emptiness guard (`NotAllowed`),
//! 4. commit.
//!
//! Nothing is written before step 4, so a refused operation leaves the
//! graph untouched. Reciprocal hierarchy edges are committed together.
//!
//! The manager keeps no registry of its own: the pool is the single
//! source of truth for which PFOs exist.

use log::trace;

use pfo_core::{
    AlgorithmId, ClusterId, ConstituentCatalog, PfoError, PfoId, PfoMetadata, PfoParameters,
    PfoResult, TrackId,
};
use pfo_pool::{AlgorithmObjectPool, PoolConfig, PoolError};

use crate::pfo::ParticleFlowObject;

/// Owner of the PFO pool and the constituent catalog.
///
/// Read access is public. Structural mutation is reachable only through
/// the sealed [`PfoMutator`](crate::PfoMutator) capability, and the
/// pipeline never hands out `&mut ParticleFlowObjectManager`.
pub struct ParticleFlowObjectManager {
    pool: AlgorithmObjectPool<PfoId, ParticleFlowObject>,
    catalog: ConstituentCatalog,
}

impl ParticleFlowObjectManager {
    pub(crate) fn new(config: &PoolConfig) -> Result<Self, PoolError> {
        Ok(Self {
            pool: AlgorithmObjectPool::new(config)?,
            catalog: ConstituentCatalog::new(),
        })
    }

    // ── read API ────────────────────────────────────────────────

    /// Look up a live PFO.
    pub fn get(&self, pfo: PfoId) -> Option<&ParticleFlowObject> {
        self.pool.get(pfo)
    }

    /// Whether the handle refers to a live PFO.
    pub fn contains(&self, pfo: PfoId) -> bool {
        self.pool.contains(pfo)
    }

    /// Number of live PFOs.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Whether there are no live PFOs.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Iterate over live PFOs in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (PfoId, &ParticleFlowObject)> + '_ {
        self.pool.iter()
    }

    /// Live PFOs created by `algorithm`, in creation order.
    pub fn pfos_for_algorithm(&self, algorithm: AlgorithmId) -> Vec<PfoId> {
        self.pool.list_for_algorithm(algorithm)
    }

    /// Algorithm that created a PFO.
    pub fn owner_of(&self, pfo: PfoId) -> Option<AlgorithmId> {
        self.pool.owner_of(pfo)
    }

    /// The innermost running algorithm.
    pub fn current_algorithm(&self) -> Option<AlgorithmId> {
        self.pool.current_algorithm()
    }

    /// The catalog of valid constituents.
    pub fn catalog(&self) -> &ConstituentCatalog {
        &self.catalog
    }

    /// The live PFO that currently holds `cluster`, if any.
    pub fn pfo_holding_cluster(&self, cluster: ClusterId) -> Option<PfoId> {
        self.pool
            .iter()
            .find(|(_, pfo)| pfo.clusters().contains(&cluster))
            .map(|(id, _)| id)
    }

    /// The live PFO that currently holds `track`, if any.
    pub fn pfo_holding_track(&self, track: TrackId) -> Option<PfoId> {
        self.pool
            .iter()
            .find(|(_, pfo)| pfo.tracks().contains(&track))
            .map(|(id, _)| id)
    }

    fn require(&self, pfo: PfoId) -> PfoResult<&ParticleFlowObject> {
        self.pool.get(pfo).ok_or_else(|| PfoError::InvalidParameter {
            reason: format!("{pfo} is not a live particle flow object"),
        })
    }

    fn require_mut(&mut self, pfo: PfoId) -> PfoResult<&mut ParticleFlowObject> {
        self.pool.get_mut(pfo).ok_or_else(|| PfoError::InvalidParameter {
            reason: format!("{pfo} is not a live particle flow object"),
        })
    }

    // ── algorithm scope ─────────────────────────────────────────

    pub(crate) fn begin_algorithm(&mut self, algorithm: AlgorithmId) -> Result<(), PoolError> {
        self.pool.begin_algorithm(algorithm)
    }

    pub(crate) fn end_algorithm(&mut self, algorithm: AlgorithmId) -> Result<(), PoolError> {
        self.pool.end_algorithm(algorithm)
    }

    /// Drop every PFO and constituent registration.
    pub(crate) fn reset(&mut self) {
        self.pool.reset();
        self.catalog.clear();
    }

    // ── constituent catalog ─────────────────────────────────────

    pub(crate) fn register_cluster(&mut self, cluster: ClusterId) -> PfoResult<()> {
        self.catalog.register_cluster(cluster)
    }

    pub(crate) fn register_track(&mut self, track: TrackId) -> PfoResult<()> {
        self.catalog.register_track(track)
    }

    /// Forget a cluster. Refused while a live PFO still references it.
    pub(crate) fn retire_cluster(&mut self, cluster: ClusterId) -> PfoResult<()> {
        if let Some(holder) = self.pfo_holding_cluster(cluster) {
            return Err(PfoError::NotAllowed {
                reason: format!("{cluster} is still a constituent of {holder}"),
            });
        }
        self.catalog.retire_cluster(cluster)
    }

    /// Forget a track. Refused while a live PFO still references it.
    pub(crate) fn retire_track(&mut self, track: TrackId) -> PfoResult<()> {
        if let Some(holder) = self.pfo_holding_track(track) {
            return Err(PfoError::NotAllowed {
                reason: format!("{track} is still a constituent of {holder}"),
            });
        }
        self.catalog.retire_track(track)
    }

    // ── creation and deletion ───────────────────────────────────

    /// Create a PFO from a parameter bundle under the running algorithm.
    ///
    /// An empty constituent list is accepted; the PFO is then expected to
    /// be filled through the add operations.
    pub(crate) fn create_pfo(&mut self, params: &PfoParameters) -> PfoResult<PfoId> {
        params.validate()?;
        for &cluster in &params.clusters {
            self.catalog.require_cluster(cluster)?;
        }
        for &track in &params.tracks {
            self.catalog.require_track(track)?;
        }
        let pfo = self
            .pool
            .create(ParticleFlowObject::from_parameters(params))?;
        trace!(
            "created {pfo} with {} clusters, {} tracks",
            params.clusters.len(),
            params.tracks.len()
        );
        Ok(pfo)
    }

    /// Delete a PFO, first detaching it from every parent and daughter.
    pub(crate) fn delete_pfo(&mut self, pfo: PfoId) -> PfoResult<()> {
        let target = self.require(pfo)?;
        let parents: Vec<PfoId> = target.parents().iter().copied().collect();
        let daughters: Vec<PfoId> = target.daughters().iter().copied().collect();

        for parent in parents {
            if let Some(p) = self.pool.get_mut(parent) {
                p.remove_daughter(pfo);
            }
        }
        for daughter in daughters {
            if let Some(d) = self.pool.get_mut(daughter) {
                d.remove_parent(pfo);
            }
        }
        self.pool.destroy(pfo);
        trace!("deleted {pfo}");
        Ok(())
    }

    /// Update scalar properties. Structure is untouched.
    pub(crate) fn alter_metadata(&mut self, pfo: PfoId, metadata: &PfoMetadata) -> PfoResult<()> {
        metadata.validate()?;
        self.require_mut(pfo)?.apply_metadata(metadata);
        Ok(())
    }

    // ── constituents ────────────────────────────────────────────

    /// Add a cluster. Re-adding a present cluster is `AlreadyAssociated`.
    pub(crate) fn add_cluster_to_pfo(&mut self, pfo: PfoId, cluster: ClusterId) -> PfoResult<()> {
        self.catalog.require_cluster(cluster)?;
        let target = self.require_mut(pfo)?;
        if !target.insert_cluster(cluster) {
            return Err(PfoError::AlreadyAssociated {
                what: format!("{cluster} in {pfo}"),
            });
        }
        trace!("added {cluster} to {pfo}");
        Ok(())
    }

    /// Add a track. Re-adding a present track is `AlreadyAssociated`.
    pub(crate) fn add_track_to_pfo(&mut self, pfo: PfoId, track: TrackId) -> PfoResult<()> {
        self.catalog.require_track(track)?;
        let target = self.require_mut(pfo)?;
        if !target.insert_track(track) {
            return Err(PfoError::AlreadyAssociated {
                what: format!("{track} in {pfo}"),
            });
        }
        trace!("added {track} to {pfo}");
        Ok(())
    }

    /// Remove a cluster, refusing to remove the last constituent.
    pub(crate) fn remove_cluster_from_pfo(
        &mut self,
        pfo: PfoId,
        cluster: ClusterId,
    ) -> PfoResult<()> {
        let target = self.require(pfo)?;
        if !target.clusters().contains(&cluster) {
            return Err(PfoError::NotFound {
                what: format!("{cluster} in {pfo}"),
            });
        }
        guard_last_constituent(pfo, target)?;
        self.require_mut(pfo)?.remove_cluster(cluster);
        trace!("removed {cluster} from {pfo}");
        Ok(())
    }

    /// Remove a track, refusing to remove the last constituent.
    pub(crate) fn remove_track_from_pfo(&mut self, pfo: PfoId, track: TrackId) -> PfoResult<()> {
        let target = self.require(pfo)?;
        if !target.tracks().contains(&track) {
            return Err(PfoError::NotFound {
                what: format!("{track} in {pfo}"),
            });
        }
        guard_last_constituent(pfo, target)?;
        self.require_mut(pfo)?.remove_track(track);
        trace!("removed {track} from {pfo}");
        Ok(())
    }

    // ── hierarchy ───────────────────────────────────────────────

    /// Link `parent` → `daughter` in both directions.
    ///
    /// Cycles are not detected.
    pub(crate) fn set_parent_daughter_association(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<()> {
        let (p, d) = self.require_pair(parent, daughter)?;
        if p.daughters().contains(&daughter) || d.parents().contains(&parent) {
            return Err(PfoError::AlreadyAssociated {
                what: format!("{parent} -> {daughter}"),
            });
        }
        p.insert_daughter(daughter);
        d.insert_parent(parent);
        trace!("linked {parent} -> {daughter}");
        Ok(())
    }

    /// Unlink `parent` → `daughter`. The edge must exist in both directions.
    pub(crate) fn remove_parent_daughter_association(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<()> {
        let (p, d) = self.require_pair(parent, daughter)?;
        if !p.daughters().contains(&daughter) || !d.parents().contains(&parent) {
            return Err(PfoError::NotFound {
                what: format!("association {parent} -> {daughter}"),
            });
        }
        p.remove_daughter(daughter);
        d.remove_parent(parent);
        trace!("unlinked {parent} -> {daughter}");
        Ok(())
    }

    fn require_pair(
        &mut self,
        parent: PfoId,
        daughter: PfoId,
    ) -> PfoResult<(&mut ParticleFlowObject, &mut ParticleFlowObject)> {
        if parent == daughter {
            return Err(PfoError::InvalidParameter {
                reason: format!("{parent} cannot be its own parent"),
            });
        }
        self.require(parent)?;
        self.require(daughter)?;
        self.pool
            .get_pair_mut(parent, daughter)
            .ok_or_else(|| PfoError::InvalidParameter {
                reason: format!("{parent} and {daughter} are not distinct live objects"),
            })
    }
}

fn guard_last_constituent(pfo: PfoId, target: &ParticleFlowObject) -> PfoResult<()> {
    if target.constituent_count() <= 1 {
        return Err(PfoError::NotAllowed {
            reason: format!("removing the final constituent would empty {pfo}; delete it instead"),
        });
    }
    Ok(())
}
