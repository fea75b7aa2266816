//! Reusable fixtures for PFO tests.
//!
//! - [`seeded_pipeline`]: a pipeline with constituents `0..n` registered.
//! - [`single_cluster`] / [`single_track`]: one-constituent parameter bundles.
//! - [`check_graph_invariants`]: hierarchy symmetry and no dangling links.
//! - [`graph_snapshot`]: full copy of the graph for "unchanged" assertions.

use pfo_core::{ClusterId, PfoId, PfoParameters, TrackId};
use pfo_manager::{ParticleFlowObject, ParticleFlowObjectManager, PfoPipeline, PipelineConfig};

/// Every live PFO, cloned, in pool order.
pub type GraphSnapshot = Vec<(PfoId, ParticleFlowObject)>;

/// Pipeline with `ClusterId(0..clusters)` and `TrackId(0..tracks)` registered
/// through the construction phase.
pub fn seeded_pipeline(clusters: u32, tracks: u32) -> PfoPipeline {
    let mut pipeline = PfoPipeline::new(PipelineConfig::default()).unwrap();
    pipeline
        .construct(|api| {
            for i in 0..clusters {
                api.register_cluster(ClusterId(i)).unwrap();
            }
            for i in 0..tracks {
                api.register_track(TrackId(i)).unwrap();
            }
        })
        .unwrap();
    pipeline
}

/// Photon-like bundle with a single cluster.
pub fn single_cluster(cluster: u32) -> PfoParameters {
    PfoParameters::new(22, 0)
        .with_energy(1.0)
        .with_cluster(ClusterId(cluster))
}

/// Charged-pion-like bundle with a single track.
pub fn single_track(track: u32) -> PfoParameters {
    PfoParameters::new(211, 1)
        .with_energy(1.0)
        .with_track(TrackId(track))
}

/// Clone the whole graph.
pub fn graph_snapshot(pfos: &ParticleFlowObjectManager) -> GraphSnapshot {
    pfos.iter().map(|(id, pfo)| (id, pfo.clone())).collect()
}

/// Verify the structural invariants that must hold after every operation.
///
/// - every parent/daughter link points at a live PFO;
/// - every edge is present in both directions;
/// - no PFO lists itself as parent or daughter.
///
/// Returns a description of the first violation found.
pub fn check_graph_invariants(pfos: &ParticleFlowObjectManager) -> Result<(), String> {
    for (id, pfo) in pfos.iter() {
        if pfo.parents().contains(&id) || pfo.daughters().contains(&id) {
            return Err(format!("{id} is linked to itself"));
        }
        for &daughter in pfo.daughters() {
            let d = pfos
                .get(daughter)
                .ok_or_else(|| format!("{id} has dangling daughter {daughter}"))?;
            if !d.parents().contains(&id) {
                return Err(format!("{id} -> {daughter} missing reverse edge"));
            }
        }
        for &parent in pfo.parents() {
            let p = pfos
                .get(parent)
                .ok_or_else(|| format!("{id} has dangling parent {parent}"))?;
            if !p.daughters().contains(&id) {
                return Err(format!("{parent} -> {id} missing forward edge"));
            }
        }
    }
    Ok(())
}
