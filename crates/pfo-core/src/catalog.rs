//! Registry of currently valid constituent identities.
//!
//! Clusters and tracks are owned by other parts of the reconstruction. The
//! catalog only records which identities are live so that a PFO can never
//! be given a reference to something that does not exist.

use indexmap::IndexSet;

use crate::error::{PfoError, PfoResult};
use crate::id::{ClusterId, TrackId};

/// Set of cluster and track identities that may be referenced by PFOs.
#[derive(Clone, Debug, Default)]
pub struct ConstituentCatalog {
    clusters: IndexSet<ClusterId>,
    tracks: IndexSet<TrackId>,
}

impl ConstituentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cluster as live.
    ///
    /// Fails with [`PfoError::AlreadyAssociated`] if it is already registered.
    pub fn register_cluster(&mut self, cluster: ClusterId) -> PfoResult<()> {
        if !self.clusters.insert(cluster) {
            return Err(PfoError::AlreadyAssociated {
                what: format!("{cluster} already registered"),
            });
        }
        Ok(())
    }

    /// Record a track as live.
    ///
    /// Fails with [`PfoError::AlreadyAssociated`] if it is already registered.
    pub fn register_track(&mut self, track: TrackId) -> PfoResult<()> {
        if !self.tracks.insert(track) {
            return Err(PfoError::AlreadyAssociated {
                what: format!("{track} already registered"),
            });
        }
        Ok(())
    }

    /// Forget a cluster. Fails with [`PfoError::NotFound`] if unknown.
    pub fn retire_cluster(&mut self, cluster: ClusterId) -> PfoResult<()> {
        if !self.clusters.shift_remove(&cluster) {
            return Err(PfoError::NotFound {
                what: format!("{cluster} in catalog"),
            });
        }
        Ok(())
    }

    /// Forget a track. Fails with [`PfoError::NotFound`] if unknown.
    pub fn retire_track(&mut self, track: TrackId) -> PfoResult<()> {
        if !self.tracks.shift_remove(&track) {
            return Err(PfoError::NotFound {
                what: format!("{track} in catalog"),
            });
        }
        Ok(())
    }

    /// Whether the cluster is currently live.
    pub fn has_cluster(&self, cluster: ClusterId) -> bool {
        self.clusters.contains(&cluster)
    }

    /// Whether the track is currently live.
    pub fn has_track(&self, track: TrackId) -> bool {
        self.tracks.contains(&track)
    }

    /// Fail with [`PfoError::InvalidParameter`] unless the cluster is live.
    pub fn require_cluster(&self, cluster: ClusterId) -> PfoResult<()> {
        if self.has_cluster(cluster) {
            Ok(())
        } else {
            Err(PfoError::InvalidParameter {
                reason: format!("{cluster} is not a valid cluster"),
            })
        }
    }

    /// Fail with [`PfoError::InvalidParameter`] unless the track is live.
    pub fn require_track(&self, track: TrackId) -> PfoResult<()> {
        if self.has_track(track) {
            Ok(())
        } else {
            Err(PfoError::InvalidParameter {
                reason: format!("{track} is not a valid track"),
            })
        }
    }

    /// Live clusters in registration order.
    pub fn clusters(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.clusters.iter().copied()
    }

    /// Live tracks in registration order.
    pub fn tracks(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.iter().copied()
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.clusters.clear();
        self.tracks.clear();
    }
}
