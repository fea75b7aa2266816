//! Creation parameters and metadata updates for particle flow objects.
//!
//! The scalar payload (particle id, charge, mass, energy, momentum) is
//! opaque to the structural layer beyond basic well-formedness: values must
//! be finite and mass non-negative. Constituent lists must be free of
//! duplicates; whether the referenced constituents exist is checked by the
//! manager against its catalog.

use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::error::{PfoError, PfoResult};
use crate::id::{ClusterId, TrackId};

/// Three-momentum estimate of a reconstructed particle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Momentum {
    /// x component.
    pub x: f32,
    /// y component.
    pub y: f32,
    /// z component.
    pub z: f32,
}

impl Momentum {
    /// Create a momentum vector.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Whether all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Parameter bundle consumed by PFO creation.
///
/// Inline storage covers the common case of a handful of constituents
/// without heap allocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PfoParameters {
    /// Particle-type hypothesis (PDG code).
    pub particle_id: i32,
    /// Charge in units of e.
    pub charge: i32,
    /// Mass estimate.
    pub mass: f32,
    /// Energy estimate.
    pub energy: f32,
    /// Momentum estimate.
    pub momentum: Momentum,
    /// Initial cluster constituents.
    pub clusters: SmallVec<[ClusterId; 4]>,
    /// Initial track constituents.
    pub tracks: SmallVec<[TrackId; 4]>,
}

impl PfoParameters {
    /// Parameters with the given particle hypothesis and no constituents.
    pub fn new(particle_id: i32, charge: i32) -> Self {
        Self {
            particle_id,
            charge,
            ..Self::default()
        }
    }

    /// Set the energy estimate.
    pub fn with_energy(mut self, energy: f32) -> Self {
        self.energy = energy;
        self
    }

    /// Set the mass estimate.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the momentum estimate.
    pub fn with_momentum(mut self, momentum: Momentum) -> Self {
        self.momentum = momentum;
        self
    }

    /// Append a cluster constituent.
    pub fn with_cluster(mut self, cluster: ClusterId) -> Self {
        self.clusters.push(cluster);
        self
    }

    /// Append a track constituent.
    pub fn with_track(mut self, track: TrackId) -> Self {
        self.tracks.push(track);
        self
    }

    /// Total number of constituents named by the bundle.
    pub fn constituent_count(&self) -> usize {
        self.clusters.len() + self.tracks.len()
    }

    /// Check the bundle is well formed.
    ///
    /// Rejects non-finite scalars, negative mass and any constituent
    /// listed more than once.
    pub fn validate(&self) -> PfoResult<()> {
        check_scalars(Some(self.mass), Some(self.energy), Some(self.momentum))?;
        if let Some(dup) = first_duplicate(&self.clusters) {
            return Err(PfoError::InvalidParameter {
                reason: format!("{dup} listed more than once"),
            });
        }
        if let Some(dup) = first_duplicate(&self.tracks) {
            return Err(PfoError::InvalidParameter {
                reason: format!("{dup} listed more than once"),
            });
        }
        Ok(())
    }
}

/// Partial update of a PFO's scalar properties.
///
/// `None` leaves the corresponding property untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PfoMetadata {
    /// New particle-type hypothesis.
    pub particle_id: Option<i32>,
    /// New charge.
    pub charge: Option<i32>,
    /// New mass estimate.
    pub mass: Option<f32>,
    /// New energy estimate.
    pub energy: Option<f32>,
    /// New momentum estimate.
    pub momentum: Option<Momentum>,
}

impl PfoMetadata {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.particle_id.is_none()
            && self.charge.is_none()
            && self.mass.is_none()
            && self.energy.is_none()
            && self.momentum.is_none()
    }

    /// Check every provided value is well formed.
    pub fn validate(&self) -> PfoResult<()> {
        check_scalars(self.mass, self.energy, self.momentum)
    }
}

fn check_scalars(
    mass: Option<f32>,
    energy: Option<f32>,
    momentum: Option<Momentum>,
) -> PfoResult<()> {
    if let Some(m) = mass {
        if !m.is_finite() || m < 0.0 {
            return Err(PfoError::InvalidParameter {
                reason: format!("mass must be finite and non-negative, got {m}"),
            });
        }
    }
    if let Some(e) = energy {
        if !e.is_finite() {
            return Err(PfoError::InvalidParameter {
                reason: format!("energy must be finite, got {e}"),
            });
        }
    }
    if let Some(p) = momentum {
        if !p.is_finite() {
            return Err(PfoError::InvalidParameter {
                reason: format!("momentum must be finite, got {p:?}"),
            });
        }
    }
    Ok(())
}

fn first_duplicate<T: Copy + Eq + std::hash::Hash>(items: &[T]) -> Option<T> {
    let mut seen = IndexSet::with_capacity(items.len());
    items.iter().copied().find(|item| !seen.insert(*item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatusCode;

    #[test]
    fn builder_collects_constituents() {
        let p = PfoParameters::new(211, 1)
            .with_energy(3.5)
            .with_cluster(ClusterId(1))
            .with_track(TrackId(2))
            .with_track(TrackId(3));
        assert_eq!(p.constituent_count(), 3);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn empty_bundle_is_well_formed() {
        assert!(PfoParameters::new(22, 0).validate().is_ok());
    }

    #[test]
    fn duplicate_cluster_rejected() {
        let p = PfoParameters::new(22, 0)
            .with_cluster(ClusterId(5))
            .with_cluster(ClusterId(5));
        let err = p.validate().unwrap_err();
        assert_eq!(err.status(), StatusCode::InvalidParameter);
    }

    #[test]
    fn duplicate_track_rejected() {
        let p = PfoParameters::new(13, -1)
            .with_track(TrackId(1))
            .with_track(TrackId(2))
            .with_track(TrackId(1));
        assert!(p.validate().is_err());
    }

    #[test]
    fn same_number_in_cluster_and_track_is_not_a_duplicate() {
        let p = PfoParameters::new(11, -1)
            .with_cluster(ClusterId(1))
            .with_track(TrackId(1));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn non_finite_scalars_rejected() {
        assert!(PfoParameters::new(22, 0).with_energy(f32::NAN).validate().is_err());
        assert!(PfoParameters::new(22, 0).with_mass(-1.0).validate().is_err());
        assert!(PfoParameters::new(22, 0)
            .with_momentum(Momentum::new(0.0, f32::INFINITY, 0.0))
            .validate()
            .is_err());
    }

    #[test]
    fn metadata_validation_only_checks_present_fields() {
        let md = PfoMetadata::default();
        assert!(md.is_empty());
        assert!(md.validate().is_ok());

        let md = PfoMetadata {
            energy: Some(f32::NEG_INFINITY),
            ..PfoMetadata::default()
        };
        assert!(!md.is_empty());
        assert!(md.validate().is_err());
    }

    #[test]
    fn momentum_magnitude() {
        assert_eq!(Momentum::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn validate_rejects_exactly_the_bundles_with_repeats(
                clusters in proptest::collection::vec(0u32..8, 0..6),
                tracks in proptest::collection::vec(0u32..8, 0..6),
            ) {
                let mut p = PfoParameters::new(22, 0);
                p.clusters = clusters.iter().copied().map(ClusterId).collect();
                p.tracks = tracks.iter().copied().map(TrackId).collect();

                let distinct_c: std::collections::HashSet<_> = clusters.iter().collect();
                let distinct_t: std::collections::HashSet<_> = tracks.iter().collect();
                let has_dup = distinct_c.len() != clusters.len() || distinct_t.len() != tracks.len();
                prop_assert_eq!(p.validate().is_err(), has_dup);
            }
        }
    }
}
