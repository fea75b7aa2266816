//! PFO: invariant-preserving management of particle flow objects.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the `pfo-*` sub-crates. For most users, adding `pfo` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pfo::prelude::*;
//!
//! let mut pipeline = PfoPipeline::new(PipelineConfig::default()).unwrap();
//!
//! // Describe the event: which clusters and tracks exist.
//! pipeline
//!     .construct(|api| {
//!         api.register_cluster(ClusterId(0)).unwrap();
//!         api.register_cluster(ClusterId(1)).unwrap();
//!         api.register_track(TrackId(0)).unwrap();
//!     })
//!     .unwrap();
//!
//! // An algorithm builds a small decay hierarchy.
//! let (parent, daughter) = pipeline
//!     .run_algorithm("PfoCreation", |api| {
//!         let parent = api
//!             .create_pfo(&PfoParameters::new(310, 0).with_cluster(ClusterId(0)))
//!             .unwrap();
//!         let daughter = api
//!             .create_pfo(&PfoParameters::new(211, 1).with_track(TrackId(0)))
//!             .unwrap();
//!         api.set_parent_daughter_association(parent, daughter).unwrap();
//!         (parent, daughter)
//!     })
//!     .unwrap();
//!
//! let pfos = pipeline.pfos();
//! assert!(pfos.get(parent).unwrap().daughters().contains(&daughter));
//! assert!(pfos.get(daughter).unwrap().parents().contains(&parent));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pfo-core` | IDs, outcomes, parameters, constituent catalog |
//! | [`pool`] | `pfo-pool` | Generic algorithm-scoped object pool |
//! | [`manager`] | `pfo-manager` | PFO entity, manager, trusted surfaces, pipeline driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core identifiers, outcomes and parameter bundles (`pfo-core`).
pub use pfo_core as types;

/// Generational, algorithm-scoped object storage (`pfo-pool`).
pub use pfo_pool as pool;

/// The PFO manager and its trusted caller surfaces (`pfo-manager`).
///
/// [`manager::PfoPipeline`] is the entry point; [`manager::ContentApi`] is
/// what algorithms see.
pub use pfo_manager as manager;

/// Common imports for typical usage.
///
/// ```rust
/// use pfo::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use pfo_core::{
        AlgorithmId, ClusterId, Momentum, PfoId, PfoMetadata, PfoParameters, TrackId,
    };

    // Outcomes
    pub use pfo_core::{PfoError, PfoResult, StatusCode};

    // Manager and surfaces
    pub use pfo_manager::{
        ConstructionApi, ContentApi, ParticleFlowObject, ParticleFlowObjectManager, PfoPipeline,
        PipelineConfig,
    };
}
