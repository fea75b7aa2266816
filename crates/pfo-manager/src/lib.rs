//! Invariant-enforcing management of particle flow objects (PFOs).
//!
//! The [`ParticleFlowObjectManager`] is the sole code path that changes
//! PFO structure. It guarantees, after every successful operation:
//!
//! - **Non-emptiness:** removal never takes away a PFO's final
//!   constituent; that request is refused with `NotAllowed` so the caller
//!   deletes the PFO instead.
//! - **Hierarchy symmetry:** `B ∈ A.daughters ⇔ A ∈ B.parents`. Both halves
//!   of an edge are added and removed together, and deleting a PFO removes
//!   every edge that pointed at it.
//! - **No partial mutation:** a refused operation changes nothing.
//!
//! # Access control
//!
//! Mutation goes through the sealed [`PfoMutator`] capability, which is
//! handed only to [`ConstructionApi`], [`ContentApi`] and the
//! [`PfoPipeline`] driver. Everything else sees the manager by shared
//! reference.
//!
//! ```
//! use pfo_core::{ClusterId, PfoParameters, StatusCode, TrackId};
//! use pfo_manager::{PfoPipeline, PipelineConfig};
//!
//! let mut pipeline = PfoPipeline::new(PipelineConfig::default()).unwrap();
//! pipeline
//!     .construct(|api| {
//!         api.register_cluster(ClusterId(1)).unwrap();
//!         api.register_track(TrackId(1)).unwrap();
//!     })
//!     .unwrap();
//!
//! let code = pipeline
//!     .run_algorithm("PfoCreation", |api| {
//!         let pfo = api
//!             .create_pfo(&PfoParameters::new(211, 1).with_cluster(ClusterId(1)))
//!             .unwrap();
//!         api.add_track_to_pfo(pfo, TrackId(1)).unwrap();
//!         api.remove_cluster_from_pfo(pfo, ClusterId(1)).unwrap();
//!         StatusCode::of(&api.remove_track_from_pfo(pfo, TrackId(1)))
//!     })
//!     .unwrap();
//! assert_eq!(code, StatusCode::NotAllowed);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod driver;
pub mod manager;
pub mod mutator;
pub mod pfo;

pub use api::{ConstructionApi, ContentApi};
pub use config::{ConfigError, PipelineConfig};
pub use driver::PfoPipeline;
pub use manager::ParticleFlowObjectManager;
pub use mutator::PfoMutator;
pub use pfo::ParticleFlowObject;
