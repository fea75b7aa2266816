//! Core types for particle flow object (PFO) management.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers, the outcome taxonomy returned by every structural
//! mutation, the creation/metadata parameter bundles and the catalog of
//! currently valid constituent (cluster and track) identities.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod id;
pub mod params;
pub mod traits;

pub use catalog::ConstituentCatalog;
pub use error::{PfoError, PfoResult, StatusCode};
pub use id::{AlgorithmId, ClusterId, PfoId, TrackId};
pub use params::{Momentum, PfoMetadata, PfoParameters};
pub use traits::ObjectKey;
