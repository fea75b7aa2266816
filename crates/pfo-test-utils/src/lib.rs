//! Test utilities for particle flow object development.
//!
//! Provides pre-seeded pipelines, parameter shorthands and a graph
//! invariant checker usable from both plain tests and proptests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    check_graph_invariants, graph_snapshot, seeded_pipeline, single_cluster, single_track,
    GraphSnapshot,
};
