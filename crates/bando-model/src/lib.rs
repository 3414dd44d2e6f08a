#![forbid(unsafe_code)]

//! Data model for tender-criteria analysis snapshots.
//!
//! An analysis backend extracts a hierarchical tree of evaluation criteria
//! ("criteri") from a tender document and ships it as a JSON payload. This
//! crate owns the immutable tree shape, payload decoding, and the identity
//! rules the view layer depends on: criterion ids are unique across the
//! whole tree, and child order is display order.

pub mod analysis;
pub mod criterion;
pub mod error;
pub mod similarity;

pub use analysis::Analysis;
pub use criterion::{Criterion, DepthFirst, SimilarCriterion, collect_all_ids};
pub use error::ModelError;
pub use similarity::Similarity;
