//! Model-layer errors.

use thiserror::Error;

/// Errors raised while decoding or validating an analysis payload.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The payload was not valid JSON or did not match the schema.
    #[error("invalid analysis payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A criterion arrived without an id. View state is keyed by id, so
    /// such a node cannot be addressed at all.
    #[error("criterion {name:?} has an empty id")]
    EmptyId {
        /// Display name of the offending node.
        name: String,
    },

    /// Two criteria share an id. Collapse state would conflate them.
    #[error("duplicate criterion id {id:?}")]
    DuplicateId {
        /// The colliding id.
        id: String,
    },
}
