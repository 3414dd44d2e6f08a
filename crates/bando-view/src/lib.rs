#![forbid(unsafe_code)]

//! View state for criteria trees.
//!
//! The data model in `bando-model` is an immutable snapshot; everything the
//! user can change by looking at it lives here. [`TreeViewState`] owns the
//! collapse and description-expansion sets for one mounted tree view, and
//! [`SimilarPanelState`] owns the single-slot selection for the similar
//! criteria side panel. Both are plain synchronous objects passed by
//! reference into the widgets that render them; nothing here is ambient or
//! global.

pub mod similar_panel;
pub mod tree_state;

pub use similar_panel::SimilarPanelState;
pub use tree_state::{SnapshotPolicy, TreeViewState};
