//! Collapse and description-expansion state for one tree view.
//!
//! Two independent id-sets: a node can be collapsed or expanded, and its
//! description can be compact or fully shown, in any combination. Default
//! membership is "expanded node, compact description", so a fresh store
//! renders the whole tree with short descriptions.
//!
//! Ids not present in the current tree are accepted everywhere and simply
//! accumulate as inert entries; the renderer never consults them. The store
//! is discarded with the view that owns it.
//!
//! # Example
//!
//! ```
//! use bando_view::TreeViewState;
//!
//! let mut state = TreeViewState::new();
//! assert!(!state.is_collapsed("A"));
//!
//! state.toggle_collapsed("A");
//! assert!(state.is_collapsed("A"));
//!
//! state.expand_all();
//! assert!(!state.is_collapsed("A"));
//! ```

use std::collections::HashSet;

/// What happens to view state when a fresh tree snapshot replaces the old
/// one (e.g. after re-analysis of the same document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotPolicy {
    /// Discard all view state; the new tree starts fully expanded.
    #[default]
    Reset,
    /// Keep collapse and description choices keyed by id. Ids absent from
    /// the new tree stay in the sets as harmless orphans.
    Retain,
}

/// Source of truth for which nodes are collapsed and which descriptions
/// are expanded, for a single mounted tree view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TreeViewState {
    collapsed: HashSet<String>,
    expanded_descriptions: HashSet<String>,
}

impl TreeViewState {
    /// Create an empty store: every node expanded, every description
    /// compact.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is currently collapsed. Absence means expanded.
    #[must_use]
    pub fn is_collapsed(&self, id: &str) -> bool {
        self.collapsed.contains(id)
    }

    /// Flip the collapse state of `id`. Toggling twice restores the prior
    /// membership. Unknown ids are accepted.
    pub fn toggle_collapsed(&mut self, id: &str) {
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.to_owned());
        }
    }

    /// Collapse exactly the given ids, replacing any previous collapse set.
    ///
    /// Callers pass every id in the tree (see
    /// `bando_model::collect_all_ids`) to reach the fully-collapsed state.
    /// An empty iterator is valid and equivalent to [`expand_all`].
    ///
    /// [`expand_all`]: Self::expand_all
    pub fn collapse_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.collapsed = ids.into_iter().collect();
        #[cfg(feature = "tracing")]
        tracing::debug!(collapsed = self.collapsed.len(), "collapse_all");
    }

    /// Expand every node by clearing the collapse set, including ids never
    /// toggled individually.
    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Bulk toggle. A non-empty collapse set, even a single node, counts as
    /// "partially collapsed" and the action expands everything; only a
    /// fully-expanded tree collapses. The tie-break is deliberate: from any
    /// partial state, one invocation reaches fully-expanded.
    pub fn toggle_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        if self.collapsed.is_empty() {
            self.collapse_all(ids);
        } else {
            self.expand_all();
        }
    }

    /// Whether no node is collapsed.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.collapsed.is_empty()
    }

    /// Number of ids currently marked collapsed, inert orphans included.
    #[must_use]
    pub fn collapsed_len(&self) -> usize {
        self.collapsed.len()
    }

    /// Whether the long description of `id` is fully shown. Absence means
    /// compact.
    #[must_use]
    pub fn is_description_expanded(&self, id: &str) -> bool {
        self.expanded_descriptions.contains(id)
    }

    /// Flip the description expansion of `id`, independently of its
    /// collapse state.
    pub fn toggle_description(&mut self, id: &str) {
        if !self.expanded_descriptions.remove(id) {
            self.expanded_descriptions.insert(id.to_owned());
        }
    }

    /// Collapse every description back to its compact preview ("compact
    /// mode"). The collapse set is untouched.
    pub fn reset_descriptions(&mut self) {
        self.expanded_descriptions.clear();
    }

    /// Apply the configured policy for a snapshot replacement.
    pub fn on_new_snapshot(&mut self, policy: SnapshotPolicy) {
        match policy {
            SnapshotPolicy::Reset => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    dropped_collapsed = self.collapsed.len(),
                    dropped_descriptions = self.expanded_descriptions.len(),
                    "view state reset for new snapshot"
                );
                *self = Self::default();
            }
            SnapshotPolicy::Retain => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn default_is_fully_expanded() {
        let state = TreeViewState::new();
        assert!(state.is_fully_expanded());
        assert!(!state.is_collapsed("anything"));
        assert!(!state.is_description_expanded("anything"));
    }

    #[test]
    fn collapse_all_covers_every_id() {
        let mut state = TreeViewState::new();
        state.collapse_all(ids(&["A", "B", "C", "D"]));
        for id in ["A", "B", "C", "D"] {
            assert!(state.is_collapsed(id));
        }
        assert_eq!(state.collapsed_len(), 4);
    }

    #[test]
    fn expand_all_clears_untouched_ids_too() {
        let mut state = TreeViewState::new();
        state.collapse_all(ids(&["A", "B"]));
        state.toggle_collapsed("C");
        state.expand_all();
        for id in ["A", "B", "C", "never-toggled"] {
            assert!(!state.is_collapsed(id));
        }
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut state = TreeViewState::new();
        state.toggle_collapsed("X");
        state.toggle_collapsed("X");
        assert_eq!(state, TreeViewState::new());
    }

    #[test]
    fn collapse_all_replaces_rather_than_unions() {
        let mut state = TreeViewState::new();
        state.toggle_collapsed("stale");
        state.collapse_all(ids(&["A"]));
        assert!(state.is_collapsed("A"));
        assert!(!state.is_collapsed("stale"));
    }

    #[test]
    fn collapse_all_with_empty_set_expands() {
        let mut state = TreeViewState::new();
        state.toggle_collapsed("A");
        state.collapse_all(Vec::new());
        assert!(state.is_fully_expanded());
    }

    #[test]
    fn toggle_all_round_trips_from_fully_expanded() {
        let mut state = TreeViewState::new();
        let all = ids(&["A", "B", "C"]);

        state.toggle_all(all.clone());
        assert_eq!(state.collapsed_len(), 3);

        state.toggle_all(all);
        assert!(state.is_fully_expanded());
    }

    #[test]
    fn toggle_all_from_partial_state_expands() {
        // One collapsed node is "partially collapsed": the bulk action
        // finishes expanding, it does not finish collapsing.
        let mut state = TreeViewState::new();
        state.toggle_collapsed("B");
        state.toggle_all(ids(&["A", "B", "C"]));
        assert!(state.is_fully_expanded());
    }

    #[test]
    fn description_state_is_independent_of_collapse() {
        let mut state = TreeViewState::new();
        state.toggle_description("A");
        assert!(state.is_description_expanded("A"));
        assert!(!state.is_collapsed("A"));

        state.toggle_collapsed("A");
        assert!(state.is_description_expanded("A"));

        state.expand_all();
        assert!(state.is_description_expanded("A"));

        state.toggle_description("A");
        assert!(!state.is_description_expanded("A"));
        assert!(!state.is_collapsed("A"));
    }

    #[test]
    fn reset_descriptions_leaves_collapse_set() {
        let mut state = TreeViewState::new();
        state.toggle_collapsed("A");
        state.toggle_description("A");
        state.toggle_description("B");

        state.reset_descriptions();
        assert!(!state.is_description_expanded("A"));
        assert!(!state.is_description_expanded("B"));
        assert!(state.is_collapsed("A"));
    }

    #[test]
    fn stale_ids_are_inert_members() {
        let mut state = TreeViewState::new();
        state.toggle_collapsed("X");
        // A new snapshot without "X" arrives; under Retain the entry
        // persists but harms nothing.
        state.on_new_snapshot(SnapshotPolicy::Retain);
        assert!(state.is_collapsed("X"));
    }

    #[test]
    fn reset_policy_drops_everything() {
        let mut state = TreeViewState::new();
        state.toggle_collapsed("X");
        state.toggle_description("Y");
        state.on_new_snapshot(SnapshotPolicy::Reset);
        assert_eq!(state, TreeViewState::new());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_toggle_sequence_then_expand_all_is_fully_expanded(
                toggles in prop::collection::vec("[a-d]", 0..32),
            ) {
                let mut state = TreeViewState::new();
                for id in &toggles {
                    state.toggle_collapsed(id);
                }
                state.expand_all();
                prop_assert!(state.is_fully_expanded());
                for id in &toggles {
                    prop_assert!(!state.is_collapsed(id));
                }
            }

            #[test]
            fn paired_toggles_cancel(
                prior in prop::collection::vec("[a-d]", 0..16),
                id in "[a-z]{1,4}",
            ) {
                let mut state = TreeViewState::new();
                for p in &prior {
                    state.toggle_collapsed(p);
                }
                let before = state.is_collapsed(&id);
                state.toggle_collapsed(&id);
                prop_assert_ne!(before, state.is_collapsed(&id));
                state.toggle_collapsed(&id);
                prop_assert_eq!(before, state.is_collapsed(&id));
            }

            #[test]
            fn toggles_never_cross_the_two_sets(
                ops in prop::collection::vec(("[a-c]", any::<bool>()), 0..32),
            ) {
                let mut state = TreeViewState::new();
                for (id, description) in &ops {
                    let collapse_before = state.is_collapsed(id);
                    let desc_before = state.is_description_expanded(id);
                    if *description {
                        state.toggle_description(id);
                        prop_assert_eq!(collapse_before, state.is_collapsed(id));
                    } else {
                        state.toggle_collapsed(id);
                        prop_assert_eq!(desc_before, state.is_description_expanded(id));
                    }
                }
            }
        }
    }

    #[cfg(feature = "state-persistence")]
    mod persistence {
        use super::*;

        #[test]
        fn round_trips_through_json() {
            let mut state = TreeViewState::new();
            state.toggle_collapsed("A");
            state.toggle_collapsed("C");
            state.toggle_description("B");

            let json = serde_json::to_string(&state).unwrap();
            let restored: TreeViewState = serde_json::from_str(&json).unwrap();
            assert_eq!(state, restored);
        }
    }
}
