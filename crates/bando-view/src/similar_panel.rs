//! Selection state for the similar-criteria side panel.
//!
//! At most one similar criterion is selected per open panel. Opening the
//! panel for a different host criterion resets the selection; reopening for
//! the same host keeps it.

/// Single-slot selection register for one similar-criteria panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SimilarPanelState {
    host: Option<String>,
    selected: Option<usize>,
}

impl SimilarPanelState {
    /// Create a closed panel with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the panel for the given host criterion. Switching hosts clears
    /// the selection; reopening the current host is a no-op.
    pub fn open(&mut self, host_id: &str) {
        if self.host.as_deref() != Some(host_id) {
            self.host = Some(host_id.to_owned());
            self.selected = None;
        }
    }

    /// Close the panel and drop the selection.
    pub fn close(&mut self) {
        self.host = None;
        self.selected = None;
    }

    /// The host criterion the panel is open for, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Whether the panel is open for the given criterion.
    #[must_use]
    pub fn is_open_for(&self, id: &str) -> bool {
        self.host.as_deref() == Some(id)
    }

    /// Index of the selected similar criterion within the host's list.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the similar criterion at `index`, replacing any prior
    /// selection, or `None` to deselect. Ignored while the panel is closed.
    pub fn select(&mut self, index: Option<usize>) {
        if self.host.is_some() {
            self.selected = index;
        }
    }

    /// Move the selection forward through a list of `len` entries, wrapping
    /// at the end. With no selection yet, selects the first entry. A zero
    /// `len` deselects.
    pub fn select_next(&mut self, len: usize) {
        if self.host.is_none() {
            return;
        }
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), _) => Some((i + 1) % len),
        };
    }

    /// Move the selection backward, wrapping at the start.
    pub fn select_prev(&mut self, len: usize) {
        if self.host.is_none() {
            return;
        }
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (None, _) => Some(len - 1),
            (Some(0), _) => Some(len - 1),
            (Some(i), _) => Some(i - 1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let panel = SimilarPanelState::new();
        assert_eq!(panel.host(), None);
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn open_then_select() {
        let mut panel = SimilarPanelState::new();
        panel.open("A");
        assert!(panel.is_open_for("A"));
        panel.select(Some(2));
        assert_eq!(panel.selected(), Some(2));
    }

    #[test]
    fn selection_replaces_prior() {
        let mut panel = SimilarPanelState::new();
        panel.open("A");
        panel.select(Some(0));
        panel.select(Some(3));
        assert_eq!(panel.selected(), Some(3));
    }

    #[test]
    fn switching_host_resets_selection() {
        let mut panel = SimilarPanelState::new();
        panel.open("A");
        panel.select(Some(1));
        panel.open("B");
        assert!(panel.is_open_for("B"));
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn reopening_same_host_keeps_selection() {
        let mut panel = SimilarPanelState::new();
        panel.open("A");
        panel.select(Some(1));
        panel.open("A");
        assert_eq!(panel.selected(), Some(1));
    }

    #[test]
    fn select_ignored_while_closed() {
        let mut panel = SimilarPanelState::new();
        panel.select(Some(1));
        assert_eq!(panel.selected(), None);
        panel.select_next(5);
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn close_drops_everything() {
        let mut panel = SimilarPanelState::new();
        panel.open("A");
        panel.select(Some(1));
        panel.close();
        assert_eq!(panel.host(), None);
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn cycling_wraps_both_directions() {
        let mut panel = SimilarPanelState::new();
        panel.open("A");

        panel.select_next(3);
        assert_eq!(panel.selected(), Some(0));
        panel.select_next(3);
        assert_eq!(panel.selected(), Some(1));
        panel.select_next(3);
        assert_eq!(panel.selected(), Some(2));
        panel.select_next(3);
        assert_eq!(panel.selected(), Some(0));

        panel.select_prev(3);
        assert_eq!(panel.selected(), Some(2));
    }

    #[test]
    fn cycling_empty_list_deselects() {
        let mut panel = SimilarPanelState::new();
        panel.open("A");
        panel.select(Some(0));
        panel.select_next(0);
        assert_eq!(panel.selected(), None);
        panel.select_prev(0);
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn prev_with_no_selection_picks_last() {
        let mut panel = SimilarPanelState::new();
        panel.open("A");
        panel.select_prev(4);
        assert_eq!(panel.selected(), Some(3));
    }
}
