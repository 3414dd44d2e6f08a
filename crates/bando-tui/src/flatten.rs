//! Flattening of the visible tree.
//!
//! The explorer's cursor moves over *visible* criterion headers: every node
//! whose ancestors are all expanded, in render order. Collapsed nodes still
//! appear (their header is always drawn); their descendants do not.

use bando_model::Criterion;
use bando_view::TreeViewState;

/// One visible criterion header, in render order.
#[derive(Debug, Clone, Copy)]
pub struct VisibleNode<'a> {
    /// The criterion this row belongs to.
    pub node: &'a Criterion,
    /// Nesting depth, for indentation only.
    pub depth: usize,
}

/// Flatten the forest into visible headers, honoring collapse state.
#[must_use]
pub fn flatten_visible<'a>(
    forest: &'a [Criterion],
    state: &TreeViewState,
) -> Vec<VisibleNode<'a>> {
    let mut out = Vec::new();
    for node in forest {
        push_visible(node, 0, state, &mut out);
    }
    out
}

fn push_visible<'a>(
    node: &'a Criterion,
    depth: usize,
    state: &TreeViewState,
    out: &mut Vec<VisibleNode<'a>>,
) {
    out.push(VisibleNode { node, depth });
    if state.is_collapsed(&node.id) {
        return;
    }
    for child in &node.children {
        push_visible(child, depth + 1, state, out);
    }
}
