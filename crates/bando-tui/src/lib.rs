#![forbid(unsafe_code)]

//! Terminal rendering for criteria trees.
//!
//! A small cell-buffer substrate plus the two widgets the explorer needs:
//! [`CriteriaTree`] renders the nested criteria with collapse-aware
//! recursion, and [`SimilarPanel`] renders the similar-criteria side panel.
//! Widgets are pure: they borrow the model snapshot and the view state and
//! draw into a [`Buffer`]; they never own or mutate state.

pub mod buffer;
pub mod criteria_tree;
pub mod flatten;
pub mod geometry;
pub mod guides;
pub mod similar_panel;
pub mod style;
pub mod text;

pub use buffer::{Buffer, Cell};
pub use criteria_tree::{CriteriaTree, DESCRIPTION_PREVIEW, TreeLine, TreeToken};
pub use flatten::{VisibleNode, flatten_visible};
pub use geometry::Rect;
pub use guides::TreeGuides;
pub use similar_panel::SimilarPanel;
pub use style::{Rgb, Style, StyleFlags};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Buffer` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// Draw a text span into a buffer at the given position.
///
/// Returns the x position after the last drawn character.
/// Stops at `max_x` (exclusive); wide graphemes that would straddle the
/// boundary are dropped.
pub fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if x + w as u16 > max_x {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            buf.set(x, y, Cell::new(c, style));
        }
        x = x.saturating_add(w as u16);
    }
    x
}
