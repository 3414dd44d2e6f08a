//! Criteria tree widget.
//!
//! Renders an evaluation-criteria forest as a nested list, consulting a
//! [`TreeViewState`] at every node: headers are always drawn, collapsed
//! nodes stop the recursion, and long descriptions render as a truncated
//! preview until expanded.
//!
//! One parameterized widget replaces the family of near-identical viewer
//! variants the backend's other front-ends grew: score column, similarity
//! badges, guide glyphs and preview length are builder options.
//!
//! # Example
//!
//! ```
//! use bando_model::Criterion;
//! use bando_tui::{Buffer, CriteriaTree, Rect, Widget};
//! use bando_view::TreeViewState;
//!
//! let criteria = vec![Criterion::new("A", "Offerta tecnica")
//!     .child(Criterion::new("B", "Qualità"))];
//! let state = TreeViewState::new();
//!
//! let mut buf = Buffer::new(40, 10);
//! CriteriaTree::new(&criteria, &state).render(Rect::from_size(40, 10), &mut buf);
//! assert!(buf.row_text(0).contains("Offerta tecnica"));
//! ```

use bando_model::Criterion;
use bando_view::TreeViewState;

use crate::guides::TreeGuides;
use crate::style::{Rgb, Style};
use crate::text::{exceeds_graphemes, truncate_graphemes, wrap_width};
use crate::{Buffer, Rect, Widget, draw_text_span};

/// Grapheme threshold above which a description renders as a preview.
pub const DESCRIPTION_PREVIEW: usize = 100;

/// A classified piece of one rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeToken {
    /// Guide/indent prefix.
    Guide(String),
    /// Collapse marker in front of the name.
    Marker(&'static str),
    /// Criterion name.
    Name(String),
    /// Score column, e.g. `" [70 punti]"`.
    Score(String),
    /// Similar-criteria badge, e.g. `" ≈3"`.
    Badge(String),
    /// Description text.
    Description(String),
    /// Show-more / show-less affordance.
    Affordance(&'static str),
}

impl TreeToken {
    fn text(&self) -> &str {
        match self {
            Self::Guide(s)
            | Self::Name(s)
            | Self::Score(s)
            | Self::Badge(s)
            | Self::Description(s) => s.as_str(),
            Self::Marker(s) | Self::Affordance(s) => s,
        }
    }
}

/// One formatted line: its tokens plus, for header lines, the index of the
/// criterion in visible (flattened) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// The line content, in draw order.
    pub tokens: Vec<TreeToken>,
    /// Visible-header index when this line is a criterion header.
    pub node: Option<usize>,
}

impl TreeLine {
    /// The plain text of the line, styling ignored.
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.iter().map(TreeToken::text).collect()
    }
}

/// Widget rendering a criteria forest with collapse-aware recursion.
#[derive(Debug, Clone)]
pub struct CriteriaTree<'a> {
    criteria: &'a [Criterion],
    state: &'a TreeViewState,
    guides: TreeGuides,
    show_scores: bool,
    show_similar_badges: bool,
    description_preview: usize,
    text_width: usize,
    cursor: Option<usize>,
    scroll: usize,
    guide_style: Style,
    name_style: Style,
    score_style: Style,
    description_style: Style,
    affordance_style: Style,
    cursor_style: Style,
}

impl<'a> CriteriaTree<'a> {
    /// Create a tree widget over a forest and its view state.
    #[must_use]
    pub fn new(criteria: &'a [Criterion], state: &'a TreeViewState) -> Self {
        Self {
            criteria,
            state,
            guides: TreeGuides::default(),
            show_scores: true,
            show_similar_badges: true,
            description_preview: DESCRIPTION_PREVIEW,
            text_width: 80,
            cursor: None,
            scroll: 0,
            guide_style: Style::new().dim(),
            name_style: Style::new().bold(),
            score_style: Style::new().fg(Rgb::new(180, 180, 120)),
            description_style: Style::default(),
            affordance_style: Style::new().dim().italic(),
            cursor_style: Style::new().reverse(),
        }
    }

    /// Set the guide glyph set.
    #[must_use]
    pub fn with_guides(mut self, guides: TreeGuides) -> Self {
        self.guides = guides;
        self
    }

    /// Show or hide the max-score column.
    #[must_use]
    pub fn with_scores(mut self, show: bool) -> Self {
        self.show_scores = show;
        self
    }

    /// Show or hide similar-criteria badges.
    #[must_use]
    pub fn with_similar_badges(mut self, show: bool) -> Self {
        self.show_similar_badges = show;
        self
    }

    /// Set the description preview threshold in graphemes.
    #[must_use]
    pub fn with_description_preview(mut self, graphemes: usize) -> Self {
        self.description_preview = graphemes;
        self
    }

    /// Set the column budget used to wrap description text.
    #[must_use]
    pub fn with_text_width(mut self, width: usize) -> Self {
        self.text_width = width;
        self
    }

    /// Highlight the criterion at the given visible-header index.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Skip the first `lines` formatted lines when rendering.
    #[must_use]
    pub fn with_scroll(mut self, lines: usize) -> Self {
        self.scroll = lines;
        self
    }

    /// Set the style for guide characters.
    #[must_use]
    pub fn with_guide_style(mut self, style: Style) -> Self {
        self.guide_style = style;
        self
    }

    /// Set the style for criterion names.
    #[must_use]
    pub fn with_name_style(mut self, style: Style) -> Self {
        self.name_style = style;
        self
    }

    /// Set the style overlaid on the cursor row.
    #[must_use]
    pub fn with_cursor_style(mut self, style: Style) -> Self {
        self.cursor_style = style;
        self
    }

    /// Format the whole visible tree into classified lines.
    ///
    /// Header lines carry their visible-header index so callers can map the
    /// cursor to a line (see [`header_line`]).
    ///
    /// [`header_line`]: Self::header_line
    #[must_use]
    pub fn formatted_lines(&self) -> Vec<TreeLine> {
        let mut lines = Vec::new();
        let mut is_last = Vec::with_capacity(8);
        let mut next_header = 0usize;
        for node in self.criteria {
            self.layout_node(node, 0, &mut is_last, &mut lines, &mut next_header);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(lines = lines.len(), headers = next_header, "tree layout");
        lines
    }

    /// The formatted-line index of the given visible-header index.
    #[must_use]
    pub fn header_line(lines: &[TreeLine], header: usize) -> Option<usize> {
        lines.iter().position(|l| l.node == Some(header))
    }

    fn layout_node(
        &self,
        node: &Criterion,
        depth: usize,
        is_last: &mut Vec<bool>,
        lines: &mut Vec<TreeLine>,
        next_header: &mut usize,
    ) {
        let mut tokens = Vec::with_capacity(4);
        let guide = self.header_guide(depth, is_last);
        if !guide.is_empty() {
            tokens.push(TreeToken::Guide(guide));
        }

        let collapsed = self.state.is_collapsed(&node.id);
        tokens.push(TreeToken::Marker(self.marker(node, collapsed)));
        tokens.push(TreeToken::Name(node.name.clone()));
        if self.show_scores && !node.max_score.is_empty() {
            tokens.push(TreeToken::Score(format!(" [{}]", node.max_score)));
        }
        if self.show_similar_badges && !node.similar.is_empty() {
            let badge = match self.guides {
                TreeGuides::Ascii => format!(" ~{}", node.similar.len()),
                _ => format!(" \u{2248}{}", node.similar.len()),
            };
            tokens.push(TreeToken::Badge(badge));
        }
        lines.push(TreeLine {
            tokens,
            node: Some(*next_header),
        });
        *next_header += 1;

        if collapsed {
            return;
        }

        self.layout_description(node, depth, is_last, lines);

        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            is_last.push(i + 1 == count);
            self.layout_node(child, depth + 1, is_last, lines, next_header);
            is_last.pop();
        }
    }

    /// Guide prefix for a header at `depth`; `is_last[d]` is the
    /// last-sibling flag of the ancestor at depth `d + 1`.
    fn header_guide(&self, depth: usize, is_last: &[bool]) -> String {
        let mut guide = String::new();
        for d in 0..depth {
            let last = is_last.get(d).copied().unwrap_or(false);
            guide.push_str(if d + 1 == depth {
                if last {
                    self.guides.last()
                } else {
                    self.guides.branch()
                }
            } else if last {
                self.guides.space()
            } else {
                self.guides.vertical()
            });
        }
        guide
    }

    /// Continuation prefix for description lines under a node at `depth`.
    fn body_guide(&self, depth: usize, is_last: &[bool]) -> String {
        let mut guide = String::new();
        for d in 0..depth {
            let last = is_last.get(d).copied().unwrap_or(false);
            guide.push_str(if last {
                self.guides.space()
            } else {
                self.guides.vertical()
            });
        }
        // Align under the name, past the marker.
        guide.push_str("  ");
        guide
    }

    fn layout_description(
        &self,
        node: &Criterion,
        depth: usize,
        is_last: &[bool],
        lines: &mut Vec<TreeLine>,
    ) {
        if node.description.is_empty() {
            return;
        }
        let guide = self.body_guide(depth, is_last);
        let budget = self.text_width.saturating_sub(depth * self.guides.width() + 2);
        if budget == 0 {
            return;
        }

        let truncatable = exceeds_graphemes(&node.description, self.description_preview);
        let expanded = self.state.is_description_expanded(&node.id);

        let (text, affordance) = if !truncatable {
            (node.description.clone(), None)
        } else if expanded {
            (node.description.clone(), Some(" (less)"))
        } else {
            let (preview, _) = truncate_graphemes(&node.description, self.description_preview);
            (preview, Some("\u{2026} (more)"))
        };

        let wrapped = wrap_width(&text, budget);
        let last_idx = wrapped.len().saturating_sub(1);
        for (i, body) in wrapped.into_iter().enumerate() {
            let mut tokens = vec![
                TreeToken::Guide(guide.clone()),
                TreeToken::Description(body),
            ];
            if i == last_idx {
                if let Some(marker) = affordance {
                    tokens.push(TreeToken::Affordance(marker));
                }
            }
            lines.push(TreeLine { tokens, node: None });
        }
    }

    fn marker(&self, node: &Criterion, collapsed: bool) -> &'static str {
        let ascii = matches!(self.guides, TreeGuides::Ascii);
        if node.is_leaf() {
            if ascii { "- " } else { "\u{00B7} " }
        } else if collapsed {
            if ascii { "> " } else { "\u{25B8} " }
        } else if ascii {
            "v "
        } else {
            "\u{25BE} "
        }
    }

    fn token_style(&self, token: &TreeToken) -> Style {
        match token {
            TreeToken::Guide(_) | TreeToken::Marker(_) => self.guide_style,
            TreeToken::Name(_) => self.name_style,
            TreeToken::Score(_) | TreeToken::Badge(_) => self.score_style,
            TreeToken::Description(_) => self.description_style,
            TreeToken::Affordance(_) => self.affordance_style,
        }
    }
}

impl Widget for CriteriaTree<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let lines = self.formatted_lines();
        let max_x = area.right();

        for (row, line) in lines
            .iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y.saturating_add(row as u16);
            let mut x = area.x;
            for token in &line.tokens {
                x = draw_text_span(buf, x, y, token.text(), self.token_style(token), max_x);
            }
            if line.node.is_some() && line.node == self.cursor {
                buf.patch_row(y, area.x, max_x, self.cursor_style);
            }
        }
    }
}
