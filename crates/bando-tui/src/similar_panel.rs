//! Similar-criteria side panel widget.
//!
//! Shows the cross-document matches of one host criterion: a selectable
//! list of matches with their similarity scores, and the matched source
//! excerpt for the selected entry.

use bando_model::Criterion;
use bando_view::SimilarPanelState;

use crate::style::{Rgb, Style};
use crate::text::wrap_width;
use crate::{Buffer, Rect, Widget, draw_text_span};

/// Widget rendering the similar-criteria panel for one criterion.
#[derive(Debug, Clone)]
pub struct SimilarPanel<'a> {
    host: &'a Criterion,
    state: &'a SimilarPanelState,
    highlight_symbol: &'a str,
    title_style: Style,
    entry_style: Style,
    highlight_style: Style,
    score_style: Style,
    source_style: Style,
}

impl<'a> SimilarPanel<'a> {
    /// Create a panel for the given host criterion.
    #[must_use]
    pub fn new(host: &'a Criterion, state: &'a SimilarPanelState) -> Self {
        Self {
            host,
            state,
            highlight_symbol: "\u{25B8} ",
            title_style: Style::new().bold(),
            entry_style: Style::default(),
            highlight_style: Style::new().reverse(),
            score_style: Style::new().fg(Rgb::new(120, 180, 120)),
            source_style: Style::new().dim(),
        }
    }

    /// Set the symbol displayed before the selected entry.
    #[must_use]
    pub fn with_highlight_symbol(mut self, symbol: &'a str) -> Self {
        self.highlight_symbol = symbol;
        self
    }

    /// Set the style for the selected entry.
    #[must_use]
    pub fn with_highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }
}

impl Widget for SimilarPanel<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let max_x = area.right();
        let mut y = area.y;

        let title = format!("Criteri simili: {}", self.host.name);
        draw_text_span(buf, area.x, y, &title, self.title_style, max_x);
        y = y.saturating_add(1);

        if self.host.similar.is_empty() {
            if y < area.bottom() {
                draw_text_span(
                    buf,
                    area.x,
                    y,
                    "nessun criterio simile",
                    Style::new().dim(),
                    max_x,
                );
            }
            return;
        }

        let selected = self
            .state
            .is_open_for(&self.host.id)
            .then(|| self.state.selected())
            .flatten();

        for (i, entry) in self.host.similar.iter().enumerate() {
            if y >= area.bottom() {
                return;
            }
            let is_selected = selected == Some(i);
            let prefix = if is_selected {
                self.highlight_symbol
            } else {
                "  "
            };
            let mut x = draw_text_span(buf, area.x, y, prefix, self.entry_style, max_x);
            x = draw_text_span(
                buf,
                x,
                y,
                &format!("{} ", entry.score),
                self.score_style,
                max_x,
            );
            let label = if entry.source_file_name.is_empty() {
                entry.origin_criterion_id.clone()
            } else {
                format!("{} ({})", entry.origin_criterion_id, entry.source_file_name)
            };
            draw_text_span(buf, x, y, &label, self.entry_style, max_x);
            if is_selected {
                buf.patch_row(y, area.x, max_x, self.highlight_style);
            }
            y = y.saturating_add(1);
        }

        // Matched excerpt for the selected entry.
        if let Some(entry) = selected.and_then(|i| self.host.similar.get(i)) {
            if entry.source_text.is_empty() {
                return;
            }
            y = y.saturating_add(1);
            for line in wrap_width(&entry.source_text, area.width as usize) {
                if y >= area.bottom() {
                    return;
                }
                draw_text_span(buf, area.x, y, &line, self.source_style, max_x);
                y = y.saturating_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bando_model::{Similarity, SimilarCriterion};

    fn host() -> Criterion {
        Criterion::new("A", "Qualità")
            .with_similar(
                SimilarCriterion::new("s1", Similarity::from_fraction(0.92))
                    .with_origin("B.1")
                    .with_source_file("altra_gara.pdf")
                    .with_source_text("organizzazione del servizio di pulizia"),
            )
            .with_similar(
                SimilarCriterion::new("s2", Similarity::from_fraction(0.55)).with_origin("C.3"),
            )
    }

    fn render(panel: &SimilarPanel<'_>, width: u16, height: u16) -> Vec<String> {
        let mut buf = Buffer::new(width, height);
        panel.render(Rect::from_size(width, height), &mut buf);
        buf.lines()
    }

    #[test]
    fn title_names_the_host() {
        let h = host();
        let state = SimilarPanelState::new();
        let lines = render(&SimilarPanel::new(&h, &state), 50, 10);
        assert!(lines[0].contains("Qualità"));
    }

    #[test]
    fn scores_render_as_percent() {
        let h = host();
        let state = SimilarPanelState::new();
        let text = render(&SimilarPanel::new(&h, &state), 50, 10).join("\n");
        assert!(text.contains("92%"));
        assert!(text.contains("55%"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let h = Criterion::new("A", "Qualità");
        let state = SimilarPanelState::new();
        let text = render(&SimilarPanel::new(&h, &state), 50, 10).join("\n");
        assert!(text.contains("nessun criterio simile"));
    }

    #[test]
    fn selected_entry_carries_symbol_and_excerpt() {
        let h = host();
        let mut state = SimilarPanelState::new();
        state.open("A");
        state.select(Some(0));

        let text = render(&SimilarPanel::new(&h, &state), 60, 10).join("\n");
        assert!(text.contains("▸ 92%"));
        assert!(text.contains("organizzazione del servizio"));
    }

    #[test]
    fn no_selection_shows_no_excerpt() {
        let h = host();
        let mut state = SimilarPanelState::new();
        state.open("A");

        let text = render(&SimilarPanel::new(&h, &state), 60, 10).join("\n");
        assert!(!text.contains("organizzazione"));
    }

    #[test]
    fn selection_for_other_host_is_ignored() {
        let h = host();
        let mut state = SimilarPanelState::new();
        state.open("Z");
        state.select(Some(0));

        let text = render(&SimilarPanel::new(&h, &state), 60, 10).join("\n");
        assert!(!text.contains('▸'));
        assert!(!text.contains("organizzazione"));
    }

    #[test]
    fn zero_area_does_not_panic() {
        let h = host();
        let state = SimilarPanelState::new();
        let mut buf = Buffer::new(5, 5);
        SimilarPanel::new(&h, &state).render(Rect::new(0, 0, 0, 0), &mut buf);
        assert!(buf.lines().is_empty());
    }

    #[test]
    fn height_clips_entry_list() {
        let h = host();
        let state = SimilarPanelState::new();
        // Title + one entry fit; the second entry is clipped.
        let lines = render(&SimilarPanel::new(&h, &state), 50, 2);
        assert_eq!(lines.len(), 2);
        assert!(!lines.join("\n").contains("55%"));
    }
}
