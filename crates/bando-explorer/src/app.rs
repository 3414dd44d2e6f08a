//! Explorer application model.
//!
//! Owns the analysis snapshot, the view state and the cursor, translates
//! key events into state-store operations, and composes the widgets into a
//! frame buffer. Everything here is synchronous and terminal-free, so the
//! whole interaction model is unit-testable.

use bando_model::{Analysis, Criterion, DepthFirst, collect_all_ids};
use bando_tui::{
    Buffer, CriteriaTree, Rect, SimilarPanel, Style, TreeGuides, Widget, draw_text_span,
    flatten_visible,
};
use bando_view::{SimilarPanelState, TreeViewState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

const HELP_LINES: &[&str] = &[
    "Su/Giù, k/j    muovi il cursore",
    "Invio/Spazio   apri o chiudi il criterio",
    "e / c / t      espandi tutto / chiudi tutto / inverti",
    "d              mostra tutta la descrizione",
    "x              modalità compatta",
    "s              pannello criteri simili",
    "n / p          scorri i criteri simili",
    "?              chiudi questo aiuto",
    "q              esci",
];

/// Minimum total width before the similar panel gets its own column.
const PANEL_MIN_WIDTH: u16 = 60;

/// The explorer's mutable state.
pub struct App {
    analysis: Analysis,
    view: TreeViewState,
    panel: SimilarPanelState,
    cursor: usize,
    scroll: usize,
    ascii: bool,
    show_help: bool,
    quit: bool,
}

impl App {
    /// Create the app over a validated snapshot.
    #[must_use]
    pub fn new(analysis: Analysis, ascii: bool, start_collapsed: bool) -> Self {
        let mut view = TreeViewState::new();
        if start_collapsed {
            view.collapse_all(collect_all_ids(&analysis.criteria));
        }
        Self {
            analysis,
            view,
            panel: SimilarPanelState::new(),
            cursor: 0,
            scroll: 0,
            ascii,
            show_help: false,
            quit: false,
        }
    }

    /// Whether the event loop should stop.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Number of criteria currently visible.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        flatten_visible(&self.analysis.criteria, &self.view).len()
    }

    /// Id of the criterion under the cursor.
    #[must_use]
    pub fn cursor_id(&self) -> Option<String> {
        flatten_visible(&self.analysis.criteria, &self.view)
            .get(self.cursor)
            .map(|v| v.node.id.clone())
    }

    fn criterion(&self, id: &str) -> Option<&Criterion> {
        DepthFirst::of(&self.analysis.criteria).find(|n| n.id == id)
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Keep the open panel pointing at the cursor's criterion. Switching
    /// hosts resets the selection inside the state object.
    fn follow_panel(&mut self) {
        if self.panel.host().is_some() {
            if let Some(id) = self.cursor_id() {
                self.panel.open(&id);
            }
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let next = self.cursor.saturating_add_signed(delta).min(len - 1);
        self.cursor = next;
        self.follow_panel();
    }

    /// Apply one key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else if self.panel.host().is_some() {
                    self.panel.close();
                } else {
                    self.quit = true;
                }
            }
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Home => {
                self.cursor = 0;
                self.follow_panel();
            }
            KeyCode::End => {
                self.cursor = self.visible_len().saturating_sub(1);
                self.follow_panel();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.cursor_id() {
                    self.view.toggle_collapsed(&id);
                    self.clamp_cursor();
                }
            }
            KeyCode::Char('e') => {
                self.view.expand_all();
            }
            KeyCode::Char('c') => {
                self.view
                    .collapse_all(collect_all_ids(&self.analysis.criteria));
                self.clamp_cursor();
                self.follow_panel();
            }
            KeyCode::Char('t') => {
                self.view
                    .toggle_all(collect_all_ids(&self.analysis.criteria));
                self.clamp_cursor();
                self.follow_panel();
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.cursor_id() {
                    self.view.toggle_description(&id);
                }
            }
            KeyCode::Char('x') => self.view.reset_descriptions(),
            KeyCode::Char('s') => {
                if let Some(id) = self.cursor_id() {
                    if self.panel.is_open_for(&id) {
                        self.panel.close();
                    } else {
                        self.panel.open(&id);
                    }
                }
            }
            KeyCode::Char('n') => {
                if let Some(len) = self.panel_similar_len() {
                    self.panel.select_next(len);
                }
            }
            KeyCode::Char('p') => {
                if let Some(len) = self.panel_similar_len() {
                    self.panel.select_prev(len);
                }
            }
            _ => {}
        }
    }

    fn panel_similar_len(&self) -> Option<usize> {
        let host = self.panel.host()?.to_owned();
        self.criterion(&host).map(|c| c.similar.len())
    }

    /// The view-state store, for inspection in tests.
    #[must_use]
    pub fn view_state(&self) -> &TreeViewState {
        &self.view
    }

    /// The panel state, for inspection in tests.
    #[must_use]
    pub fn panel_state(&self) -> &SimilarPanelState {
        &self.panel
    }

    /// Compose one frame.
    pub fn render(&mut self, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::new(width, height);
        if width == 0 || height < 3 {
            return buf;
        }

        let header_h = self.draw_header(&mut buf, width);
        self.draw_status(&mut buf, width, height);
        let body = Rect::new(0, header_h, width, height - header_h - 1);

        if self.show_help {
            self.draw_help(&mut buf, body);
            return buf;
        }

        let panel_host = self
            .panel
            .host()
            .and_then(|id| self.criterion(id))
            .cloned();
        let (tree_area, panel_area) = split_body(body, panel_host.is_some());

        let guides = if self.ascii {
            TreeGuides::Ascii
        } else {
            TreeGuides::Unicode
        };
        let tree = CriteriaTree::new(&self.analysis.criteria, &self.view)
            .with_guides(guides)
            .with_text_width(tree_area.width as usize)
            .with_cursor(Some(self.cursor));

        // Keep the cursor's header inside the viewport.
        let lines = tree.formatted_lines();
        if let Some(target) = CriteriaTree::header_line(&lines, self.cursor) {
            let view_h = tree_area.height as usize;
            if target < self.scroll {
                self.scroll = target;
            } else if view_h > 0 && target >= self.scroll + view_h {
                self.scroll = target + 1 - view_h;
            }
        }
        tree.with_scroll(self.scroll).render(tree_area, &mut buf);

        if let (Some(host), Some(panel_area)) = (panel_host, panel_area) {
            for y in panel_area.y..panel_area.bottom() {
                draw_text_span(
                    &mut buf,
                    panel_area.x - 1,
                    y,
                    "\u{2502}",
                    Style::new().dim(),
                    panel_area.x,
                );
            }
            SimilarPanel::new(&host, &self.panel).render(panel_area, &mut buf);
        }
        buf
    }

    fn draw_header(&self, buf: &mut Buffer, width: u16) -> u16 {
        let title = format!("Disciplinare: {}", self.analysis.file_name);
        draw_text_span(buf, 0, 0, &title, Style::new().bold(), width);
        if self.analysis.summary.is_empty() {
            1
        } else {
            draw_text_span(buf, 0, 1, &self.analysis.summary, Style::new().dim(), width);
            2
        }
    }

    fn draw_status(&self, buf: &mut Buffer, width: u16, height: u16) {
        let status = format!(
            "{}/{} criteri  q:esci  spazio:apri/chiudi  t:tutti  d:descrizione  s:simili  ?:aiuto",
            self.visible_len(),
            self.analysis.node_count(),
        );
        draw_text_span(buf, 0, height - 1, &status, Style::new().dim(), width);
    }

    fn draw_help(&self, buf: &mut Buffer, area: Rect) {
        let mut y = area.y;
        for line in HELP_LINES {
            if y >= area.bottom() {
                return;
            }
            draw_text_span(buf, area.x + 2, y, line, Style::default(), area.right());
            y += 1;
        }
    }
}

/// Split the body into tree and panel columns. The panel takes two fifths
/// of the width, but only when there is room for both.
fn split_body(body: Rect, panel_open: bool) -> (Rect, Option<Rect>) {
    if !panel_open || body.width < PANEL_MIN_WIDTH {
        return (body, None);
    }
    let panel_w = body.width * 2 / 5;
    let tree_w = body.width - panel_w - 1;
    let tree = Rect::new(body.x, body.y, tree_w, body.height);
    let panel = Rect::new(body.x + tree_w + 1, body.y, panel_w, body.height);
    (tree, Some(panel))
}
