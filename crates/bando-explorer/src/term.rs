//! Terminal lifecycle and frame presentation.
//!
//! [`TerminalSession`] owns raw mode and the alternate screen and restores
//! both on drop, so a panic or early return cannot leave the terminal
//! unusable. [`present`] serializes a finished [`Buffer`] as escape
//! sequences; every cell is written, so no explicit clear is needed
//! between frames.

use std::io::{self, Stdout, Write};

use bando_tui::{Buffer, Style, StyleFlags};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

/// RAII guard for raw mode + alternate screen.
pub struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, hiding the cursor.
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out })
    }

    /// The output handle frames are presented on.
    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Best-effort restore; nothing sensible to do with failures here.
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Write one frame to `out`. With `color` off, only characters are
/// emitted.
pub fn present<W: Write>(out: &mut W, buf: &Buffer, color: bool) -> io::Result<()> {
    let mut current: Option<Style> = None;
    for y in 0..buf.height() {
        queue!(out, MoveTo(0, y))?;
        for x in 0..buf.width() {
            let Some(cell) = buf.get(x, y) else { continue };
            if color && current != Some(cell.style) {
                apply_style(out, cell.style)?;
                current = Some(cell.style);
            }
            queue!(out, Print(cell.ch))?;
        }
    }
    if color {
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    }
    out.flush()
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    if style.attrs.contains(StyleFlags::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.attrs.contains(StyleFlags::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.attrs.contains(StyleFlags::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.attrs.contains(StyleFlags::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    if style.attrs.contains(StyleFlags::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if let Some(fg) = style.fg {
        queue!(
            out,
            SetForegroundColor(Color::Rgb {
                r: fg.r,
                g: fg.g,
                b: fg.b
            })
        )?;
    }
    if let Some(bg) = style.bg {
        queue!(
            out,
            SetBackgroundColor(Color::Rgb {
                r: bg.r,
                g: bg.g,
                b: bg.b
            })
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bando_tui::{Cell, Rgb};

    #[test]
    fn present_emits_every_cell() {
        let mut buf = Buffer::new(3, 1);
        buf.set(0, 0, Cell::new('c', Style::default()));
        buf.set(1, 0, Cell::new('i', Style::default()));
        buf.set(2, 0, Cell::new('a', Style::default()));

        let mut out: Vec<u8> = Vec::new();
        present(&mut out, &buf, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("cia"));
        // Plain mode: no SGR sequences.
        assert!(!text.contains("\u{1b}[1m"));
    }

    #[test]
    fn present_applies_bold_and_color() {
        let mut buf = Buffer::new(1, 1);
        buf.set(
            0,
            0,
            Cell::new('x', Style::new().bold().fg(Rgb::new(1, 2, 3))),
        );

        let mut out: Vec<u8> = Vec::new();
        present(&mut out, &buf, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\u{1b}[1m"), "bold SGR missing: {text:?}");
        assert!(text.contains("1;2;3"), "rgb fg missing: {text:?}");
    }

    #[test]
    fn present_resets_at_end_of_color_frame() {
        let buf = Buffer::new(2, 2);
        let mut out: Vec<u8> = Vec::new();
        present(&mut out, &buf, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("\u{1b}[0m\u{1b}[39m\u{1b}[49m") || text.contains("\u{1b}[0m"));
    }
}
