//! Cell styling.

use bitflags::bitflags;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StyleFlags: u8 {
        /// Bold text.
        const BOLD = 1 << 0;
        /// Dim text.
        const DIM = 1 << 1;
        /// Italic text.
        const ITALIC = 1 << 2;
        /// Reverse video.
        const REVERSE = 1 << 3;
        /// Underlined text.
        const UNDERLINE = 1 << 4;
    }
}

/// A style: optional foreground/background colors plus attribute flags.
///
/// `None` means "inherit whatever the cell already has"; an empty style is
/// a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color override.
    pub fg: Option<Rgb>,
    /// Background color override.
    pub bg: Option<Rgb>,
    /// Attribute flags.
    pub attrs: StyleFlags,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add the bold attribute.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.attrs |= StyleFlags::BOLD;
        self
    }

    /// Add the dim attribute.
    #[must_use]
    pub fn dim(mut self) -> Self {
        self.attrs |= StyleFlags::DIM;
        self
    }

    /// Add the italic attribute.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.attrs |= StyleFlags::ITALIC;
        self
    }

    /// Add the reverse-video attribute.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.attrs |= StyleFlags::REVERSE;
        self
    }

    /// Whether this style changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Overlay `other` on top of this style; set fields in `other` win.
    #[must_use]
    pub fn patch(mut self, other: Style) -> Self {
        if let Some(fg) = other.fg {
            self.fg = Some(fg);
        }
        if let Some(bg) = other.bg {
            self.bg = Some(bg);
        }
        self.attrs |= other.attrs;
        self
    }
}
