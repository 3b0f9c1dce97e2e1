//! Segment: One fixed-width, colored cell run of the status bar.

use crate::buffer::Buffer;
use crate::style::{Color, Modifiers, Style};

/// A single unit of bar content.
///
/// The width is fixed by the caller and does not depend on the text: the
/// rendered box is always exactly `width` columns, clipping long text and
/// padding short text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    text: String,
    width: u16,
    fg: Color,
    bg: Color,
    modifiers: Modifiers,
    /// Assigned by the owning bar; empty means untagged.
    tag: String,
}

impl Segment {
    /// Default width of pre-allocated segments.
    pub const DEFAULT_WIDTH: u16 = 10;

    /// Create a segment with the default colors.
    pub fn new(width: u16, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width,
            fg: Color::SEGMENT_FG,
            bg: Color::SEGMENT_BG,
            modifiers: Modifiers::empty(),
            tag: String::new(),
        }
    }

    /// Set both colors (builder pattern).
    #[must_use]
    pub fn with_colors(mut self, fg: impl Into<Color>, bg: impl Into<Color>) -> Self {
        self.set_colors(fg, bg);
        self
    }

    /// Set the modifiers (builder pattern).
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the allocated display width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the foreground color.
    pub const fn fg(&self) -> Color {
        self.fg
    }

    /// Get the background color.
    pub const fn bg(&self) -> Color {
        self.bg
    }

    /// Get the modifiers.
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Get the tag, if the bar registered one.
    pub fn tag(&self) -> Option<&str> {
        if self.tag.is_empty() {
            None
        } else {
            Some(&self.tag)
        }
    }

    /// The style the segment paints with.
    pub const fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            modifiers: self.modifiers,
        }
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replace both colors.
    pub fn set_colors(&mut self, fg: impl Into<Color>, bg: impl Into<Color>) {
        self.fg = fg.into();
        self.bg = bg.into();
    }

    /// Replace the allocated width.
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    /// Replace the modifiers.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub(crate) fn set_tag(&mut self, tag: String) {
        self.tag = tag;
    }

    pub(crate) fn take_tag(&mut self) -> Option<String> {
        if self.tag.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.tag))
        }
    }

    /// Render the segment as a `width` x `height` box.
    ///
    /// The text is preceded by one blank column and split into rows at
    /// newlines. Each row is clipped to the box width; rows past `height`
    /// are dropped. Everything not covered by text is painted with the
    /// segment's background.
    pub fn render(&self, height: u16) -> Buffer {
        let style = self.style();
        let mut buffer = Buffer::filled(self.width, height, style);
        if self.width == 0 {
            return buffer;
        }

        let content = format!(" {}", self.text);
        for (y, line) in (0..height).zip(content.split('\n')) {
            buffer.write_line(0, y, line, style, self.width);
        }
        buffer
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, "")
    }
}
