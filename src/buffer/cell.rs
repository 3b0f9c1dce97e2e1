//! Cell: The atomic unit of a rendered bar.
//!
//! # Memory Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Cell Layout (16 bytes)                                       │
//! ├─────────────┬─────────────┬───────────┬───────────┬─────┬─────┤
//! │  grapheme   │  len + width│    fg     │    bg     │ mod │flags│
//! │  [u8; 4]    │  u8 + u8    │  Color    │  Color    │ u8  │ u8  │
//! │  4 bytes    │  2 bytes    │  4 bytes  │  4 bytes  │ 1b  │ 1b  │
//! └─────────────┴─────────────┴───────────┴───────────┴─────┴─────┘
//! ```

use crate::style::{Color, Modifiers, Style};
use bitflags::bitflags;
use unicode_width::UnicodeWidthStr;

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Grapheme overflows inline storage; check the buffer's overflow map
        const OVERFLOW = 0b0000_0001;
        /// This cell is a continuation of a wide character
        const WIDE_CONTINUATION = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single styled terminal cell.
///
/// Graphemes of up to 4 UTF-8 bytes are stored inline. Longer clusters
/// (emoji ZWJ sequences) set `OVERFLOW` and keep an index into the owning
/// [`Buffer`](super::Buffer)'s overflow storage instead.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Inline grapheme storage (UTF-8 bytes), or a little-endian u32 overflow index.
    grapheme: [u8; 4],
    /// Byte length of the inline grapheme (0 if overflowed).
    grapheme_len: u8,
    /// Display width (0=continuation, 1=normal, 2=wide).
    display_width: u8,
    fg: Color,
    bg: Color,
    modifiers: Modifiers,
    flags: CellFlags,
}

const _: () = assert!(
    std::mem::size_of::<Cell>() == 16,
    "Cell must stay 16 bytes"
);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A blank cell with the neutral style.
    pub const EMPTY: Self = Self::blank(Style::RESET);

    /// A space painted with `style`.
    #[inline]
    pub const fn blank(style: Style) -> Self {
        Self {
            grapheme: [b' ', 0, 0, 0],
            grapheme_len: 1,
            display_width: 1,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::empty(),
        }
    }

    /// Create a cell from a grapheme string.
    ///
    /// Returns `None` when the grapheme needs more than 4 bytes; the caller
    /// stores it out of line with [`Cell::overflow`].
    #[inline]
    pub fn from_grapheme(s: &str, style: Style) -> Option<Self> {
        let bytes = s.as_bytes();
        let len = u8::try_from(bytes.len()).ok().filter(|&len| len <= 4)?;

        let mut grapheme = [0u8; 4];
        grapheme[..bytes.len()].copy_from_slice(bytes);
        let width = u8::try_from(s.width()).unwrap_or(2);

        Some(Self {
            grapheme,
            grapheme_len: len,
            display_width: width,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::empty(),
        })
    }

    /// Create an overflow cell pointing at external grapheme storage.
    #[inline]
    pub const fn overflow(index: u32, display_width: u8, style: Style) -> Self {
        Self {
            grapheme: index.to_le_bytes(),
            grapheme_len: 0,
            display_width,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::OVERFLOW,
        }
    }

    /// The cell following a double-width grapheme.
    #[inline]
    pub const fn wide_continuation(style: Style) -> Self {
        Self {
            grapheme: [0, 0, 0, 0],
            grapheme_len: 0,
            display_width: 0,
            fg: style.fg,
            bg: style.bg,
            modifiers: style.modifiers,
            flags: CellFlags::WIDE_CONTINUATION,
        }
    }

    /// Get the inline grapheme.
    ///
    /// Returns `None` for overflow cells; resolve those through the buffer.
    #[inline]
    pub fn grapheme(&self) -> Option<&str> {
        if self.is_overflow() {
            return None;
        }
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).ok()
    }

    /// Get the overflow index if this is an overflow cell.
    #[inline]
    pub const fn overflow_index(&self) -> Option<u32> {
        if self.is_overflow() {
            Some(u32::from_le_bytes(self.grapheme))
        } else {
            None
        }
    }

    /// Check if this cell uses overflow storage.
    #[inline]
    pub const fn is_overflow(&self) -> bool {
        self.flags.contains(CellFlags::OVERFLOW)
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Color {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Color {
        self.bg
    }

    /// Get the modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Get the full style of this cell.
    #[inline]
    pub const fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            modifiers: self.modifiers,
        }
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Replace the style (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.fg = style.fg;
        self.bg = style.bg;
        self.modifiers = style.modifiers;
        self
    }

    /// Re-point an overflow cell at a different index.
    #[inline]
    pub(crate) fn set_overflow_index(&mut self, index: u32) {
        self.grapheme = index.to_le_bytes();
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grapheme = self.grapheme().unwrap_or("<overflow>");
        f.debug_struct("Cell")
            .field("grapheme", &grapheme)
            .field("width", &self.display_width)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Rgb;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 16);
    }

    #[test]
    fn test_blank_cell_carries_style() {
        let style = Style::new(Color::Indexed(252), Color::Indexed(236));
        let cell = Cell::blank(style);
        assert_eq!(cell.grapheme(), Some(" "));
        assert_eq!(cell.style(), style);
    }

    #[test]
    fn test_from_grapheme_ascii() {
        let cell = Cell::from_grapheme("A", Style::RESET).unwrap();
        assert_eq!(cell.grapheme(), Some("A"));
        assert_eq!(cell.display_width(), 1);
    }

    #[test]
    fn test_from_grapheme_wide() {
        let cell = Cell::from_grapheme("日", Style::RESET).unwrap();
        assert_eq!(cell.grapheme(), Some("日"));
        assert_eq!(cell.display_width(), 2);
    }

    #[test]
    fn test_from_grapheme_too_long() {
        assert!(Cell::from_grapheme("👨‍👩‍👧", Style::RESET).is_none());
    }

    #[test]
    fn test_overflow_cell() {
        let cell = Cell::overflow(42, 2, Style::RESET);
        assert!(cell.is_overflow());
        assert_eq!(cell.overflow_index(), Some(42));
        assert_eq!(cell.grapheme(), None);
    }

    #[test]
    fn test_cell_equality() {
        let red = Style::new(Color::Rgb(Rgb::new(255, 0, 0)), Color::Reset);
        let green = Style::new(Color::Rgb(Rgb::new(0, 255, 0)), Color::Reset);
        let a = Cell::from_grapheme("A", red).unwrap();
        let b = Cell::from_grapheme("A", red).unwrap();
        let c = Cell::from_grapheme("A", green).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_wide_continuation() {
        let cont = Cell::wide_continuation(Style::RESET);
        assert!(cont.is_wide_continuation());
        assert_eq!(cont.display_width(), 0);
    }
}
