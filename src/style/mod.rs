//! Style module: Colors and text attributes for rendered cells.
//!
//! This module contains:
//! - [`Rgb`]: True-color representation
//! - [`Color`]: A terminal color identifier (default, 256-palette index, or true color)
//! - [`Modifiers`]: Text style bitflags
//! - [`Style`]: Foreground, background, and modifiers bundled together

mod color;

pub use color::{Color, Rgb};

use bitflags::bitflags;

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use segbar::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl Modifiers {
    /// SGR parameter for each modifier, in bit order.
    pub(crate) const SGR_CODES: [(Self, u8); 8] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::BLINK, 5),
        (Self::REVERSED, 7),
        (Self::HIDDEN, 8),
        (Self::STRIKETHROUGH, 9),
    ];
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Visual attributes applied to a run of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground (text) color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// The neutral style: terminal default colors, no modifiers.
    pub const RESET: Self = Self {
        fg: Color::Reset,
        bg: Color::Reset,
        modifiers: Modifiers::empty(),
    };

    /// Create a style from a foreground and background color.
    #[inline]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
