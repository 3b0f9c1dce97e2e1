//! Color: Terminal color identifiers.
//!
//! Colors are written the way status bar configurations usually spell them:
//!
//! ```text
//! ""         terminal default (SGR 39 / 49)
//! "236"      256-color palette index (SGR 38;5;n / 48;5;n)
//! "#ff8800"  true color (SGR 38;2;r;g;b / 48;2;r;g;b)
//! "#f80"     short true color
//! ```

use crate::error::ColorParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// True-color RGB representation.
///
/// Uses 3 bytes for 24-bit color depth.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Parse the digits of a `#rrggbb` or `#rgb` color (without the `#`).
    fn from_hex_digits(digits: &str) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_u32),
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|n| n * 17);
                Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

/// A terminal color.
///
/// Fits in 4 bytes so a [`Cell`](crate::buffer::Cell) stays 16 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// The terminal's default color.
    #[default]
    Reset,
    /// An entry of the 256-color palette.
    Indexed(u8),
    /// A 24-bit color.
    Rgb(Rgb),
}

impl Color {
    /// Default segment foreground: light gray.
    pub const SEGMENT_FG: Self = Self::Indexed(252);
    /// Default segment background: neutral dark gray.
    pub const SEGMENT_BG: Self = Self::Indexed(236);

    /// Parse a color identifier. Equivalent to [`str::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] if `s` is neither empty, a palette index
    /// in `0..=255`, nor a `#rrggbb` / `#rgb` hex color.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        s.parse()
    }

    /// Write the SGR parameters selecting this color as foreground.
    pub(crate) fn write_fg_sgr(self, out: &mut String) {
        use fmt::Write;
        let _ = match self {
            Self::Reset => write!(out, "39"),
            Self::Indexed(n) => write!(out, "38;5;{n}"),
            Self::Rgb(c) => write!(out, "38;2;{};{};{}", c.r, c.g, c.b),
        };
    }

    /// Write the SGR parameters selecting this color as background.
    pub(crate) fn write_bg_sgr(self, out: &mut String) {
        use fmt::Write;
        let _ = match self {
            Self::Reset => write!(out, "49"),
            Self::Indexed(n) => write!(out, "48;5;{n}"),
            Self::Rgb(c) => write!(out, "48;2;{};{};{}", c.r, c.g, c.b),
        };
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::Reset);
        }
        if let Some(digits) = trimmed.strip_prefix('#') {
            return Rgb::from_hex_digits(digits)
                .map(Self::Rgb)
                .ok_or_else(|| ColorParseError::new(s));
        }
        trimmed
            .parse::<u8>()
            .map(Self::Indexed)
            .map_err(|_| ColorParseError::new(s))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<u8> for Color {
    #[inline]
    fn from(index: u8) -> Self {
        Self::Indexed(index)
    }
}

impl From<Rgb> for Color {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => Ok(()),
            Self::Indexed(n) => write!(f, "{n}"),
            Self::Rgb(c) => write!(f, "#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("Reset"),
            Self::Indexed(n) => write!(f, "Indexed({n})"),
            Self::Rgb(c) => write!(f, "{c:?}"),
        }
    }
}
