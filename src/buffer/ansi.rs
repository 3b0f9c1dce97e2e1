//! ANSI serialisation: Turn a [`Buffer`] into styled text.
//!
//! Rows are written top to bottom and joined with `\n`. Within a row the
//! writer tracks the SGR state it has emitted and only writes the
//! parameters that change between cells:
//! 1. Removing a modifier forces a full reset (`\x1b[0m`)
//! 2. Colors and added modifiers are merged into a single SGR sequence
//! 3. A row that changed the state ends with a reset
//!
//! [`visible_width`] measures styled text the way a terminal displays it.

use super::Buffer;
use crate::style::{Modifiers, Style};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Tracks the SGR attributes the terminal is assumed to be using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SgrState {
    style: Style,
}

impl SgrState {
    const fn new() -> Self {
        Self { style: Style::RESET }
    }

    /// Emit whatever is needed to switch from the current style to `next`.
    fn transition(&mut self, next: Style, out: &mut String) {
        if self.style == next {
            return;
        }

        if !self.style.modifiers.difference(next.modifiers).is_empty() {
            out.push_str("\x1b[0m");
            self.style = Style::RESET;
            if next == Style::RESET {
                return;
            }
        }

        let mut params = String::new();
        if self.style.fg != next.fg {
            next.fg.write_fg_sgr(&mut params);
        }
        if self.style.bg != next.bg {
            push_separator(&mut params);
            next.bg.write_bg_sgr(&mut params);
        }
        let added = next.modifiers.difference(self.style.modifiers);
        for (flag, code) in Modifiers::SGR_CODES {
            if added.contains(flag) {
                push_separator(&mut params);
                let _ = write!(params, "{code}");
            }
        }

        if !params.is_empty() {
            let _ = write!(out, "\x1b[{params}m");
        }
        self.style = next;
    }

    fn finish_row(&mut self, out: &mut String) {
        if self.style != Style::RESET {
            out.push_str("\x1b[0m");
            self.style = Style::RESET;
        }
    }
}

fn push_separator(params: &mut String) {
    if !params.is_empty() {
        params.push(';');
    }
}

/// Serialise a buffer into a styled string.
pub fn to_ansi(buffer: &Buffer) -> String {
    let mut out = String::with_capacity(buffer.len() * 2);
    write_ansi(buffer, &mut out);
    out
}

/// Append the styled rows of `buffer` to `out`.
pub fn write_ansi(buffer: &Buffer, out: &mut String) {
    let mut state = SgrState::new();
    for y in 0..buffer.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..buffer.width() {
            let Some(cell) = buffer.get(x, y) else {
                continue;
            };
            if cell.is_wide_continuation() {
                continue;
            }
            state.transition(cell.style(), out);
            out.push_str(buffer.grapheme_of(cell).unwrap_or("\u{FFFD}"));
        }
        state.finish_row(out);
    }
}

/// Remove escape sequences from styled text.
///
/// Handles CSI sequences (`ESC [ ... final`), OSC sequences terminated by
/// BEL or `ESC \`, and two-byte escapes.
pub fn strip_ansi(s: &str) -> String {
    let mut plain = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            plain.push(c);
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    plain
}

/// Display width of styled text: the widest line, escape sequences ignored.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    fn gray() -> Style {
        Style::new(Color::Indexed(252), Color::Indexed(236))
    }

    #[test]
    fn test_neutral_buffer_has_no_escapes() {
        let mut buffer = Buffer::new(5, 2);
        buffer.write_line(0, 0, "hi", Style::RESET, 5);
        assert_eq!(to_ansi(&buffer), "hi   \n     ");
    }

    #[test]
    fn test_style_emitted_once_per_run() {
        let mut buffer = Buffer::filled(4, 1, gray());
        buffer.write_line(0, 0, " ok", gray(), 4);
        assert_eq!(to_ansi(&buffer), "\x1b[38;5;252;48;5;236m ok \x1b[0m");
    }

    #[test]
    fn test_switch_back_to_default_colors() {
        let mut buffer = Buffer::filled(2, 1, gray());
        buffer.set_grapheme(1, 0, "x", Style::RESET);
        assert_eq!(to_ansi(&buffer), "\x1b[38;5;252;48;5;236m \x1b[39;49mx");
    }

    #[test]
    fn test_removed_modifier_forces_reset() {
        let bold = gray().with_modifiers(Modifiers::BOLD);
        let mut buffer = Buffer::filled(2, 1, bold);
        buffer.set_grapheme(1, 0, "x", gray());
        assert_eq!(
            to_ansi(&buffer),
            "\x1b[38;5;252;48;5;236;1m \x1b[0m\x1b[38;5;252;48;5;236mx\x1b[0m"
        );
    }

    #[test]
    fn test_wide_continuation_skipped() {
        let mut buffer = Buffer::new(3, 1);
        buffer.write_line(0, 0, "日a", Style::RESET, 3);
        assert_eq!(to_ansi(&buffer), "日a");
    }

    #[test]
    fn test_strip_and_measure() {
        let styled = "\x1b[38;5;252m abc\x1b[0m\n\x1b]0;title\x07xy";
        assert_eq!(strip_ansi(styled), " abc\nxy");
        assert_eq!(visible_width(styled), 4);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn test_terminal_sees_the_same_cells() {
        let mut buffer = Buffer::filled(6, 1, gray());
        buffer.write_line(1, 0, "日本", gray(), 5);

        let mut parser = vt100::Parser::new(1, 10, 0);
        parser.process(to_ansi(&buffer).as_bytes());
        let screen = parser.screen();

        assert_eq!(screen.cell(0, 1).unwrap().contents(), "日");
        assert!(screen.cell(0, 1).unwrap().is_wide());
        assert_eq!(screen.cell(0, 3).unwrap().contents(), "本");
        let cell = screen.cell(0, 0).unwrap();
        assert_eq!(cell.bgcolor(), vt100::Color::Idx(236));
        assert_eq!(cell.fgcolor(), vt100::Color::Idx(252));
        assert_eq!(screen.cell(0, 5).unwrap().bgcolor(), vt100::Color::Idx(236));
        assert_eq!(screen.cell(0, 6).unwrap().bgcolor(), vt100::Color::Default);
    }
}
