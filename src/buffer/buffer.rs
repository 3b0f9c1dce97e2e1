//! Buffer: A fixed-size grid of styled cells.
//!
//! Every rendered piece of the bar (a segment, the filler, the composed bar,
//! a host frame) is a `Buffer`. Cells are stored in row-major order.

use super::cell::Cell;
use crate::style::Style;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A grid of cells.
///
/// Access is in row-major order: `index = y * width + x`. Zero-sized
/// buffers are allowed (an empty filler is `0 x height`).
///
/// # Overflow Storage
///
/// Graphemes longer than 4 bytes live in a separate `HashMap`; the cell
/// holds an index into it while its `OVERFLOW` flag is set.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
    /// Overflow storage for complex graphemes.
    overflow: HashMap<u32, String>,
    /// Next overflow index to assign.
    next_overflow_index: u32,
}

impl Buffer {
    /// Create a buffer of neutral blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Style::RESET)
    }

    /// Create a buffer of blank cells painted with `style`.
    pub fn filled(width: u16, height: u16, style: Style) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::blank(style); size],
            width,
            height,
            overflow: HashMap::new(),
            next_overflow_index: 0,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Set a grapheme at (x, y), handling overflow automatically.
    ///
    /// For wide characters this also sets a continuation cell at (x+1, y).
    ///
    /// Returns the display width of the grapheme, or 0 if out of bounds.
    pub fn set_grapheme(&mut self, x: u16, y: u16, grapheme: &str, style: Style) -> u8 {
        let Some(idx) = self.index_of(x, y) else {
            return 0;
        };

        let cell = match Cell::from_grapheme(grapheme, style) {
            Some(cell) => cell,
            None => {
                let width = u8::try_from(grapheme.width()).unwrap_or(2);
                Cell::overflow(self.store_overflow(grapheme.to_string()), width, style)
            }
        };
        let width = cell.display_width();
        self.cells[idx] = cell;

        if width == 2 {
            if let Some(next_idx) = x.checked_add(1).and_then(|nx| self.index_of(nx, y)) {
                self.cells[next_idx] = Cell::wide_continuation(style);
            }
        }

        width
    }

    /// Get the grapheme at (x, y), including overflow lookup.
    ///
    /// Returns `None` if out of bounds or if it's a continuation cell.
    pub fn get_grapheme(&self, x: u16, y: u16) -> Option<&str> {
        let cell = self.get(x, y)?;
        self.grapheme_of(cell)
    }

    /// Resolve the grapheme of a cell that belongs to this buffer.
    pub fn grapheme_of<'a>(&'a self, cell: &'a Cell) -> Option<&'a str> {
        if cell.is_wide_continuation() {
            return None;
        }
        match cell.overflow_index() {
            Some(idx) => self.overflow.get(&idx).map(String::as_str),
            None => cell.grapheme(),
        }
    }

    /// Write a single line of text starting at (x, y), clipped to `max_width` columns.
    ///
    /// Tabs expand to [`TAB_WIDTH`](Self::TAB_WIDTH) spaces and control
    /// characters are dropped. A wide grapheme that would straddle the clip
    /// edge is not drawn.
    ///
    /// Returns the number of columns written.
    pub fn write_line(&mut self, x: u16, y: u16, text: &str, style: Style, max_width: u16) -> u16 {
        let mut col: u16 = 0;
        for grapheme in text.graphemes(true) {
            if grapheme == "\t" {
                for _ in 0..Self::TAB_WIDTH {
                    if col >= max_width {
                        return col;
                    }
                    self.set_grapheme(x.saturating_add(col), y, " ", style);
                    col += 1;
                }
                continue;
            }
            if grapheme.chars().any(char::is_control) {
                continue;
            }
            let width = u16::try_from(grapheme.width()).unwrap_or(u16::MAX);
            if width == 0 {
                continue;
            }
            if col.saturating_add(width) > max_width {
                break;
            }
            self.set_grapheme(x.saturating_add(col), y, grapheme, style);
            col += width;
        }
        col
    }

    /// Columns a tab expands to.
    pub const TAB_WIDTH: u16 = 4;

    /// Fill a rectangular region with a cell.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                if let Some(idx) = self.index_of(col, row) {
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Copy `src` into this buffer with its top-left corner at (x, y).
    ///
    /// Cells falling outside this buffer are clipped. Overflow graphemes are
    /// re-registered in this buffer's storage.
    pub fn blit(&mut self, src: &Self, x: u16, y: u16) {
        for sy in 0..src.height {
            let Some(dy) = y.checked_add(sy).filter(|&dy| dy < self.height) else {
                break;
            };
            for sx in 0..src.width {
                let Some(dx) = x.checked_add(sx).filter(|&dx| dx < self.width) else {
                    break;
                };
                let mut cell = src.cells[(sy as usize) * (src.width as usize) + (sx as usize)];
                if let Some(grapheme) = cell.overflow_index().and_then(|i| src.overflow.get(&i)) {
                    let idx = self.store_overflow(grapheme.clone());
                    cell.set_overflow_index(idx);
                }
                self.set(dx, dy, cell);
            }
        }
    }

    /// Place buffers side by side, rows aligned at the top.
    ///
    /// The result is as tall as the tallest part; shorter parts are padded
    /// with neutral blanks.
    pub fn join_horizontal(parts: &[Self]) -> Self {
        let width = parts.iter().fold(0u16, |acc, p| acc.saturating_add(p.width));
        let height = parts.iter().map(|p| p.height).max().unwrap_or(0);

        let mut joined = Self::new(width, height);
        let mut x = 0u16;
        for part in parts {
            joined.blit(part, x, 0);
            x = x.saturating_add(part.width);
        }
        joined
    }

    /// Clear the entire buffer (fill with neutral blanks).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.overflow.clear();
        self.next_overflow_index = 0;
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics; a zero-width buffer has no cells to yield anyway.
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    /// The text of each row without styling.
    pub fn to_lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height as usize];
        }
        self.rows()
            .map(|row| row.iter().filter_map(|cell| self.grapheme_of(cell)).collect())
            .collect()
    }

    fn store_overflow(&mut self, grapheme: String) -> u32 {
        let idx = self.next_overflow_index;
        self.next_overflow_index += 1;
        self.overflow.insert(idx, grapheme);
        idx
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("overflow_count", &self.overflow.len())
            .finish()
    }
}
