//! Buffer module: The rendered form of everything the bar draws.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of display, 16 bytes
//! - [`Buffer`]: A fixed-size grid of cells (a segment box, the filler, the whole bar)
//! - [`ansi`]: Serialisation of a buffer into SGR-styled text

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod ansi;

pub use cell::{Cell, CellFlags};
pub use buffer::Buffer;
