//! # Segbar
//!
//! A segmented status bar for terminal applications.
//!
//! The bar is a single horizontal strip built from fixed-width, colored
//! segments anchored to its left and right edges, with neutral filler in
//! between. The host owns the terminal and the event loop; the bar turns its
//! segments into styled text on demand.
//!
//! ## Core Concepts
//!
//! - **Segments**: Fixed-width boxes of text; long text is clipped, short text padded
//! - **Partitions**: Left segments draw from the left edge, right segments against the right edge
//! - **Tags**: Optional names for looking a segment up without tracking its position
//! - **Overflow**: Segments never shrink; an over-full bar renders wider than requested
//!
//! ## Example
//!
//! ```rust,ignore
//! use segbar::{BarOptions, StatusBar};
//!
//! let mut bar = StatusBar::new(&BarOptions::default().with_width(30))?;
//! bar.add_left(10, "Status: OK");
//! bar.add_right(12, "11:45 AM");
//!
//! // " Status: O" + 8 columns of filler + " 11:45 AM   "
//! println!("{}", bar.render());
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod style;
pub mod widget;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, CellFlags};
pub use config::{BarOptions, SegmentConfig, TagPolicy};
pub use error::{BarError, ColorParseError, ConfigError, Result};
pub use event::{InputEvent, KeyCode, KeyModifiers};
pub use layout::Rect;
pub use style::{Color, Modifiers, Rgb, Style};
pub use widget::{Partition, Segment, SegmentId, StatusBar, Widget};
