//! Widgets: The status bar and the pieces it is built from.
//!
//! # Architecture
//!
//! A [`StatusBar`] owns [`Segment`]s in two ordered partitions. Each segment
//! renders itself into a fixed-size [`Buffer`](crate::Buffer) box; the bar
//! joins the left boxes, a neutral filler, and the right boxes side by side.
//!
//! # Example
//!
//! ```rust,ignore
//! use segbar::{BarOptions, StatusBar};
//!
//! let mut bar = StatusBar::new(&BarOptions::default().with_width(30))?;
//! bar.add_left(10, "Status: OK");
//! let clock = bar.add_right(12, "11:45 AM");
//! bar.set_tag(clock, "clock")?;
//!
//! bar.get_tag_mut("clock").unwrap().set_text("11:46 AM");
//! print!("{}", bar.render());
//! ```

mod segment;
mod status_bar;
mod traits;

pub use segment::Segment;
pub use status_bar::{Partition, SegmentId, StatusBar};
pub use traits::Widget;
