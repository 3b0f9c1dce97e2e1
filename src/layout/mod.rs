//! Layout module: Screen geometry for placing widgets.

mod rect;

pub use rect::Rect;
