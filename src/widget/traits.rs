//! Widget trait: How hosts drive the components of this crate.

use crate::buffer::Buffer;
use crate::event::InputEvent;
use crate::layout::Rect;

/// A UI component that can be drawn into a host frame and receive events.
pub trait Widget {
    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect;

    /// Set the bounds of this widget.
    ///
    /// Called when the host layout changes (e.g., terminal resize).
    fn set_bounds(&mut self, bounds: Rect);

    /// Draw this widget into `frame` at its bounds.
    ///
    /// Cells falling outside the frame are clipped.
    fn render(&self, frame: &mut Buffer);

    /// Handle an input event.
    ///
    /// Returns `true` if the event was consumed by this widget,
    /// `false` if it should propagate to other widgets.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Check if this widget needs to be redrawn.
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after rendering.
    fn clear_redraw(&mut self);
}
