//! Status Bar Widget: Left- and right-anchored segments with filler between.
//!
//! The bar owns two ordered partitions of [`Segment`]s. Rendering lays the
//! left partition out from the left edge, the right partition against the
//! right edge, and pads the gap with neutral filler:
//!
//! ```text
//! ┌──────────┬──────────┬────────────────────────┬────────────┐
//! │ left[0]  │ left[1]  │        filler          │  right[0]  │
//! └──────────┴──────────┴────────────────────────┴────────────┘
//! ```
//!
//! Segments never shrink: when the partitions are wider than the bar the
//! filler collapses to zero columns and the output is wider than requested.
//!
//! Segments are addressed by position or by [`SegmentId`] handle, and
//! optionally by tag. The tag index is maintained by the bar itself, so a
//! removed segment can never be found through its old tag.

use super::segment::Segment;
use super::traits::Widget;
use crate::buffer::{ansi, Buffer};
use crate::config::{BarOptions, SegmentConfig, TagPolicy};
use crate::error::{BarError, Result};
use crate::event::InputEvent;
use crate::layout::Rect;
use crate::style::Color;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// Stable handle to a segment owned by a [`StatusBar`].
///
/// Handles stay valid while other segments are added or removed, and become
/// stale once their own segment is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SegmentId(u32);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the bar a segment is anchored to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Partition {
    /// Drawn from the left edge, in insertion order.
    Left,
    /// Drawn against the right edge; the last segment touches the edge.
    Right,
}

/// A horizontal status bar of fixed-width segments.
#[derive(Debug, Clone)]
pub struct StatusBar {
    segments: HashMap<SegmentId, Segment>,
    left: Vec<SegmentId>,
    right: Vec<SegmentId>,
    /// One entry per tag currently held by a segment in either partition.
    tags: HashMap<String, SegmentId>,
    /// Position on the host screen; width and height are the render target.
    bounds: Rect,
    default_fg: Color,
    default_bg: Color,
    tag_policy: TagPolicy,
    next_id: u32,
    dirty: bool,
}

impl StatusBar {
    /// Build a bar from options.
    ///
    /// Pre-allocated blank segments come first in each partition, followed
    /// by the declared ones.
    ///
    /// # Errors
    ///
    /// Returns [`BarError::Config`] if the options are invalid, and
    /// [`BarError::DuplicateTag`] if declared segments repeat a tag under
    /// [`TagPolicy::Reject`].
    pub fn new(options: &BarOptions) -> Result<Self> {
        options.validate()?;

        let mut bar = Self::empty(options);
        for partition in [Partition::Left, Partition::Right] {
            let (count, declared) = match partition {
                Partition::Left => (options.left_count, &options.left),
                Partition::Right => (options.right_count, &options.right),
            };
            for _ in 0..count {
                bar.add(partition, options.segment_width, "");
            }
            for config in declared {
                bar.add_configured(partition, config)?;
            }
        }
        Ok(bar)
    }

    fn empty(options: &BarOptions) -> Self {
        Self {
            segments: HashMap::new(),
            left: Vec::new(),
            right: Vec::new(),
            tags: HashMap::new(),
            bounds: Rect::from_size(options.width, options.height),
            default_fg: options.foreground,
            default_bg: options.background,
            tag_policy: options.tag_policy,
            next_id: 0,
            dirty: true,
        }
    }

    fn add_configured(&mut self, partition: Partition, config: &SegmentConfig) -> Result<SegmentId> {
        let id = self.add(partition, config.width, config.text.clone());
        if let Some(segment) = self.segments.get_mut(&id) {
            segment.set_colors(
                config.foreground.unwrap_or(self.default_fg),
                config.background.unwrap_or(self.default_bg),
            );
        }
        if let Some(tag) = &config.tag {
            self.set_tag(id, tag.clone())?;
        }
        Ok(id)
    }

    // ── Registry ────────────────────────────────────────────────────────

    /// Append a segment to the left partition.
    pub fn add_left(&mut self, width: u16, text: impl Into<String>) -> SegmentId {
        self.add(Partition::Left, width, text)
    }

    /// Append a segment to the right partition.
    pub fn add_right(&mut self, width: u16, text: impl Into<String>) -> SegmentId {
        self.add(Partition::Right, width, text)
    }

    /// Append a segment with the bar's default colors to a partition.
    pub fn add(&mut self, partition: Partition, width: u16, text: impl Into<String>) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;

        let segment = Segment::new(width, text).with_colors(self.default_fg, self.default_bg);
        self.segments.insert(id, segment);
        self.list_mut(partition).push(id);
        self.dirty = true;

        debug!(%id, ?partition, width, "segment added");
        id
    }

    /// Remove the left segment at `index`. Out-of-range indices are ignored.
    pub fn remove_left(&mut self, index: usize) -> Option<Segment> {
        self.remove(Partition::Left, index)
    }

    /// Remove the right segment at `index`. Out-of-range indices are ignored.
    pub fn remove_right(&mut self, index: usize) -> Option<Segment> {
        self.remove(Partition::Right, index)
    }

    /// Remove the segment at `index` of a partition, dropping its tag.
    ///
    /// Returns the detached (untagged) segment, or `None` if `index` is out
    /// of range.
    pub fn remove(&mut self, partition: Partition, index: usize) -> Option<Segment> {
        let list = self.list_mut(partition);
        if index >= list.len() {
            return None;
        }
        let id = list.remove(index);
        let mut segment = self.segments.remove(&id)?;
        if let Some(tag) = segment.take_tag() {
            self.unindex(&tag, id);
        }
        self.dirty = true;

        debug!(%id, ?partition, index, "segment removed");
        Some(segment)
    }

    /// Get the left segment at `index`.
    pub fn get_left(&self, index: usize) -> Option<&Segment> {
        self.get(Partition::Left, index)
    }

    /// Get the right segment at `index`.
    pub fn get_right(&self, index: usize) -> Option<&Segment> {
        self.get(Partition::Right, index)
    }

    /// Get the left segment at `index` for mutation.
    pub fn get_left_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.get_mut(Partition::Left, index)
    }

    /// Get the right segment at `index` for mutation.
    pub fn get_right_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.get_mut(Partition::Right, index)
    }

    /// Get the segment at `index` of a partition.
    pub fn get(&self, partition: Partition, index: usize) -> Option<&Segment> {
        let id = self.id_at(partition, index)?;
        self.segments.get(&id)
    }

    /// Get the segment at `index` of a partition for mutation.
    pub fn get_mut(&mut self, partition: Partition, index: usize) -> Option<&mut Segment> {
        let id = self.id_at(partition, index)?;
        self.segment_mut(id)
    }

    /// Handle of the segment at `index` of a partition.
    pub fn id_at(&self, partition: Partition, index: usize) -> Option<SegmentId> {
        self.list(partition).get(index).copied()
    }

    /// Look a segment up by handle.
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    /// Look a segment up by handle for mutation.
    pub fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        let segment = self.segments.get_mut(&id)?;
        self.dirty = true;
        Some(segment)
    }

    /// The partition holding `id`, if it is still in the bar.
    pub fn partition_of(&self, id: SegmentId) -> Option<Partition> {
        if self.left.contains(&id) {
            Some(Partition::Left)
        } else if self.right.contains(&id) {
            Some(Partition::Right)
        } else {
            None
        }
    }

    /// Number of left segments.
    pub fn left_len(&self) -> usize {
        self.left.len()
    }

    /// Number of right segments.
    pub fn right_len(&self) -> usize {
        self.right.len()
    }

    /// Number of segments in both partitions.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the bar holds no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Left segments in display order.
    pub fn left_segments(&self) -> impl Iterator<Item = &Segment> {
        self.left.iter().filter_map(|id| self.segments.get(id))
    }

    /// Right segments in display order.
    pub fn right_segments(&self) -> impl Iterator<Item = &Segment> {
        self.right.iter().filter_map(|id| self.segments.get(id))
    }

    // ── Tag index ───────────────────────────────────────────────────────

    /// Register `tag` for the segment `id`.
    ///
    /// An empty tag removes the segment's current tag. A segment holds at
    /// most one tag, so re-tagging drops the previous one. If another segment
    /// holds `tag`, the bar's [`TagPolicy`] decides: under `Overwrite` the
    /// other segment loses the tag and its handle is returned.
    ///
    /// # Errors
    ///
    /// Returns [`BarError::UnknownSegment`] for a stale handle and
    /// [`BarError::DuplicateTag`] when `tag` is taken under
    /// [`TagPolicy::Reject`].
    pub fn set_tag(&mut self, id: SegmentId, tag: impl Into<String>) -> Result<Option<SegmentId>> {
        let tag = tag.into();
        if !self.segments.contains_key(&id) {
            return Err(BarError::UnknownSegment(id));
        }

        let displaced = match self.tags.get(&tag).copied() {
            Some(holder) if holder == id => return Ok(None),
            Some(holder) if !tag.is_empty() => {
                if self.tag_policy == TagPolicy::Reject {
                    return Err(BarError::DuplicateTag { tag });
                }
                warn!(%tag, from = %holder, to = %id, "tag re-registered; previous segment untagged");
                if let Some(previous) = self.segments.get_mut(&holder) {
                    previous.take_tag();
                }
                Some(holder)
            }
            _ => None,
        };

        if let Some(segment) = self.segments.get_mut(&id) {
            if let Some(old) = segment.take_tag() {
                if self.tags.get(&old) == Some(&id) {
                    self.tags.remove(&old);
                }
            }
            if !tag.is_empty() {
                segment.set_tag(tag.clone());
                debug!(%id, %tag, "tag registered");
                self.tags.insert(tag, id);
            }
        }

        Ok(displaced)
    }

    /// Look a segment up by tag.
    pub fn get_tag(&self, tag: &str) -> Option<&Segment> {
        self.segments.get(self.tags.get(tag)?)
    }

    /// Look a segment up by tag for mutation.
    pub fn get_tag_mut(&mut self, tag: &str) -> Option<&mut Segment> {
        let id = self.tag_id(tag)?;
        self.segment_mut(id)
    }

    /// Handle of the segment holding `tag`.
    pub fn tag_id(&self, tag: &str) -> Option<SegmentId> {
        self.tags.get(tag).copied()
    }

    fn unindex(&mut self, tag: &str, id: SegmentId) {
        if self.tags.get(tag) == Some(&id) {
            self.tags.remove(tag);
        }
    }

    // ── Geometry ────────────────────────────────────────────────────────

    /// Set the target render width.
    pub fn set_width(&mut self, width: u16) {
        if self.bounds.width != width {
            self.bounds.width = width;
            self.dirty = true;
        }
    }

    /// Set the target render height.
    pub fn set_height(&mut self, height: u16) {
        if self.bounds.height != height {
            self.bounds.height = height;
            self.dirty = true;
        }
    }

    /// Target render width.
    pub const fn width(&self) -> u16 {
        self.bounds.width
    }

    /// Target render height.
    pub const fn height(&self) -> u16 {
        self.bounds.height
    }

    /// Columns taken by the left partition.
    pub fn left_width(&self) -> u16 {
        sum_widths(self.left_segments())
    }

    /// Columns taken by the right partition.
    pub fn right_width(&self) -> u16 {
        sum_widths(self.right_segments())
    }

    /// Columns of filler between the partitions; zero when they overflow.
    pub fn filler_width(&self) -> u16 {
        self.bounds
            .width
            .saturating_sub(self.left_width())
            .saturating_sub(self.right_width())
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Compose left segments, filler, and right segments into one buffer.
    ///
    /// The result is `height` rows tall and `width` columns wide unless the
    /// partitions alone are wider, in which case it is exactly as wide as
    /// the partitions.
    pub fn render_buffer(&self) -> Buffer {
        let height = self.bounds.height;
        let left = render_partition(self.left_segments(), height);
        let right = render_partition(self.right_segments(), height);
        let filler_width = self
            .bounds
            .width
            .saturating_sub(left.width())
            .saturating_sub(right.width());

        trace!(
            left = left.width(),
            filler = filler_width,
            right = right.width(),
            height,
            "rendering status bar"
        );

        let filler = Buffer::new(filler_width, height);
        Buffer::join_horizontal(&[left, filler, right])
    }

    /// Render the bar as styled text, one line per row.
    pub fn render(&self) -> String {
        ansi::to_ansi(&self.render_buffer())
    }

    fn list(&self, partition: Partition) -> &[SegmentId] {
        match partition {
            Partition::Left => &self.left,
            Partition::Right => &self.right,
        }
    }

    fn list_mut(&mut self, partition: Partition) -> &mut Vec<SegmentId> {
        match partition {
            Partition::Left => &mut self.left,
            Partition::Right => &mut self.right,
        }
    }
}

impl Default for StatusBar {
    /// A 100 x 1 bar with no segments.
    fn default() -> Self {
        Self::empty(&BarOptions::default())
    }
}

fn sum_widths<'a>(segments: impl Iterator<Item = &'a Segment>) -> u16 {
    segments.fold(0u16, |acc, s| acc.saturating_add(s.width()))
}

fn render_partition<'a>(segments: impl Iterator<Item = &'a Segment>, height: u16) -> Buffer {
    let parts: Vec<Buffer> = segments.map(|s| s.render(height)).collect();
    Buffer::join_horizontal(&parts)
}

impl Widget for StatusBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }
    }

    fn render(&self, frame: &mut Buffer) {
        frame.blit(&self.render_buffer(), self.bounds.x, self.bounds.y);
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        // Only resizes concern the bar; keys belong to the host.
        if let InputEvent::Resize { width, .. } = event {
            self.set_width(*width);
        }
        false
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ansi::visible_width;
    use crate::error::ConfigError;
    use crate::event::KeyCode;
    use pretty_assertions::assert_eq;

    fn bar(width: u16) -> StatusBar {
        StatusBar::new(&BarOptions::default().with_width(width)).unwrap()
    }

    fn screen(bar: &StatusBar, cols: u16) -> vt100::Parser {
        let mut parser = vt100::Parser::new(bar.height(), cols, 0);
        parser.process(bar.render().replace('\n', "\r\n").as_bytes());
        parser
    }

    #[test]
    fn test_add_then_get_last() {
        let mut bar = bar(80);
        bar.add_left(5, "a");
        let id = bar.add_left(7, "b");
        let last = bar.get_left(bar.left_len() - 1).unwrap();
        assert_eq!(last.text(), "b");
        assert_eq!(last.width(), 7);
        assert_eq!(bar.id_at(Partition::Left, 1), Some(id));
        assert_eq!(bar.partition_of(id), Some(Partition::Left));
    }

    #[test]
    fn test_new_segments_use_default_colors() {
        let mut bar = bar(80);
        bar.add_right(4, "x");
        let seg = bar.get_right(0).unwrap();
        assert_eq!(seg.fg(), Color::Indexed(252));
        assert_eq!(seg.bg(), Color::Indexed(236));
    }

    #[test]
    fn test_out_of_range_is_silent() {
        let mut bar = bar(80);
        bar.add_left(5, "a");
        assert!(bar.remove_left(3).is_none());
        assert!(bar.remove_right(0).is_none());
        assert!(bar.get_left(1).is_none());
        assert!(bar.get_right_mut(0).is_none());
        assert_eq!(bar.left_len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut bar = bar(80);
        for text in ["a", "b", "c"] {
            bar.add_left(3, text);
        }
        let removed = bar.remove_left(1).unwrap();
        assert_eq!(removed.text(), "b");
        let texts: Vec<&str> = bar.left_segments().map(Segment::text).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_only_right_segment() {
        let mut bar = bar(80);
        bar.add_right(12, "11:45 AM");
        bar.remove_right(0);
        assert!(bar.get_right(0).is_none());
        assert!(bar.is_empty());
    }

    #[test]
    fn test_handles_survive_other_removals() {
        let mut bar = bar(80);
        bar.add_left(3, "a");
        let b = bar.add_left(3, "b");
        bar.remove_left(0);
        assert_eq!(bar.segment(b).unwrap().text(), "b");
        bar.remove_left(0);
        assert!(bar.segment(b).is_none());
        assert!(matches!(bar.set_tag(b, "x"), Err(BarError::UnknownSegment(id)) if id == b));
    }

    #[test]
    fn test_mutate_through_handle() {
        let mut bar = bar(80);
        let id = bar.add_left(10, "");
        let seg = bar.segment_mut(id).unwrap();
        seg.set_text("NORMAL");
        seg.set_colors(0u8, 214u8);
        assert_eq!(bar.get_left(0).unwrap().text(), "NORMAL");
        assert_eq!(bar.get_left(0).unwrap().bg(), Color::Indexed(214));
    }

    #[test]
    fn test_tag_lookup() {
        let mut bar = bar(80);
        let id = bar.add_right(12, "11:45 AM");
        assert_eq!(bar.set_tag(id, "clock").unwrap(), None);
        assert_eq!(bar.get_tag("clock").unwrap().text(), "11:45 AM");
        assert_eq!(bar.get_tag("clock").unwrap().tag(), Some("clock"));
        assert_eq!(bar.tag_id("clock"), Some(id));
        assert!(bar.get_tag("missing").is_none());

        bar.get_tag_mut("clock").unwrap().set_text("11:46 AM");
        assert_eq!(bar.get_right(0).unwrap().text(), "11:46 AM");
    }

    #[test]
    fn test_tag_mutation_keeps_tag_and_position() {
        let mut bar = bar(80);
        bar.add_left(3, "a");
        let id = bar.add_left(3, "b");
        bar.set_tag(id, "mode").unwrap();

        let seg = bar.get_tag_mut("mode").unwrap();
        seg.set_text("INSERT");
        seg.set_colors(Color::Reset, 28u8);
        seg.set_width(8);

        assert_eq!(bar.get_left(1).unwrap().text(), "INSERT");
        assert_eq!(bar.get_left(1).unwrap().tag(), Some("mode"));
        assert_eq!(bar.tag_id("mode"), Some(id));
    }

    #[test]
    fn test_remove_drops_tag() {
        let mut bar = bar(80);
        let id = bar.add_left(10, "mode");
        bar.set_tag(id, "mode").unwrap();
        let removed = bar.remove_left(0).unwrap();
        assert!(bar.get_tag("mode").is_none());
        assert_eq!(removed.tag(), None);
    }

    #[test]
    fn test_tag_overwrite_last_writer_wins() {
        let mut bar = bar(80);
        let first = bar.add_left(5, "first");
        let second = bar.add_right(5, "second");
        bar.set_tag(first, "status").unwrap();
        assert_eq!(bar.set_tag(second, "status").unwrap(), Some(first));

        assert_eq!(bar.get_tag("status").unwrap().text(), "second");
        assert_eq!(bar.segment(first).unwrap().tag(), None);

        // Removing the displaced segment must not unregister the new holder.
        bar.remove_left(0);
        assert_eq!(bar.tag_id("status"), Some(second));
    }

    #[test]
    fn test_tag_reject_policy() {
        let options = BarOptions::default().with_tag_policy(TagPolicy::Reject);
        let mut bar = StatusBar::new(&options).unwrap();
        let first = bar.add_left(5, "first");
        let second = bar.add_left(5, "second");
        bar.set_tag(first, "status").unwrap();

        let err = bar.set_tag(second, "status").unwrap_err();
        assert!(matches!(err, BarError::DuplicateTag { ref tag } if tag == "status"));
        assert_eq!(bar.tag_id("status"), Some(first));
        assert_eq!(bar.segment(second).unwrap().tag(), None);
    }

    #[test]
    fn test_retag_and_untag() {
        let mut bar = bar(80);
        let id = bar.add_left(5, "x");
        bar.set_tag(id, "old").unwrap();
        bar.set_tag(id, "new").unwrap();
        assert!(bar.get_tag("old").is_none());
        assert_eq!(bar.tag_id("new"), Some(id));

        assert_eq!(bar.set_tag(id, "new").unwrap(), None);
        bar.set_tag(id, "").unwrap();
        assert!(bar.get_tag("new").is_none());
        assert_eq!(bar.segment(id).unwrap().tag(), None);
    }

    #[test]
    fn test_geometry_setters_idempotent() {
        let mut bar = bar(80);
        bar.set_width(60);
        bar.set_height(2);
        bar.clear_redraw();

        bar.set_width(60);
        bar.set_height(2);
        assert_eq!(bar.width(), 60);
        assert_eq!(bar.height(), 2);
        assert!(!bar.needs_redraw());
    }

    #[test]
    fn test_scenario_status_and_clock() {
        let mut bar = bar(30);
        bar.add_left(10, "Status: OK");
        bar.add_right(12, "11:45 AM");

        assert_eq!(bar.left_width(), 10);
        assert_eq!(bar.right_width(), 12);
        assert_eq!(bar.filler_width(), 8);

        let buffer = bar.render_buffer();
        assert_eq!(buffer.width(), 30);
        assert_eq!(buffer.height(), 1);
        assert_eq!(buffer.to_lines(), vec![" Status: O         11:45 AM   "]);
        assert_eq!(visible_width(&bar.render()), 30);

        let parser = screen(&bar, 40);
        let screen = parser.screen();
        assert_eq!(screen.cell(0, 9).unwrap().bgcolor(), vt100::Color::Idx(236));
        assert_eq!(screen.cell(0, 10).unwrap().bgcolor(), vt100::Color::Default);
        assert_eq!(screen.cell(0, 17).unwrap().bgcolor(), vt100::Color::Default);
        assert_eq!(screen.cell(0, 18).unwrap().bgcolor(), vt100::Color::Idx(236));
        assert_eq!(screen.cell(0, 29).unwrap().bgcolor(), vt100::Color::Idx(236));
        assert_eq!(screen.cell(0, 30).unwrap().bgcolor(), vt100::Color::Default);
    }

    #[test]
    fn test_render_width_law() {
        for width in [22u16, 23, 40, 100] {
            let mut bar = bar(width);
            bar.add_left(4, "a");
            bar.add_left(6, "b");
            bar.add_right(12, "c");
            assert_eq!(bar.render_buffer().width(), width);
            assert_eq!(visible_width(&bar.render()), usize::from(width));
        }
    }

    #[test]
    fn test_render_overflow_law() {
        let mut bar = bar(15);
        bar.add_left(10, "Status: OK");
        bar.add_right(12, "11:45 AM");

        assert_eq!(bar.filler_width(), 0);
        let buffer = bar.render_buffer();
        assert_eq!(buffer.width(), 22);
        assert_eq!(buffer.to_lines(), vec![" Status: O 11:45 AM   "]);
    }

    #[test]
    fn test_empty_bar_renders_filler() {
        let bar = bar(12);
        let buffer = bar.render_buffer();
        assert_eq!(buffer.width(), 12);
        assert_eq!(bar.render(), " ".repeat(12));
    }

    #[test]
    fn test_height_applies_to_all_parts() {
        let mut bar = bar(10);
        bar.set_height(2);
        bar.add_left(3, "ab");
        bar.add_right(3, "cd");

        let rendered = bar.render();
        assert_eq!(rendered.lines().count(), 2);
        assert_eq!(bar.render_buffer().to_lines(), vec![" ab     cd", "          "]);

        let parser = screen(&bar, 12);
        assert_eq!(parser.screen().cell(1, 0).unwrap().bgcolor(), vt100::Color::Idx(236));
        assert_eq!(parser.screen().cell(1, 5).unwrap().bgcolor(), vt100::Color::Default);
    }

    #[test]
    fn test_options_preallocate_and_declare() {
        let options = BarOptions::from_toml_str(
            r##"
            width = 40
            left_count = 2
            right_count = 1

            [[right]]
            width = 12
            text = "11:45 AM"
            tag = "clock"
            background = "#000000"
            "##,
        )
        .unwrap();
        let bar = StatusBar::new(&options).unwrap();

        assert_eq!(bar.left_len(), 2);
        assert_eq!(bar.right_len(), 2);
        assert!(bar.left_segments().all(|s| s.width() == 10 && s.text().is_empty()));
        let clock = bar.get_tag("clock").unwrap();
        assert_eq!(bar.get_right(1), Some(clock));
        assert_eq!(clock.fg(), Color::Indexed(252));
        assert_eq!(clock.bg(), Color::Rgb(crate::style::Rgb::BLACK));
    }

    #[test]
    fn test_options_duplicate_tags_rejected() {
        let mut options = BarOptions::default().with_tag_policy(TagPolicy::Reject);
        let tagged = SegmentConfig {
            tag: Some("dup".to_string()),
            ..SegmentConfig::default()
        };
        options.left = vec![tagged.clone()];
        options.right = vec![tagged];
        assert!(matches!(
            StatusBar::new(&options),
            Err(BarError::DuplicateTag { .. })
        ));
    }

    #[test]
    fn test_zero_height_rejected() {
        let options = BarOptions::default().with_height(0);
        assert!(matches!(
            StatusBar::new(&options),
            Err(BarError::Config(ConfigError::ZeroHeight))
        ));
    }

    #[test]
    fn test_resize_event_updates_width() {
        let mut bar = bar(80);
        bar.clear_redraw();
        let consumed = bar.handle_input(&InputEvent::Resize { width: 120, height: 40 });
        assert!(!consumed);
        assert_eq!(bar.width(), 120);
        assert_eq!(bar.height(), 1);
        assert!(bar.needs_redraw());

        assert!(!bar.handle_input(&InputEvent::key(KeyCode::Char('q'))));
        assert_eq!(bar.width(), 120);
    }

    #[test]
    fn test_widget_render_into_frame() {
        let mut bar = bar(10);
        bar.add_left(4, "ok");
        bar.set_bounds(Rect::new(2, 1, 6, 1));

        let mut frame = Buffer::new(8, 3);
        Widget::render(&bar, &mut frame);
        assert_eq!(frame.to_lines(), vec!["        ", "   ok   ", "        "]);
        assert_eq!(frame.get(2, 1).unwrap().bg(), Color::Indexed(236));
        assert_eq!(frame.get(6, 1).unwrap().bg(), Color::Reset);
    }

    #[test]
    fn test_mutations_mark_dirty() {
        let mut bar = bar(80);
        bar.clear_redraw();
        let id = bar.add_left(3, "a");
        assert!(bar.needs_redraw());

        bar.clear_redraw();
        bar.set_tag(id, "t").unwrap();
        bar.get_tag_mut("t").unwrap().set_text("b");
        assert!(bar.needs_redraw());
    }
}
