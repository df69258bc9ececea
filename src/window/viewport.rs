use std::ops::Range;

/// Scrollable viewport over fixed-height rows
///
/// Only rows intersecting the viewport, plus `overscan` rows on each side,
/// ever need layout. Everything is computed from the offset and row height,
/// so the cost does not depend on how long the result is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    row_height: u32,
    height: u32,
    overscan: usize,
    scroll_offset: u64,
}

impl Viewport {
    pub fn new(row_height: u32, height: u32) -> Self {
        Self {
            row_height: row_height.max(1),
            height,
            overscan: 2,
            scroll_offset: 0,
        }
    }

    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// Total scrollable height for `len` rows
    pub fn content_height(&self, len: usize) -> u64 {
        len as u64 * self.row_height as u64
    }

    /// Largest offset that still fills the viewport
    pub fn max_offset(&self, len: usize) -> u64 {
        self.content_height(len).saturating_sub(self.height as u64)
    }

    pub fn scroll_to(&mut self, offset: u64, len: usize) {
        self.scroll_offset = offset.min(self.max_offset(len));
    }

    pub fn scroll_by(&mut self, delta: i64, len: usize) {
        let target = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as u64)
        };
        self.scroll_to(target, len);
    }

    /// Scroll just enough to bring row `index` fully into view
    pub fn scroll_to_index(&mut self, index: usize, len: usize) {
        let row_top = index as u64 * self.row_height as u64;
        let row_bottom = row_top + self.row_height as u64;

        if row_top < self.scroll_offset {
            self.scroll_to(row_top, len);
        } else if row_bottom > self.scroll_offset + self.height as u64 {
            self.scroll_to(row_bottom.saturating_sub(self.height as u64), len);
        }
    }

    /// Pull the offset back after the result shrank; returns true if it moved
    pub fn clamp(&mut self, len: usize) -> bool {
        let max = self.max_offset(len);
        if self.scroll_offset > max {
            self.scroll_offset = max;
            true
        } else {
            false
        }
    }

    /// Rows needing layout: visible rows widened by the overscan, within `[0, len)`
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        if len == 0 {
            return 0..0;
        }

        let row_height = self.row_height as u64;
        let first = (self.scroll_offset / row_height) as usize;
        let visible = self.height.div_ceil(self.row_height) as usize;

        let start = first.saturating_sub(self.overscan).min(len);
        let end = first
            .saturating_add(visible)
            .saturating_add(self.overscan)
            .min(len);
        start..end
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(52, 600)
    }
}
