// One numbered cell of the strip.
// Visual: an outlined box with its index printed in the middle; resting cells
// are squashed vertically, cells near the pointer stand tall.

use crate::canvas::Canvas;
use crate::config::{FRAME_STROKE, FRAME_TEXT};
use crate::types::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: usize,
    /// Vertical squash in pixels, split evenly between top and bottom.
    pub deflate_height: f32,
    /// Relative width inside the magnify band (always >= 1).
    pub scale_proportion: f32,
    last_rect: Option<Rect>,
}

impl Frame {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            deflate_height: 0.0,
            scale_proportion: 1.0,
            last_rect: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Rectangle allotted by the most recent render, if any.
    #[cfg(test)]
    pub fn last_rect(&self) -> Option<Rect> {
        self.last_rect
    }

    /// Remember `allotted` for hit-testing, then draw the squashed outline and the index.
    pub fn render(&mut self, canvas: &mut dyn Canvas, allotted: Rect) {
        self.last_rect = Some(allotted);
        let sub = allotted.deflate_height(self.deflate_height.max(0.0));
        canvas.stroke(sub, FRAME_STROKE);
        canvas.text_centered(sub, &self.index.to_string(), FRAME_TEXT);
    }

    /// False until the frame has been rendered at least once.
    pub fn contains_point(&self, p: Point) -> bool {
        self.last_rect.is_some_and(|r| r.contains(p))
    }

    /// Fractional position of `p` inside the last allotted rectangle.
    pub fn percent_within(&self, p: Point) -> Option<Point> {
        self.last_rect.map(|r| r.percent(p))
    }
}
