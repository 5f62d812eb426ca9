// Core types shared by the layout engine, the canvas and the window loop.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window is on screen (pixels)
    pub height: usize,     // how tall the window is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer of `width * height` pixels, all black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u32; width * height],
        }
    }

    /// The whole buffer as a layout rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

/// A pointer position in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How one horizontal band of `Rect::columns` is sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column {
    /// Fixed width in pixels, allotted before any proportional column.
    Size(f32),
    /// Share of whatever width the fixed columns left over.
    Proportion(f32),
}

/// Axis-aligned rectangle in f32 pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    /// Empty rectangles contain nothing.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Where `p` falls inside this rectangle, as fractions of width/height in [0,1].
    pub fn percent(&self, p: Point) -> Point {
        let fx = if self.width > 0.0 { (p.x - self.x) / self.width } else { 0.0 };
        let fy = if self.height > 0.0 { (p.y - self.y) / self.height } else { 0.0 };
        Point::new(fx.clamp(0.0, 1.0), fy.clamp(0.0, 1.0))
    }

    /// Shrink every side by `margin`.
    /// Visual: the background color shows as a frame of `margin` pixels around the result.
    pub fn deflate(&self, margin: f32) -> Rect {
        self.inset(margin, margin)
    }

    /// Shrink the height by `amount`, half taken from the top and half from the bottom.
    pub fn deflate_height(&self, amount: f32) -> Rect {
        self.inset(0.0, amount / 2.0)
    }

    fn inset(&self, dx: f32, dy: f32) -> Rect {
        let dx = dx.max(0.0).min(self.width / 2.0);
        let dy = dy.max(0.0).min(self.height / 2.0);
        Rect::new(
            self.x + dx,
            self.y + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }

    /// Split into side-by-side bands, left to right, each spanning the full height.
    ///
    /// Fixed `Size` columns are placed first (clamped to the width still free),
    /// then the remainder is shared between `Proportion` columns by weight.
    /// Widths are never negative and never add up to more than `self.width`.
    pub fn columns(&self, columns: &[Column]) -> Vec<Rect> {
        let mut remaining = self.width;
        let mut widths = vec![0.0f32; columns.len()];

        for (slot, column) in widths.iter_mut().zip(columns) {
            if let Column::Size(size) = *column {
                let size = if size.is_finite() { size.max(0.0) } else { 0.0 };
                *slot = size.min(remaining);
                remaining -= *slot;
            }
        }

        let total_weight: f32 = columns
            .iter()
            .map(|c| match *c {
                Column::Proportion(w) if w.is_finite() => w.max(0.0),
                _ => 0.0,
            })
            .sum();

        if total_weight > 0.0 {
            for (slot, column) in widths.iter_mut().zip(columns) {
                if let Column::Proportion(w) = *column {
                    let w = if w.is_finite() { w.max(0.0) } else { 0.0 };
                    *slot = remaining * w / total_weight;
                }
            }
        }

        let mut x = self.x;
        widths
            .into_iter()
            .map(|w| {
                let band = Rect::new(x, self.y, w, self.height);
                x += w;
                band
            })
            .collect()
    }
}
