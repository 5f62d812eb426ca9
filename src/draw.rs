// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the strip.
// 2) Solid fills and 1-pixel outlines for the container and each cell.
// 3) A tiny 5x7 bitmap font to print each cell's number.

use crate::app::KeyPress;
use crate::canvas::Canvas;
use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rect};
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions {
            resize: true,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new strip.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Current drawable size; changes when the user resizes the window.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Current mouse position in window pixel coordinates.
    /// Positions outside the window are passed through unclamped so the strip
    /// can tell the pointer has left it.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| Point::new(x, y))
    }

    /// Keys that went down since the last poll (no auto-repeat).
    pub fn keys_pressed(&self) -> Vec<KeyPress> {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .map(|key| match key {
                Key::Q => KeyPress::Q,
                Key::Escape => KeyPress::Escape,
                _ => KeyPress::Other,
            })
            .collect()
    }

    /// True while either Ctrl key is held.
    pub fn ctrl_down(&self) -> bool {
        self.window.is_key_down(Key::LeftCtrl) || self.window.is_key_down(Key::RightCtrl)
    }
}

/* ---------- Software drawing: pixels, lines, rectangles, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Snap a layout rectangle to whole pixels: (left, top, right, bottom), right/bottom exclusive.
fn pixel_span(rect: Rect) -> (i32, i32, i32, i32) {
    (
        rect.x.round() as i32,
        rect.y.round() as i32,
        rect.right().round() as i32,
        rect.bottom().round() as i32,
    )
}

/// Fill a rectangle, clipped to the buffer.
pub fn fill_rect(fb: &mut FrameBuffer, rect: Rect, color: u32) {
    let (x0, y0, x1, y1) = pixel_span(rect);
    let x0 = x0.clamp(0, fb.width as i32) as usize;
    let x1 = x1.clamp(0, fb.width as i32) as usize;
    let y0 = y0.clamp(0, fb.height as i32) as usize;
    let y1 = y1.clamp(0, fb.height as i32) as usize;
    if x0 >= x1 {
        return;
    }
    for y in y0..y1 {
        let row = y * fb.width;
        fb.pixels[row + x0..row + x1].fill(color);
    }
}

/// Outline a rectangle with 1-pixel lines on its innermost pixels.
/// Visual: a thin box; empty rectangles draw nothing.
pub fn stroke_rect(fb: &mut FrameBuffer, rect: Rect, color: u32) {
    let (x0, y0, x1, y1) = pixel_span(rect);
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let (right, bottom) = (x1 - 1, y1 - 1);
    draw_line(fb, x0, y0, right, y0, color);
    draw_line(fb, x0, bottom, right, bottom, color);
    draw_line(fb, x0, y0, x0, bottom, color);
    draw_line(fb, right, y0, right, bottom, color);
}

/* ---------- 5x7 bitmap font (digits are all a cell label needs) ---------- */

const GLYPH_W: i32 = 5;
const GLYPH_H: i32 = 7;
const GLYPH_ADVANCE: i32 = GLYPH_W + 1;

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel blown up to `scale`x`scale`.
/// Visual: a glyph with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (offset, ink) in [(1, 0x00000000), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..GLYPH_W {
                if (rowbits & (1 << (4 - rx))) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        put_pixel(
                            fb,
                            x + rx * scale + sx + offset,
                            y + ry as i32 * scale + sy + offset,
                            ink,
                        );
                    }
                }
            }
        }
    }
}

/// Pixel size of `text` at `scale`.
fn text_extent(text: &str, scale: i32) -> (i32, i32) {
    let n = text.chars().count() as i32;
    if n == 0 {
        return (0, 0);
    }
    ((n * GLYPH_ADVANCE - 1) * scale, GLYPH_H * scale)
}

/// Draw a text string using 5x7 glyphs.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += GLYPH_ADVANCE * scale;
    }
}

/// Biggest integer scale (up to 3) at which `text` still fits inside `rect`.
fn fitting_scale(rect: Rect, text: &str) -> i32 {
    (1..=3)
        .rev()
        .find(|&s| {
            let (w, h) = text_extent(text, s);
            (w + 2) as f32 <= rect.width && (h + 2) as f32 <= rect.height
        })
        .unwrap_or(1)
}

impl Canvas for FrameBuffer {
    fn fill(&mut self, rect: Rect, color: u32) {
        fill_rect(self, rect, color);
    }

    fn stroke(&mut self, rect: Rect, color: u32) {
        stroke_rect(self, rect, color);
    }

    /// Visual: the number sits in the middle of the cell, growing as the cell widens.
    fn text_centered(&mut self, rect: Rect, text: &str, color: u32) {
        let scale = fitting_scale(rect, text);
        let (w, h) = text_extent(text, scale);
        let x = (rect.x + (rect.width - w as f32) / 2.0).round() as i32;
        let y = (rect.y + (rect.height - h as f32) / 2.0).round() as i32;
        draw_text_5x7(self, x, y, text, color, scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(fb: &FrameBuffer, x: usize, y: usize) -> u32 {
        fb.pixels[y * fb.width + x]
    }

    #[test]
    fn fill_is_clipped_to_buffer() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.fill(Rect::new(-5.0, 5.0, 100.0, 100.0), 0xFF);
        assert_eq!(pixel(&fb, 0, 4), 0);
        assert_eq!(pixel(&fb, 0, 5), 0xFF);
        assert_eq!(pixel(&fb, 9, 9), 0xFF);
    }

    #[test]
    fn stroke_outlines_inner_edge() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.stroke(Rect::new(2.0, 2.0, 5.0, 4.0), 0xAB);
        assert_eq!(pixel(&fb, 2, 2), 0xAB);
        assert_eq!(pixel(&fb, 6, 2), 0xAB);
        assert_eq!(pixel(&fb, 2, 5), 0xAB);
        assert_eq!(pixel(&fb, 6, 5), 0xAB);
        assert_eq!(pixel(&fb, 4, 3), 0, "interior stays untouched");
        assert_eq!(pixel(&fb, 7, 2), 0, "right edge is exclusive");
    }

    #[test]
    fn empty_stroke_draws_nothing() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.stroke(Rect::new(1.0, 1.0, 0.0, 2.0), 0xAB);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn centered_text_lands_inside_rect() {
        let mut fb = FrameBuffer::new(40, 20);
        let rect = Rect::new(10.0, 0.0, 20.0, 20.0);
        fb.text_centered(rect, "7", 0x00FFFFFF);
        let mut lit = 0;
        for y in 0..fb.height {
            for x in 0..fb.width {
                if pixel(&fb, x, y) == 0x00FFFFFF {
                    lit += 1;
                    assert!((10..30).contains(&x), "glyph pixel at x={x} escaped the rect");
                }
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn scale_grows_with_room() {
        assert_eq!(fitting_scale(Rect::new(0.0, 0.0, 8.0, 8.0), "1"), 1);
        assert_eq!(fitting_scale(Rect::new(0.0, 0.0, 200.0, 200.0), "12"), 3);
    }
}
