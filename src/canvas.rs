// The drawing surface the strip paints onto.
// The window loop hands a `FrameBuffer` in; tests hand in a recorder.

use crate::types::Rect;

/// Minimal set of drawing calls the strip needs. Colors are 0x00RRGGBB.
pub trait Canvas {
    /// Paint every pixel of `rect` with `color`.
    fn fill(&mut self, rect: Rect, color: u32);
    /// Paint a 1-pixel outline just inside `rect`.
    fn stroke(&mut self, rect: Rect, color: u32);
    /// Paint `text` centered inside `rect`.
    fn text_centered(&mut self, rect: Rect, text: &str, color: u32);
}
