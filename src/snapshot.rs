// Headless rendering: run one event/update/draw cycle into an off-screen
// buffer and save it as a PNG.
// Visual: the written image matches what the window would show for the same
// pointer position.

use std::path::Path;

use image::{Rgb, RgbImage};
use tracing::info;

use crate::app::{App, Event};
use crate::error::Error;
use crate::types::{FrameBuffer, Point};

/// Draw the strip once to record cell rectangles, apply `pointer` (if any),
/// then tick and draw again.
pub fn render_once(app: &mut App, width: usize, height: usize, pointer: Option<Point>) -> FrameBuffer {
    let mut screen = FrameBuffer::new(width, height);
    let bounds = screen.bounds();

    app.update(0.0);
    app.draw(&mut screen, bounds);
    if let Some(p) = pointer {
        app.event(Event::PointerMoved(p));
    }
    app.update(0.0);
    app.draw(&mut screen, bounds);
    screen
}

/// Convert 0x00RRGGBB pixels into an RGB image.
pub fn to_image(fb: &FrameBuffer) -> Result<RgbImage, Error> {
    let width = u32::try_from(fb.width).map_err(|e| Error::Snapshot(e.to_string()))?;
    let height = u32::try_from(fb.height).map_err(|e| Error::Snapshot(e.to_string()))?;
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    }))
}

pub fn write_png(app: &mut App, path: &Path, width: usize, height: usize, pointer: Option<Point>) -> Result<(), Error> {
    let screen = render_once(app, width, height, pointer);
    to_image(&screen)?
        .save(path)
        .map_err(|e| Error::Snapshot(format!("{}: {e}", path.display())))?;
    info!(
        path = %path.display(),
        position = app.engine().position(),
        tracking = app.engine().is_tracking(),
        intensity = app.engine().vertical_intensity(),
        magnify = ?app.engine().groups().magnify,
        frames = app.engine().frame_count(),
        "snapshot written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BACKGROUND, StripConfig};

    #[test]
    fn snapshot_paints_background_in_margin() {
        let mut app = App::new(StripConfig::default()).unwrap();
        let fb = render_once(&mut app, 400, 200, None);
        assert_eq!(fb.pixels[0], BACKGROUND);
        let img = to_image(&fb).unwrap();
        assert_eq!(img.dimensions(), (400, 200));
        assert_eq!(img.get_pixel(5, 5), &Rgb([0xFF, 0x00, 0x64]));
    }

    #[test]
    fn snapshot_applies_pointer() {
        let mut app = App::new(StripConfig::default()).unwrap();
        render_once(&mut app, 1080, 320, Some(Point::new(60.0, 160.0)));
        assert!(app.engine().is_tracking());
        assert!(app.engine().position() < 5.0);
    }

    #[test]
    fn pointer_outside_strip_keeps_idle_layout() {
        let mut app = App::new(StripConfig::default()).unwrap();
        render_once(&mut app, 1080, 320, Some(Point::new(2.0, 2.0)));
        assert!(!app.engine().is_tracking());
        assert_eq!(app.engine().position(), 25.0);
    }
}
