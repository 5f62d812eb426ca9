// Root of the program: owns the strip, routes input, paints the background.
// Visual: a pink window with a dark-outlined strip inset by the margin.

use tracing::info;

use crate::canvas::Canvas;
use crate::config::{BACKGROUND, StripConfig};
use crate::engine::LayoutEngine;
use crate::error::Error;
use crate::types::{Point, Rect};

/// Keys the app cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Q,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    PointerMoved(Point),
    Key { key: KeyPress, ctrl: bool },
}

/// What the host loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    engine: LayoutEngine,
}

impl App {
    pub fn new(config: StripConfig) -> Result<Self, Error> {
        Ok(Self {
            engine: LayoutEngine::new(config)?,
        })
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Ctrl+Q or Escape ask the host to quit; pointer motion goes to the strip.
    pub fn event(&mut self, event: Event) -> Control {
        match event {
            Event::Key { key: KeyPress::Q, ctrl: true } | Event::Key { key: KeyPress::Escape, .. } => {
                info!("quit requested");
                Control::Quit
            }
            Event::Key { .. } => Control::Continue,
            Event::PointerMoved(p) => {
                let inside = self.engine.container().is_some_and(|r| r.contains(p));
                self.engine.on_pointer_move(p, inside);
                Control::Continue
            }
        }
    }

    pub fn update(&mut self, elapsed_ms: f32) {
        self.engine.tick(elapsed_ms);
    }

    /// Paint the background over `bounds`, then the strip inside the margin.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, bounds: Rect) {
        canvas.fill(bounds, BACKGROUND);
        let margin = self.engine.config().margin;
        self.engine.render(canvas, bounds.deflate(margin));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{DrawCall, RecordingCanvas};
    use crate::config::CONTAINER_STROKE;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 1080.0, 320.0)
    }

    #[test]
    fn ctrl_q_and_escape_quit() {
        let mut app = App::new(StripConfig::default()).unwrap();
        assert_eq!(app.event(Event::Key { key: KeyPress::Q, ctrl: false }), Control::Continue);
        assert_eq!(app.event(Event::Key { key: KeyPress::Other, ctrl: true }), Control::Continue);
        assert_eq!(app.event(Event::Key { key: KeyPress::Q, ctrl: true }), Control::Quit);
        assert_eq!(app.event(Event::Key { key: KeyPress::Escape, ctrl: false }), Control::Quit);
    }

    #[test]
    fn draw_fills_background_then_insets_strip() {
        let mut app = App::new(StripConfig::default()).unwrap();
        let mut canvas = RecordingCanvas::default();
        app.draw(&mut canvas, bounds());

        assert_eq!(canvas.calls[0], DrawCall::Fill(bounds(), BACKGROUND));
        let container = Rect::new(40.0, 40.0, 1000.0, 240.0);
        assert_eq!(canvas.strokes(CONTAINER_STROKE), vec![container]);
        assert_eq!(app.engine().container(), Some(container));
    }

    #[test]
    fn pointer_before_first_draw_is_ignored() {
        let mut app = App::new(StripConfig::default()).unwrap();
        app.event(Event::PointerMoved(Point::new(100.0, 100.0)));
        assert!(!app.engine().is_tracking());
        assert_eq!(app.engine().position(), 25.0);
    }

    #[test]
    fn pointer_in_margin_does_not_move_strip() {
        let mut app = App::new(StripConfig::default()).unwrap();
        app.update(0.0);
        app.draw(&mut RecordingCanvas::default(), bounds());
        app.event(Event::PointerMoved(Point::new(10.0, 10.0)));
        assert!(!app.engine().is_tracking());
    }

    #[test]
    fn full_cycle_moves_magnify_window_under_pointer() {
        let mut app = App::new(StripConfig::default()).unwrap();
        app.update(0.0);
        app.draw(&mut RecordingCanvas::default(), bounds());

        // First resting column starts at the container's left edge (x = 40).
        let rect = app.engine().frames()[2].last_rect().unwrap();
        let p = Point::new(rect.x + rect.width / 2.0, 160.0);
        assert_eq!(app.event(Event::PointerMoved(p)), Control::Continue);
        app.update(16.0);
        app.draw(&mut RecordingCanvas::default(), bounds());

        let engine = app.engine();
        assert!(engine.is_tracking());
        assert!((engine.position() - 2.5).abs() < 1e-2);
        assert!(engine.groups().magnify.contains(&2));
        let widest = engine
            .frames()
            .iter()
            .max_by(|a, b| a.scale_proportion.total_cmp(&b.scale_proportion))
            .map(|f| f.index());
        assert_eq!(widest, Some(2));
    }
}
