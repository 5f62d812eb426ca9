// What you SEE:
// • A strip of numbered cells across the window.
// • Move the mouse along it: the cells under the pointer swell, dock style.
// • Richer mode: move toward the top/bottom edge and the swollen run widens.
// • Ctrl+Q or ESC quits. `--snapshot out.png` renders once without a window.

mod app;
mod canvas;
mod config;
mod draw;
mod engine;
mod error;
mod frame;
mod snapshot;
mod types;

use std::time::{Duration, Instant};

use app::{App, Control, Event};
use clap::Parser;
use config::Cli;
use draw::Drawer;
use error::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use types::{FrameBuffer, Point};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frame_strip=info")),
        )
        .init();

    let cli = Cli::parse();
    let snapshot = cli.snapshot.clone();
    let pointer = cli.pointer;
    let config = cli.into_config()?;
    info!(?config, "starting");

    let mut app = App::new(config.clone())?;

    if let Some(path) = snapshot {
        return snapshot::write_png(&mut app, &path, config.window_width, config.window_height, pointer);
    }

    let mut drawer = Drawer::new("Frame Strip", config.window_width, config.window_height)?;
    let (w, h) = drawer.size();
    let mut screen = FrameBuffer::new(w, h);

    let mut last_mouse: Option<Point> = None;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    'running: while drawer.is_open() {
        let now = Instant::now();
        let elapsed_ms = (now - last_frame_time).as_secs_f32() * 1000.0;
        last_frame_time = now;

        /* 1) Inputs: keys first, then pointer motion (only when it actually moved). */
        let ctrl = drawer.ctrl_down();
        for key in drawer.keys_pressed() {
            if app.event(Event::Key { key, ctrl }) == Control::Quit {
                break 'running;
            }
        }
        let mouse = drawer.mouse_pos();
        if let Some(p) = mouse {
            if last_mouse != Some(p) {
                app.event(Event::PointerMoved(p));
            }
        }
        last_mouse = mouse;

        /* 2) Recompute magnification from the latest pointer state. */
        app.update(elapsed_ms);

        /* 3) Follow window resizes, then repaint everything. */
        let (w, h) = drawer.size();
        if (w, h) != (screen.width, screen.height) {
            debug!(width = w, height = h, "window resized");
            screen = FrameBuffer::new(w, h);
        }
        let bounds = screen.bounds();
        app.draw(&mut screen, bounds);

        /* 4) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;

        /* 5) FPS counter, once per second. */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!(fps = frames_this_second as f32 / secs, "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("window closed, exiting");
    Ok(())
}
