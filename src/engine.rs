// Layout engine: decides which cells swell under the pointer and how much room
// every cell gets.
// Visual expectation: move the pointer along the strip and a run of about
// `magnify_window` cells widens around it; push the pointer toward the top or
// bottom edge (richer variant) and that run takes over more of the strip.

use std::ops::Range;

use tracing::{debug, trace, warn};

use crate::canvas::Canvas;
use crate::config::{CONTAINER_STROKE, StripConfig};
use crate::error::Error;
use crate::frame::Frame;
use crate::types::{Column, Point, Rect};

/// The three contiguous runs of frame indices, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Groups {
    pub before: Range<usize>,
    pub magnify: Range<usize>,
    pub after: Range<usize>,
}

impl Groups {
    /// Number of frames covered by all three groups.
    pub fn len(&self) -> usize {
        self.before.len() + self.magnify.len() + self.after.len()
    }

    /// Every covered index, in order.
    #[cfg(test)]
    pub fn iter_all(&self) -> impl Iterator<Item = usize> + '_ {
        self.before
            .clone()
            .chain(self.magnify.clone())
            .chain(self.after.clone())
    }
}

/// Split `0..frame_count` around `position`.
///
/// A frame belongs to `before` when its center (`i + 0.5`) lies strictly left
/// of `position - window/2`, to `after` when it lies strictly right of
/// `position + window/2`, and to `magnify` otherwise.
pub fn partition(position: f32, frame_count: usize, magnify_window: usize) -> Groups {
    let half = magnify_window as f32 / 2.0;
    let mut before = 0;
    let mut magnify = 0;
    for i in 0..frame_count {
        let center = i as f32 + 0.5;
        if center < position - half {
            before += 1;
        } else if center > position + half {
            break;
        } else {
            magnify += 1;
        }
    }
    let split = before + magnify;
    Groups {
        before: 0..before,
        magnify: before..split,
        after: split..frame_count,
    }
}

/// Scale and squash for a frame inside the magnify window.
///
/// Returns `(scale_proportion, deflate_height)`: `(5, 0)` for a frame centered
/// exactly on `position`, falling back to `(1, deflation_base)` at the window edge.
pub fn magnify_shape(position: f32, index: usize, magnify_window: usize, deflation_base: f32) -> (f32, f32) {
    let half = magnify_window as f32 / 2.0;
    let inverse_proximity = (1.0 - (position - index as f32 - 0.5).abs() / half).clamp(0.0, 1.0);
    let scale = 1.0 + (2.0 * inverse_proximity).powi(2);
    let deflate = (1.0 - inverse_proximity) * deflation_base;
    (scale, deflate)
}

pub struct LayoutEngine {
    config: StripConfig,
    frames: Vec<Frame>,
    container: Option<Rect>,
    position: f32,
    vertical_intensity: f32,
    tracking: bool,
    groups: Groups,
}

impl LayoutEngine {
    /// Build `frame_count` frames in the idle (centered) state.
    pub fn new(config: StripConfig) -> Result<Self, Error> {
        config.validate()?;
        let frames = (0..config.frame_count).map(Frame::new).collect();
        let mut engine = Self {
            position: config.frame_count as f32 / 2.0,
            config,
            frames,
            container: None,
            vertical_intensity: 0.0,
            tracking: false,
            groups: Groups::default(),
        };
        engine.regroup();
        Ok(engine)
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[cfg(test)]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Container rectangle from the most recent render.
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn vertical_intensity(&self) -> f32 {
        self.vertical_intensity
    }

    /// True once the pointer has moved inside the container at least once.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn idle_position(&self) -> f32 {
        self.frames.len() as f32 / 2.0
    }

    /// React to pointer motion. Motion outside the container leaves the
    /// magnification where it was.
    pub fn on_pointer_move(&mut self, p: Point, inside_container: bool) {
        if !inside_container {
            return;
        }

        let position = self.compute_position(p);
        if position != self.position {
            debug!(position, "pointer position changed");
        }
        self.position = position;

        if self.config.vertical_intensity {
            if let Some(container) = self.container {
                let y = container.percent(p).y;
                self.vertical_intensity = (2.0 * (0.5 - y).abs()).clamp(0.0, 1.0);
            }
        }

        if !self.tracking {
            self.tracking = true;
            debug!(x = p.x, y = p.y, "pointer entered strip, tracking");
        }
    }

    /// Fractional frame position under `p`, averaged over every frame whose
    /// last rectangle contains it. Falls back to the idle center.
    pub fn compute_position(&self, p: Point) -> f32 {
        let (sum, hits) = self
            .frames
            .iter()
            .filter(|f| f.contains_point(p))
            .filter_map(|f| f.percent_within(p).map(|pct| f.index() as f32 + pct.x))
            .fold((0.0f32, 0usize), |(sum, n), v| (sum + v, n + 1));

        if hits == 0 {
            if self.container.is_some() {
                warn!(x = p.x, y = p.y, "pointer is over no frame, using idle position");
            }
            return self.idle_position();
        }
        (sum / hits as f32).clamp(0.0, self.frames.len() as f32)
    }

    /// Recompute groups and per-frame shape from the current pointer state.
    /// Reacts instantly; `elapsed_ms` is not used for easing.
    pub fn tick(&mut self, elapsed_ms: f32) {
        self.regroup();
        trace!(
            elapsed_ms,
            before = self.groups.before.len(),
            magnify = self.groups.magnify.len(),
            after = self.groups.after.len(),
            "tick"
        );
    }

    fn regroup(&mut self) {
        let StripConfig {
            magnify_window,
            deflation_base,
            vertical_intensity,
            ..
        } = self.config;
        let groups = partition(self.position, self.frames.len(), magnify_window);
        debug_assert_eq!(groups.len(), self.frames.len());

        for frame in &mut self.frames[groups.before.clone()] {
            frame.deflate_height = deflation_base;
            frame.scale_proportion = 1.0;
        }
        for frame in &mut self.frames[groups.after.clone()] {
            frame.deflate_height = deflation_base;
            frame.scale_proportion = 1.0;
        }
        for frame in &mut self.frames[groups.magnify.clone()] {
            if vertical_intensity {
                let (scale, deflate) =
                    magnify_shape(self.position, frame.index(), magnify_window, deflation_base);
                frame.scale_proportion = scale;
                frame.deflate_height = deflate;
            } else {
                frame.scale_proportion = 1.0;
                frame.deflate_height = 0.0;
            }
        }

        self.groups = groups;
    }

    /// Width of the magnify band for a container `container_width` pixels wide.
    pub fn magnify_band_width(&self, container_width: f32) -> f32 {
        let unit = container_width / self.frames.len() as f32;
        let base = 2.0 * self.groups.magnify.len() as f32 * unit;
        let magnification = if self.config.vertical_intensity {
            self.vertical_intensity
        } else {
            0.0
        };
        base.max(container_width * magnification).max(0.0)
    }

    /// Draw the container outline, then every frame in its column.
    /// Visual: resting cells share the leftover width equally; magnified cells
    /// split their band by scale, the one under the pointer widest.
    pub fn render(&mut self, canvas: &mut dyn Canvas, container: Rect) {
        self.container = Some(container);
        canvas.stroke(container, CONTAINER_STROKE);

        let bands = container.columns(&[
            Column::Proportion(self.groups.before.len() as f32),
            Column::Size(self.magnify_band_width(container.width)),
            Column::Proportion(self.groups.after.len() as f32),
        ]);

        let Groups {
            before,
            magnify,
            after,
        } = self.groups.clone();

        let equal = |range: &Range<usize>| vec![Column::Proportion(1.0); range.len()];
        let scaled: Vec<Column> = self.frames[magnify.clone()]
            .iter()
            .map(|f| Column::Proportion(f.scale_proportion))
            .collect();

        for (band, range, columns) in [
            (bands[0], before.clone(), equal(&before)),
            (bands[1], magnify, scaled),
            (bands[2], after.clone(), equal(&after)),
        ] {
            let cells = band.columns(&columns);
            for (frame, cell) in self.frames[range].iter_mut().zip(cells) {
                frame.render(canvas, cell);
            }
        }
    }
}
