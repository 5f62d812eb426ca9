// Tunable knobs for the strip plus the command line that fills them in.
// Visual: changing these changes how many cells you see, how many of them
// swell under the pointer and how far the resting cells are squashed.

use clap::Parser;

use crate::error::Error;
use crate::types::Point;

pub const DEFAULT_FRAME_COUNT: usize = 50;
pub const DEFAULT_MAGNIFY_WINDOW: usize = 5;
/// Resting squash applied to cells outside the magnify window (richer variant).
pub const DEFAULT_DEFLATION: f32 = 30.0;
/// Resting squash for the simple variant.
pub const SIMPLE_DEFLATION: f32 = 20.0;
pub const DEFAULT_MARGIN: f32 = 40.0;

pub const BACKGROUND: u32 = 0x00_FF_00_64; // rgb(255, 0, 100)
pub const CONTAINER_STROKE: u32 = 0x00_19_19_19; // rgb(25, 25, 25)
pub const FRAME_STROKE: u32 = 0x00_14_14_64; // rgb(20, 20, 100)
pub const FRAME_TEXT: u32 = 0x00_FF_FF_FF;

#[derive(Debug, Clone, PartialEq)]
pub struct StripConfig {
    /// Number of cells in the strip (N).
    pub frame_count: usize,
    /// How many cells the magnify window spans.
    pub magnify_window: usize,
    /// Vertical squash (pixels) for cells outside the magnify window.
    pub deflation_base: f32,
    /// Richer variant: pointer distance from the vertical center widens the
    /// magnify band and cells scale continuously with proximity.
    pub vertical_intensity: bool,
    /// Background margin around the strip container.
    pub margin: f32,
    pub window_width: usize,
    pub window_height: usize,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            magnify_window: DEFAULT_MAGNIFY_WINDOW,
            deflation_base: DEFAULT_DEFLATION,
            vertical_intensity: true,
            margin: DEFAULT_MARGIN,
            window_width: 1080,
            window_height: 320,
        }
    }
}

impl StripConfig {
    /// Fixed-width magnification without vertical intensity.
    pub fn simple() -> Self {
        Self {
            deflation_base: SIMPLE_DEFLATION,
            vertical_intensity: false,
            ..Self::default()
        }
    }

    /// Reject settings that would divide by zero or feed NaN into widths.
    pub fn validate(&self) -> Result<(), Error> {
        if self.frame_count == 0 {
            return Err(Error::InvalidConfig("frame count must be at least 1".into()));
        }
        if self.magnify_window == 0 {
            return Err(Error::InvalidConfig("magnify window must be at least 1".into()));
        }
        if !self.deflation_base.is_finite() || self.deflation_base < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "deflation must be a non-negative number, got {}",
                self.deflation_base
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "margin must be a non-negative number, got {}",
                self.margin
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        Ok(())
    }
}

/// Dock-style magnifying strip of numbered cells.
#[derive(Debug, Clone, Parser)]
#[command(name = "frame-strip", version)]
pub struct Cli {
    /// Number of cells in the strip.
    #[arg(long = "frames", default_value_t = DEFAULT_FRAME_COUNT)]
    pub frame_count: usize,

    /// Number of cells magnified around the pointer.
    #[arg(long = "window", default_value_t = DEFAULT_MAGNIFY_WINDOW)]
    pub magnify_window: usize,

    /// Vertical squash for resting cells [default: 30, or 20 with --simple].
    #[arg(long)]
    pub deflation: Option<f32>,

    /// Disable vertical intensity and continuous scaling.
    #[arg(long)]
    pub simple: bool,

    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    pub margin: f32,

    #[arg(long, default_value_t = 1080)]
    pub width: usize,

    #[arg(long, default_value_t = 320)]
    pub height: usize,

    /// Render one cycle to this PNG instead of opening a window.
    #[arg(long)]
    pub snapshot: Option<std::path::PathBuf>,

    /// Pointer position for --snapshot, as `X,Y` in window pixels.
    #[arg(long, value_parser = parse_point)]
    pub pointer: Option<Point>,
}

impl Cli {
    pub fn into_config(self) -> Result<StripConfig, Error> {
        let base = if self.simple {
            StripConfig::simple()
        } else {
            StripConfig::default()
        };
        let config = StripConfig {
            frame_count: self.frame_count,
            magnify_window: self.magnify_window,
            deflation_base: self.deflation.unwrap_or(base.deflation_base),
            margin: self.margin,
            window_width: self.width,
            window_height: self.height,
            ..base
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parse `X,Y` into a point.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad X `{x}`: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad Y `{y}`: {e}"))?;
    Ok(Point::new(x, y))
}
