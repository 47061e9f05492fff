use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::color::ColorError;
use crate::color::Rgb;
use crate::controls;
use crate::controls::Action;
use crate::controls::Keymap;
use crate::grid::GridDimensions;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_CELL_SIZE: u32 = 16;

pub const DEFAULT_GRID_COLOR: Rgb = Rgb::LIGHT_GREY;
pub const DEFAULT_DEAD_COLOR: Rgb = Rgb::WHITE;
pub const DEFAULT_ALIVE_COLOR: Rgb = Rgb::BLACK;

/// Largest surface the command line will allocate, in pixels.
pub const MAX_SURFACE_PIXELS: u64 = 1 << 24;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cell size must be at least 1px")]
    ZeroCellSize,

    #[error("Tick interval must be longer than 0ms")]
    ZeroInterval,

    #[error("Grid must have at least one row and one column, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("No key is bound to the required '{0}' control")]
    MissingControl(Action),

    #[error("Unknown action \"{got}\"")]
    UnknownAction { got: String },

    #[error("Expected a binding like ACTION=KEY, got \"{got}\"")]
    BadBinding { got: String },

    #[error(
        "A {width}x{height} grid with {cell_size}px cells needs a surface larger than {max} pixels",
        max = MAX_SURFACE_PIXELS
    )]
    SurfaceTooLarge {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("Invalid color: {0}")]
    Color(#[from] ColorError),
}

/// How a grid is laid out on a raster surface.
///
/// Every cell is `cell_size` pixels square with a 1px grid line on each side, so one axis of
/// `n` cells spans `(cell_size + 1) * n + 1` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGeometry {
    cell_size: u32,
    pub grid_color: Rgb,
    pub dead_color: Rgb,
    pub alive_color: Rgb,
}

impl Default for ViewportGeometry {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            grid_color: DEFAULT_GRID_COLOR,
            dead_color: DEFAULT_DEAD_COLOR,
            alive_color: DEFAULT_ALIVE_COLOR,
        }
    }
}

impl ViewportGeometry {
    pub fn new(
        cell_size: u32,
        grid_color: Rgb,
        dead_color: Rgb,
        alive_color: Rgb,
    ) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        Ok(Self {
            cell_size,
            grid_color,
            dead_color,
            alive_color,
        })
    }

    /// Default colors with a different cell size.
    pub fn with_cell_size(cell_size: u32) -> Result<Self, ConfigError> {
        let d = Self::default();
        Self::new(cell_size, d.grid_color, d.dead_color, d.alive_color)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Distance in pixels from one cell's origin to the next: the cell plus one grid line.
    pub fn pitch(&self) -> u32 {
        self.cell_size.saturating_add(1)
    }

    /// Pixel size of the surface needed to show `dims`, saturating at `u32::MAX` per axis.
    pub fn surface_size(&self, dims: GridDimensions) -> (u32, u32) {
        let axis = |n: u32| self.pitch().saturating_mul(n).saturating_add(1);

        (axis(dims.width), axis(dims.height))
    }

    /// Like [`surface_size`](Self::surface_size), but `None` if either axis overflows a `u32`.
    pub fn checked_surface_size(&self, dims: GridDimensions) -> Option<(u32, u32)> {
        let axis = |n: u32| self.cell_size.checked_add(1)?.checked_mul(n)?.checked_add(1);

        Some((axis(dims.width)?, axis(dims.height)?))
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "lifeview",
    about = "Play with a toroidal Game of Life grid in the terminal",
    version
)]
pub struct Args {
    /// Number of columns.
    #[arg(long, default_value_t = 32)]
    pub width: u32,

    /// Number of rows.
    #[arg(long, default_value_t = 32)]
    pub height: u32,

    /// Cell size in surface pixels. In the terminal one pixel is one column wide and half a row
    /// tall.
    #[arg(long, default_value_t = 1)]
    pub cell_size: u32,

    /// Milliseconds between generations while playing.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL.as_millis() as u64)]
    pub interval_ms: u64,

    #[arg(long, default_value_t = DEFAULT_GRID_COLOR)]
    pub grid_color: Rgb,

    #[arg(long, default_value_t = DEFAULT_DEAD_COLOR)]
    pub dead_color: Rgb,

    #[arg(long, default_value_t = DEFAULT_ALIVE_COLOR)]
    pub alive_color: Rgb,

    /// Seed for the random pattern generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start playing immediately.
    #[arg(long)]
    pub autoplay: bool,

    /// Override a key binding, e.g. `--bind clear=x` or `--bind play-pause=space`.
    #[arg(long = "bind", value_name = "ACTION=KEY")]
    pub bindings: Vec<String>,

    /// Where to write logs. Defaults to `lifeview.log` in the temp directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dims: GridDimensions,
    pub geometry: ViewportGeometry,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
    pub autoplay: bool,
    pub keymap: Keymap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dims: GridDimensions::new(32, 32),
            geometry: ViewportGeometry::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
            autoplay: false,
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Build and validate a configuration from the command line.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.width == 0 || args.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: args.width,
                height: args.height,
            });
        }

        if args.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let geometry = ViewportGeometry::new(
            args.cell_size,
            args.grid_color,
            args.dead_color,
            args.alive_color,
        )?;

        let dims = GridDimensions::new(args.width, args.height);
        let fits = geometry
            .checked_surface_size(dims)
            .is_some_and(|(w, h)| w as u64 * h as u64 <= MAX_SURFACE_PIXELS);

        if !fits {
            return Err(ConfigError::SurfaceTooLarge {
                width: args.width,
                height: args.height,
                cell_size: args.cell_size,
            });
        }

        let mut keymap = Keymap::default();
        for binding in &args.bindings {
            let (action, key) = controls::parse_binding(binding)?;
            keymap.bind(key, action);
        }
        keymap.validate()?;

        Ok(Self {
            dims,
            geometry,
            tick_interval: Duration::from_millis(args.interval_ms),
            seed: args.seed,
            autoplay: args.autoplay,
            keymap,
        })
    }
}
