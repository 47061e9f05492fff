use tracing::debug;
use tracing::warn;

use crate::config::ViewportGeometry;
use crate::engine::Automaton;
use crate::grid::GridCoordinate;
use crate::grid::GridDimensions;

/// A click on the surface, in the host's client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,

    /// A modifier key was held: stamp a pattern instead of toggling.
    pub modified: bool,
}

/// Where, and how large, the surface is displayed in client coordinates. The displayed size can
/// differ from the surface's intrinsic pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A fixed set of `(d_row, d_col)` offsets from an anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    offsets: &'static [(i32, i32)],
}

/// A glider, anchored on its centre cell. It heads down and to the right:
///
/// ```notrust
/// ■ □ ■
/// □ ■ ■
/// □ ■ □
/// ```
pub const GLIDER: Stamp = Stamp::new(&[(0, 0), (0, 1), (1, 0), (-1, 1), (-1, -1)]);

impl Stamp {
    pub const fn new(offsets: &'static [(i32, i32)]) -> Self {
        Self { offsets }
    }

    pub fn offsets(&self) -> &[(i32, i32)] {
        self.offsets
    }

    /// The cells this stamp covers when anchored at `anchor`, wrapped onto the torus.
    pub fn cells(
        &self,
        anchor: GridCoordinate,
        dims: GridDimensions,
    ) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.offsets
            .iter()
            .map(move |&(d_row, d_col)| dims.wrap(anchor, d_row, d_col))
    }
}

/// What a pointer event asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(GridCoordinate),
    Stamp(GridCoordinate),
}

impl Command {
    pub fn from_event(event: &PointerEvent, coord: GridCoordinate) -> Self {
        if event.modified {
            Command::Stamp(coord)
        } else {
            Command::Toggle(coord)
        }
    }
}

/// Map a pointer event to the grid cell under it.
///
/// Client coordinates are first scaled by `intrinsic / displayed` on each axis, independently,
/// then divided by the cell pitch. Positions off the grid are clamped onto its nearest edge.
pub fn locate(
    event: &PointerEvent,
    dims: GridDimensions,
    geometry: &ViewportGeometry,
    intrinsic: (u32, u32),
    bbox: &BoundingBox,
) -> GridCoordinate {
    let scale = |intrinsic: u32, displayed: f64| {
        if displayed > 0.0 {
            intrinsic as f64 / displayed
        } else {
            1.0
        }
    };

    let scale_x = scale(intrinsic.0, bbox.width);
    let scale_y = scale(intrinsic.1, bbox.height);

    let x = (event.client_x - bbox.left) * scale_x;
    let y = (event.client_y - bbox.top) * scale_y;

    let pitch = geometry.pitch() as f64;
    let col = (x / pitch).floor() as i64;
    let row = (y / pitch).floor() as i64;

    let coord = dims.clamp(row, col);

    if coord.row as i64 != row || coord.col as i64 != col {
        warn!("Pointer at ({x:.1}, {y:.1})px is off the grid, clamped to {coord:?}");
    } else {
        debug!("Pointer at ({x:.1}, {y:.1})px maps to {coord:?}");
    }

    coord
}

/// Issue the mutations for `command` against `engine`.
///
/// A stamp is a sequence of independent `set_cell` calls; there is no rollback if the engine
/// misbehaves halfway through.
pub fn apply<A: Automaton>(engine: &mut A, command: Command, stamp: &Stamp) {
    match command {
        Command::Toggle(coord) => engine.toggle_cell(coord.row, coord.col),
        Command::Stamp(anchor) => {
            let dims = engine.dimensions();

            for cell in stamp.cells(anchor, dims) {
                engine.set_cell(cell.row, cell.col, true);
            }
        }
    }
}
