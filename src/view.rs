use thiserror::Error;

use crate::config::ViewportGeometry;
use crate::grid;
use crate::grid::GridCoordinate;
use crate::grid::GridDimensions;
use crate::surface::Point;
use crate::surface::Surface;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Cell buffer holds {actual} bytes but a {width}x{height} grid needs {expected}")]
    BufferTooShort {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Surface is {actual:?}px but the grid needs {expected:?}px")]
    SurfaceSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Paint the grid lines and every cell of a packed buffer onto `surface`.
///
/// Nothing is retained between calls: once this returns, the surface shows exactly `cells`. A
/// buffer shorter than `dims` requires means engine and view disagree on the grid, and is
/// reported before a single byte is read.
pub fn draw<S: Surface>(
    cells: &[u8],
    dims: GridDimensions,
    geometry: &ViewportGeometry,
    surface: &mut S,
) -> Result<(), ViewError> {
    let expected = dims.packed_len();
    if cells.len() < expected {
        return Err(ViewError::BufferTooShort {
            width: dims.width,
            height: dims.height,
            expected,
            actual: cells.len(),
        });
    }

    draw_grid_lines(dims, geometry, surface);
    draw_cells(cells, dims, geometry, surface);

    Ok(())
}

fn draw_grid_lines<S: Surface>(dims: GridDimensions, geometry: &ViewportGeometry, surface: &mut S) {
    let (w, h) = surface.size();
    let pitch = geometry.pitch();

    // vertical lines
    for i in 0..=dims.width {
        let x = i * pitch + 1;
        surface.stroke_line(Point::new(x, 0), Point::new(x, h), geometry.grid_color);
    }

    // horizontal lines
    for j in 0..=dims.height {
        let y = j * pitch + 1;
        surface.stroke_line(Point::new(0, y), Point::new(w, y), geometry.grid_color);
    }
}

fn draw_cells<S: Surface>(
    cells: &[u8],
    dims: GridDimensions,
    geometry: &ViewportGeometry,
    surface: &mut S,
) {
    let pitch = geometry.pitch();
    let size = geometry.cell_size();

    for row in 0..dims.height {
        for col in 0..dims.width {
            let n = dims.index(GridCoordinate::new(row, col));

            let color = if grid::bit_is_set(cells, n) {
                geometry.alive_color
            } else {
                geometry.dead_color
            };

            surface.fill_rect(col * pitch + 1, row * pitch + 1, size, size, color);
        }
    }
}
