/// Size of a grid, in cells. Fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

/// A cell position. `row` grows downwards, `col` grows to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub row: u32,
    pub col: u32,
}

impl GridCoordinate {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of bytes needed to hold one bit per cell, that is `ceil(width * height / 8)`.
    pub fn packed_len(&self) -> usize {
        self.cell_count().div_ceil(8)
    }

    /// Translate a 2D position into its row-major linear index `n`.
    pub fn index(&self, coord: GridCoordinate) -> usize {
        coord.row as usize * self.width as usize + coord.col as usize
    }

    /// Offset `coord` by `(d_row, d_col)` on the torus.
    ///
    /// Indices past an edge come back in on the opposite edge, so `-1` on row `0` lands on
    /// `height - 1`.
    pub fn wrap(&self, coord: GridCoordinate, d_row: i32, d_col: i32) -> GridCoordinate {
        let row = (coord.row as i64 + d_row as i64).rem_euclid(self.height as i64);
        let col = (coord.col as i64 + d_col as i64).rem_euclid(self.width as i64);

        GridCoordinate::new(row as u32, col as u32)
    }

    /// Clamp a possibly out-of-grid position into `[0, dimension - 1]` on both axes.
    pub fn clamp(&self, row: i64, col: i64) -> GridCoordinate {
        let row = row.clamp(0, self.height.saturating_sub(1) as i64);
        let col = col.clamp(0, self.width.saturating_sub(1) as i64);

        GridCoordinate::new(row as u32, col as u32)
    }
}

/// Reads cell `n` out of a packed buffer.
///
/// Cell `n` lives in bit `n % 8` of byte `n / 8`, least significant bit first. Engine and view
/// must agree on this layout exactly.
pub fn bit_is_set(buf: &[u8], n: usize) -> bool {
    (buf[n / 8] >> (n % 8)) & 1 == 1
}

/// Writes cell `n` of a packed buffer. Inverse of [`bit_is_set`].
pub fn set_bit(buf: &mut [u8], n: usize, alive: bool) {
    let mask = 1 << (n % 8);

    if alive {
        buf[n / 8] |= mask;
    } else {
        buf[n / 8] &= !mask;
    }
}
