use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::info;

use crate::engine::Automaton;
use crate::grid;
use crate::grid::GridCoordinate;
use crate::grid::GridDimensions;

const DEFAULT_WIDTH: u32 = 32;
const DEFAULT_HEIGHT: u32 = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UniverseError {
    #[error("A universe needs at least one row and one column, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },
}

/// A toroidal Game of Life grid, stored one bit per cell.
///
/// This is the engine the terminal front end runs against. Its `cells` buffer uses exactly the
/// layout [`grid::bit_is_set`] decodes.
pub struct Universe {
    width: u32,
    height: u32,

    /// `ceil(width * height / 8)` bytes, cell `n` in bit `n % 8` of byte `n / 8`
    cells: Vec<u8>,

    rng: StdRng,
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

impl Universe {
    /// Construct the default 32x32 universe, seeded with a striped pattern.
    pub fn new() -> Self {
        let dims = GridDimensions::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let mut cells = vec![0; dims.packed_len()];

        for i in 0..dims.cell_count() {
            grid::set_bit(&mut cells, i, i % 2 == 0 || i % 7 == 0);
        }

        let universe = Self {
            width: dims.width,
            height: dims.height,
            cells,
            rng: StdRng::from_os_rng(),
        };

        info!(
            "Creating a new [{}, {}] universe with {} live cells.",
            universe.width,
            universe.height,
            universe.live_count()
        );

        universe
    }

    /// An all-dead universe of the given size.
    pub fn with_size(width: u32, height: u32) -> Result<Self, UniverseError> {
        if width == 0 || height == 0 {
            return Err(UniverseError::EmptyGrid { width, height });
        }

        let dims = GridDimensions::new(width, height);

        info!("Creating a new [{width}, {height}] universe with 0 live cells.");

        Ok(Self {
            width,
            height,
            cells: vec![0; dims.packed_len()],
            rng: StdRng::from_os_rng(),
        })
    }

    /// Make [`Automaton::randomize`] reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Set each listed `(row, col)` alive. Coordinates wrap around the edges.
    pub fn set_cells(&mut self, cells: &[(u32, u32)]) {
        for &(row, col) in cells {
            self.set_cell(row, col, true);
        }
    }

    pub fn is_alive(&self, row: u32, col: u32) -> bool {
        grid::bit_is_set(&self.cells, self.get_index(row, col))
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Translate a 2D (`row`, `col`) position into its bit index, wrapping out of range
    /// coordinates.
    fn get_index(&self, row: u32, col: u32) -> usize {
        self.dimensions()
            .index(GridCoordinate::new(row % self.height, col % self.width))
    }

    /// Count the live cells among the eight neighbours of (`row`, `col`).
    fn live_neighbor_count(&self, row: u32, col: u32) -> u8 {
        let mut count = 0;

        for delta_row in [self.height - 1, 0, 1] {
            for delta_col in [self.width - 1, 0, 1] {
                if delta_row == 0 && delta_col == 0 {
                    continue;
                }

                let neighbor_row = (row + delta_row) % self.height;
                let neighbor_col = (col + delta_col) % self.width;

                count += self.is_alive(neighbor_row, neighbor_col) as u8;
            }
        }

        count
    }
}

impl Automaton for Universe {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn tick(&mut self) {
        let mut next = self.cells.clone();

        for row in 0..self.height {
            for col in 0..self.width {
                let alive = self.is_alive(row, col);

                // B3/S23
                let next_alive = matches!(
                    (alive, self.live_neighbor_count(row, col)),
                    (true, 2) | (true, 3) | (false, 3)
                );

                grid::set_bit(&mut next, self.get_index(row, col), next_alive);
            }
        }

        self.cells = next;
    }

    fn set_cell(&mut self, row: u32, col: u32, alive: bool) {
        let idx = self.get_index(row, col);
        grid::set_bit(&mut self.cells, idx, alive);
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        let idx = self.get_index(row, col);
        let alive = grid::bit_is_set(&self.cells, idx);
        grid::set_bit(&mut self.cells, idx, !alive);
    }

    fn randomize(&mut self) {
        for idx in 0..self.dimensions().cell_count() {
            let alive = self.rng.random_bool(0.5);
            grid::set_bit(&mut self.cells, idx, alive);
        }
    }

    fn clear(&mut self) {
        self.cells.fill(0);
    }
}
