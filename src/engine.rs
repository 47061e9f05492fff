use crate::grid::GridDimensions;

/// The simulation engine the front end drives.
///
/// The engine owns the canonical grid state and its packed buffer. The front end only ever
/// reads the buffer through [`Automaton::cells`] and changes the grid through the `&mut self`
/// methods below. Since the slice returned by `cells` borrows the engine, it cannot be held
/// across a tick or a mutation: every draw must fetch it again.
pub trait Automaton {
    /// Number of columns.
    fn width(&self) -> u32;

    /// Number of rows.
    fn height(&self) -> u32;

    /// Packed cell states, one bit per cell, row-major, least significant bit first. The slice
    /// holds at least `ceil(width * height / 8)` bytes.
    fn cells(&self) -> &[u8];

    /// Advance the grid by exactly one generation.
    fn tick(&mut self);

    /// Coordinates must already be inside the grid.
    fn set_cell(&mut self, row: u32, col: u32, alive: bool);

    /// Flip a single cell. Toggling the same cell twice restores it.
    fn toggle_cell(&mut self, row: u32, col: u32);

    /// Replace the whole grid with a new random pattern.
    fn randomize(&mut self);

    /// Kill every cell.
    fn clear(&mut self);

    fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.width(), self.height())
    }
}
