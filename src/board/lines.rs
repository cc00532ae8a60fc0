//! Three-in-a-row lines on a 3x3 grid.
//!
//! Cells are addressed row-major (`row * 3 + col`), the same way sub-boards
//! are addressed on the major grid, so one table serves both levels.

/// Number of cells in a 3x3 grid.
pub const GRID_CELLS: usize = 9;

/// All eight winning lines in scan order: rows 0..2, columns 0..2, then the
/// main diagonal and the anti-diagonal.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Converts a (row, col) pair to a grid index.
#[inline]
pub const fn grid_index(row: usize, col: usize) -> usize {
    row * 3 + col
}

/// Splits a grid index into (row, col).
#[inline]
pub const fn grid_coords(index: usize) -> (usize, usize) {
    (index / 3, index % 3)
}

/// Returns the value shared by the first complete line that `wins` accepts.
///
/// Lines are checked in `WIN_LINES` order and the first match is returned.
pub fn first_line<T, F>(grid: &[T; GRID_CELLS], wins: F) -> Option<T>
where
    T: Copy + PartialEq,
    F: Fn(T) -> bool,
{
    WIN_LINES.iter().find_map(|&[a, b, c]| {
        let v = grid[a];
        (wins(v) && grid[b] == v && grid[c] == v).then_some(v)
    })
}
