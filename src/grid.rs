//! Grid shape and navigation.
//!
//! Workspaces are laid out in row-major order over a fixed `rows × columns`
//! [`GridShape`].  Workspace `i` sits at row `i / columns`, column
//! `i % columns`.  The grid may have more cells than there are workspaces;
//! trailing cells are simply empty.

use crate::direction::Direction;
use log::debug;
use serde::{Deserialize, Serialize};

/// Largest accepted number of rows or columns.
pub const MAX_DIMENSION: usize = 64;

/// The configured `rows × columns` arrangement.
///
/// Both dimensions lie in `1..=MAX_DIMENSION`; [`GridShape::new`] clamps
/// anything outside, so a zero-sized grid cannot be represented and
/// `rows × columns` cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridShape {
    rows: usize,
    columns: usize,
}

impl GridShape {
    /// Create a shape, clamping both dimensions to `1..=MAX_DIMENSION`.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: rows.clamp(1, MAX_DIMENSION),
            columns: columns.clamp(1, MAX_DIMENSION),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells, occupied or not.
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    /// Number of cells that hold a workspace: `min(workspace_count, rows × columns)`.
    pub fn cell_count(&self, workspace_count: usize) -> usize {
        workspace_count.min(self.capacity())
    }

    /// Number of rows containing at least one workspace.
    pub fn occupied_rows(&self, workspace_count: usize) -> usize {
        self.cell_count(workspace_count).div_ceil(self.columns)
    }

    /// `(row, col)` of cell `index`.
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Cell index at `(row, col)`, or `None` if outside the grid.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.columns {
            Some(row * self.columns + col)
        } else {
            None
        }
    }

    /// Index reached by moving one step from `index` in `direction`.
    ///
    /// Diagonals take the vertical step first.  A step that lands on an
    /// empty trailing cell (index ≥ `workspace_count`) or off an edge with
    /// wraparound disabled leaves the position unchanged.
    pub fn neighbor(
        &self,
        index: usize,
        direction: Direction,
        wrap: Wrap,
        workspace_count: usize,
    ) -> usize {
        let (row, col) = self.position_of(index);
        let (dr, dc) = direction.deltas();

        let (mut r, mut c) = (row as isize, col as isize);
        if dr != 0 {
            match self.step(r, c, dr, Axis::Vertical, wrap) {
                Some(next) => (r, c) = next,
                None => return index,
            }
        }
        if dc != 0 {
            match self.step(r, c, dc, Axis::Horizontal, wrap) {
                Some(next) => (r, c) = next,
                None => return index,
            }
        }

        let target = r as usize * self.columns + c as usize;
        if target >= self.cell_count(workspace_count) {
            debug!("step {} from {} hits empty cell {}, staying", direction, index, target);
            return index;
        }
        debug!("step {} from {} -> {}", direction, index, target);
        target
    }

    fn step(&self, r: isize, c: isize, delta: isize, axis: Axis, wrap: Wrap) -> Option<(isize, isize)> {
        let rows = self.rows as isize;
        let cols = self.columns as isize;

        let (along, across, len, other_len) = match axis {
            Axis::Vertical => (r, c, rows, cols),
            Axis::Horizontal => (c, r, cols, rows),
        };

        let moved = along + delta;
        let (along, across) = if (0..len).contains(&moved) {
            (moved, across)
        } else if !wrap.wraparound {
            return None;
        } else if wrap.wrap_to_same {
            (moved.rem_euclid(len), across)
        } else {
            // Continue on the adjacent line, like reading order.
            (moved.rem_euclid(len), (across + delta).rem_euclid(other_len))
        };

        Some(match axis {
            Axis::Vertical => (along, across),
            Axis::Horizontal => (across, along),
        })
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

impl<'de> Deserialize<'de> for GridShape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            rows: usize,
            columns: usize,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(GridShape::new(raw.rows, raw.columns))
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Vertical,
    Horizontal,
}

/// Edge behaviour for [`GridShape::neighbor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wrap {
    /// Stepping off an edge re-enters from the opposite edge.
    #[serde(default)]
    pub wraparound: bool,
    /// With wraparound, stay on the same row (or column) instead of
    /// continuing on the next one.
    #[serde(default)]
    pub wrap_to_same: bool,
}

impl Wrap {
    pub const NONE: Wrap = Wrap {
        wraparound: false,
        wrap_to_same: false,
    };
    pub const SAME_LINE: Wrap = Wrap {
        wraparound: true,
        wrap_to_same: true,
    };
    pub const NEXT_LINE: Wrap = Wrap {
        wraparound: true,
        wrap_to_same: false,
    };
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_3x3() -> GridShape {
        GridShape::new(3, 3)
    }

    #[test]
    fn zero_dimensions_clamp_to_one() {
        let s = GridShape::new(0, 0);
        assert_eq!((s.rows(), s.columns()), (1, 1));
        assert_eq!(s.capacity(), 1);
    }

    #[test]
    fn cell_count_never_exceeds_capacity() {
        let s = GridShape::new(2, 3);
        assert_eq!(s.cell_count(4), 4);
        assert_eq!(s.cell_count(6), 6);
        assert_eq!(s.cell_count(10), 6);
        assert_eq!(s.cell_count(0), 0);
    }

    #[test]
    fn occupied_rows_counts_partial_last_row() {
        let s = GridShape::new(3, 3);
        assert_eq!(s.occupied_rows(1), 1);
        assert_eq!(s.occupied_rows(3), 1);
        assert_eq!(s.occupied_rows(4), 2);
        assert_eq!(s.occupied_rows(9), 3);
        assert_eq!(s.occupied_rows(20), 3);
    }

    #[test]
    fn position_and_index_agree() {
        let s = GridShape::new(2, 3);
        assert_eq!(s.position_of(4), (1, 1));
        assert_eq!(s.index_of(1, 1), Some(4));
        assert_eq!(s.index_of(2, 0), None);
        assert_eq!(s.index_of(0, 3), None);
    }

    #[test]
    fn step_inside_grid() {
        let s = shape_3x3();
        assert_eq!(s.neighbor(4, Direction::Up, Wrap::NONE, 9), 1);
        assert_eq!(s.neighbor(4, Direction::Down, Wrap::NONE, 9), 7);
        assert_eq!(s.neighbor(4, Direction::Left, Wrap::NONE, 9), 3);
        assert_eq!(s.neighbor(4, Direction::Right, Wrap::NONE, 9), 5);
    }

    #[test]
    fn no_wrap_stays_at_edge() {
        let s = shape_3x3();
        assert_eq!(s.neighbor(0, Direction::Up, Wrap::NONE, 9), 0);
        assert_eq!(s.neighbor(0, Direction::Left, Wrap::NONE, 9), 0);
        assert_eq!(s.neighbor(8, Direction::Right, Wrap::NONE, 9), 8);
        assert_eq!(s.neighbor(8, Direction::Down, Wrap::NONE, 9), 8);
    }

    #[test]
    fn wrap_to_same_row_and_column() {
        let s = shape_3x3();
        assert_eq!(s.neighbor(2, Direction::Right, Wrap::SAME_LINE, 9), 0);
        assert_eq!(s.neighbor(3, Direction::Left, Wrap::SAME_LINE, 9), 5);
        assert_eq!(s.neighbor(1, Direction::Up, Wrap::SAME_LINE, 9), 7);
        assert_eq!(s.neighbor(7, Direction::Down, Wrap::SAME_LINE, 9), 1);
    }

    #[test]
    fn wrap_to_next_line_continues_in_reading_order() {
        let s = shape_3x3();
        // End of row 0 continues at start of row 1.
        assert_eq!(s.neighbor(2, Direction::Right, Wrap::NEXT_LINE, 9), 3);
        // Start of row 1 goes back to end of row 0.
        assert_eq!(s.neighbor(3, Direction::Left, Wrap::NEXT_LINE, 9), 2);
        // Last cell wraps to the first.
        assert_eq!(s.neighbor(8, Direction::Right, Wrap::NEXT_LINE, 9), 0);
        assert_eq!(s.neighbor(0, Direction::Left, Wrap::NEXT_LINE, 9), 8);
        // Bottom of column 0 continues at top of column 1.
        assert_eq!(s.neighbor(6, Direction::Down, Wrap::NEXT_LINE, 9), 1);
        assert_eq!(s.neighbor(1, Direction::Up, Wrap::NEXT_LINE, 9), 6);
    }

    #[test]
    fn diagonal_is_vertical_then_horizontal() {
        let s = shape_3x3();
        assert_eq!(s.neighbor(4, Direction::UpLeft, Wrap::NONE, 9), 0);
        assert_eq!(s.neighbor(4, Direction::DownRight, Wrap::NONE, 9), 8);
        // Blocked vertically: whole step is rejected.
        assert_eq!(s.neighbor(1, Direction::UpRight, Wrap::NONE, 9), 1);
    }

    #[test]
    fn empty_trailing_cells_are_not_reachable() {
        let s = shape_3x3();
        // Only 7 workspaces: cells 7 and 8 are empty.
        assert_eq!(s.neighbor(4, Direction::Down, Wrap::NONE, 7), 4);
        assert_eq!(s.neighbor(6, Direction::Right, Wrap::NONE, 7), 6);
        assert_eq!(s.neighbor(3, Direction::Down, Wrap::NONE, 7), 6);
    }

    #[test]
    fn single_row_strip() {
        let s = GridShape::new(1, 4);
        assert_eq!(s.neighbor(1, Direction::Right, Wrap::NONE, 4), 2);
        assert_eq!(s.neighbor(1, Direction::Down, Wrap::NONE, 4), 1);
        assert_eq!(s.neighbor(3, Direction::Right, Wrap::SAME_LINE, 4), 0);
    }

    #[test]
    fn deserialize_clamps() {
        let s: GridShape = serde_json::from_str(r#"{"rows":0,"columns":4}"#).unwrap();
        assert_eq!((s.rows(), s.columns()), (1, 4));
    }

    #[test]
    fn huge_dimensions_clamp_to_max() {
        let s = GridShape::new(usize::MAX, usize::MAX);
        assert_eq!((s.rows(), s.columns()), (MAX_DIMENSION, MAX_DIMENSION));
        assert_eq!(s.capacity(), MAX_DIMENSION * MAX_DIMENSION);
        assert_eq!(s.cell_count(usize::MAX), s.capacity());
        assert_eq!(s.occupied_rows(usize::MAX), MAX_DIMENSION);
    }
}
