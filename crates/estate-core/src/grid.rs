//! Estate coordinate space and survey ordering.
//!
//! The grid is never stored; it is derived from an estate's `width` and
//! `length` whenever a component needs it.

use crate::error::{EstateError, EstateResult};
use crate::models::{Cell, Estate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest accepted width or length.
pub const MAX_ESTATE_SIDE: i64 = 1 << 31;

/// Validated `width x length` grid of unit cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstateGrid {
    width: u32,
    length: u32,
}

impl EstateGrid {
    /// Validate raw dimensions. Both must lie in `1..=MAX_ESTATE_SIDE`.
    pub fn new(width: i64, length: i64) -> EstateResult<Self> {
        let valid = 1..=MAX_ESTATE_SIDE;
        if !valid.contains(&width) || !valid.contains(&length) {
            return Err(EstateError::InvalidDimension { width, length });
        }
        // MAX_ESTATE_SIDE fits in u32
        Ok(Self {
            width: width as u32,
            length: length as u32,
        })
    }

    pub fn of(estate: &Estate) -> Self {
        Self {
            width: estate.width,
            length: estate.length,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.length)
    }

    /// True when `(x, y)` lies inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        contains(self.width, self.length, x, y)
    }

    /// Checked conversion of raw coordinates into a cell of this grid.
    pub fn cell(&self, x: i64, y: i64) -> EstateResult<Cell> {
        if !self.contains(x, y) {
            return Err(EstateError::OutOfBounds {
                x,
                y,
                width: self.width,
                length: self.length,
            });
        }
        // contains() guarantees both fit in u32
        Ok(Cell::new(x as u32, y as u32))
    }

    /// Every cell, rows by increasing `y`, each row by increasing `x`.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.length).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    /// Every cell in boustrophedon order for the given scan direction.
    ///
    /// Consecutive cells are always exactly one grid step apart.
    pub fn survey(&self, order: ScanOrder) -> impl Iterator<Item = Cell> {
        let grid = *self;
        (0..grid.cell_count()).map(move |position| grid.survey_cell(order, position))
    }

    /// Cell visited at `position` (0-based) of the sweep.
    ///
    /// `position` must be below `cell_count()`.
    pub fn survey_cell(&self, order: ScanOrder, position: u64) -> Cell {
        let span = self.sweep_span(order);
        let line = (position / u64::from(span)) as u32;
        let step = (position % u64::from(span)) as u32;
        let along = if line % 2 == 0 { step } else { span - 1 - step };
        match order {
            ScanOrder::RowMajor => Cell::new(along, line),
            ScanOrder::ColumnMajor => Cell::new(line, along),
        }
    }

    /// Inverse of [`survey_cell`](Self::survey_cell) for a cell inside the grid.
    pub fn survey_position(&self, order: ScanOrder, cell: Cell) -> u64 {
        let span = self.sweep_span(order);
        let (line, along) = match order {
            ScanOrder::RowMajor => (cell.y, cell.x),
            ScanOrder::ColumnMajor => (cell.x, cell.y),
        };
        let step = if line % 2 == 0 { along } else { span - 1 - along };
        u64::from(line) * u64::from(span) + u64::from(step)
    }

    /// Cells per sweep line.
    fn sweep_span(&self, order: ScanOrder) -> u32 {
        match order {
            ScanOrder::RowMajor => self.width,
            ScanOrder::ColumnMajor => self.length,
        }
    }
}

/// Pure bounds predicate: `x in [0, width)` and `y in [0, length)`.
pub fn contains(width: u32, length: u32, x: i64, y: i64) -> bool {
    (0..i64::from(width)).contains(&x) && (0..i64::from(length)).contains(&y)
}

/// Direction of the serpentine survey sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Rows by increasing `y`, alternating `x` direction per row
    #[default]
    RowMajor,
    /// Columns by increasing `x`, alternating `y` direction per column
    ColumnMajor,
}

impl FromStr for ScanOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "row" | "rows" | "row_major" | "row-major" => Ok(Self::RowMajor),
            "column" | "columns" | "column_major" | "column-major" => Ok(Self::ColumnMajor),
            other => Err(format!("unknown scan order '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn positive_dimensions_yield_every_cell_once() {
        for (w, l) in [(1, 1), (1, 3), (4, 2), (7, 5)] {
            let grid = EstateGrid::new(w, l).unwrap();
            let cells: HashSet<Cell> = grid.cells().collect();
            assert_eq!(cells.len() as u64, grid.cell_count());
            for x in 0..w {
                for y in 0..l {
                    assert!(cells.contains(&Cell::new(x as u32, y as u32)));
                }
            }
        }
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        for (w, l) in [(0, 1), (1, 0), (-1, 5), (3, -2), (0, 0)] {
            assert!(matches!(
                EstateGrid::new(w, l),
                Err(EstateError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn sides_are_capped() {
        let grid = EstateGrid::new(MAX_ESTATE_SIDE, MAX_ESTATE_SIDE).unwrap();
        assert_eq!(grid.cell_count(), 1 << 62);

        for (w, l) in [
            (MAX_ESTATE_SIDE + 1, 1),
            (1, MAX_ESTATE_SIDE + 1),
            (i64::from(u32::MAX), i64::from(u32::MAX)),
            (1 << 33, 1),
        ] {
            let err = EstateGrid::new(w, l).unwrap_err();
            assert!(matches!(err, EstateError::InvalidDimension { .. }));
            assert!(err.to_string().contains("2147483648"), "{}", err);
        }
    }

    #[test]
    fn survey_positions_round_trip_on_huge_grids() {
        let grid = EstateGrid::new(MAX_ESTATE_SIDE, MAX_ESTATE_SIDE).unwrap();
        let side = MAX_ESTATE_SIDE as u32;
        for order in [ScanOrder::RowMajor, ScanOrder::ColumnMajor] {
            for cell in [
                Cell::new(0, 0),
                Cell::new(side - 1, 0),
                Cell::new(5, 1),
                Cell::new(side - 1, side - 1),
            ] {
                let position = grid.survey_position(order, cell);
                assert!(position < grid.cell_count());
                assert_eq!(grid.survey_cell(order, position), cell);
            }
        }
        // last row is odd, so the sweep ends back at x = 0
        assert_eq!(
            grid.survey_cell(ScanOrder::RowMajor, grid.cell_count() - 1),
            Cell::new(0, side - 1)
        );
    }

    #[test]
    fn bounds_are_half_open() {
        let grid = EstateGrid::new(10, 20).unwrap();
        assert!(grid.contains(0, 0));
        assert!(grid.contains(9, 19));
        assert!(!grid.contains(10, 0));
        assert!(!grid.contains(0, 20));
        assert!(!grid.contains(-1, 3));
        assert!(matches!(
            grid.cell(10, 19),
            Err(EstateError::OutOfBounds { x: 10, y: 19, .. })
        ));
    }

    #[test]
    fn row_major_survey_snakes_across_rows() {
        let grid = EstateGrid::new(3, 2).unwrap();
        let order: Vec<(u32, u32)> = grid
            .survey(ScanOrder::RowMajor)
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]);
    }

    #[test]
    fn column_major_survey_snakes_down_columns() {
        let grid = EstateGrid::new(2, 3).unwrap();
        let order: Vec<(u32, u32)> = grid
            .survey(ScanOrder::ColumnMajor)
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0)]);
    }

    #[test]
    fn survey_steps_are_single_grid_units() {
        let grid = EstateGrid::new(5, 4).unwrap();
        for order in [ScanOrder::RowMajor, ScanOrder::ColumnMajor] {
            let cells: Vec<Cell> = grid.survey(order).collect();
            assert_eq!(cells.len() as u64, grid.cell_count());
            for (position, cell) in cells.iter().enumerate() {
                assert_eq!(grid.survey_position(order, *cell), position as u64);
            }
            for pair in cells.windows(2) {
                let dx = (pair[0].x as i64 - pair[1].x as i64).abs();
                let dy = (pair[0].y as i64 - pair[1].y as i64).abs();
                assert_eq!(dx + dy, 1, "{:?} -> {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn scan_order_parses_config_values() {
        assert_eq!("row".parse::<ScanOrder>().unwrap(), ScanOrder::RowMajor);
        assert_eq!("Column".parse::<ScanOrder>().unwrap(), ScanOrder::ColumnMajor);
        assert!("diagonal".parse::<ScanOrder>().is_err());
    }
}
