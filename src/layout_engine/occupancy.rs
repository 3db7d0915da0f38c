use std::ops::Range;

use super::GridPosition;
use crate::common::collections::BTreeSet;

/// Per-column record of the rows covered by placed widgets.
///
/// Columns at or beyond `fitting_columns` are always reported as occupied,
/// which keeps every footprint inside the right boundary. A grid belongs to a
/// single layout pass and is discarded afterwards. A grid has at least one
/// column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    columns: Vec<BTreeSet<u32>>,
}

impl OccupancyGrid {
    pub fn new(fitting_columns: u32) -> Self {
        Self {
            columns: vec![BTreeSet::new(); fitting_columns.max(1) as usize],
        }
    }

    pub fn fitting_columns(&self) -> u32 { self.columns.len() as u32 }

    /// Marks every cell of `position` as occupied.
    ///
    /// # Panics
    ///
    /// Panics if the footprint extends past the last column. Placement never
    /// produces such a footprint, so hitting this is a bug in the engine.
    pub fn occupy(&mut self, position: &GridPosition) {
        assert!(
            position.column + position.width <= self.fitting_columns(),
            "footprint {position:?} overflows a grid of {} columns",
            self.fitting_columns()
        );
        for column in position.columns() {
            self.columns[column as usize].extend(position.rows());
        }
    }

    pub fn is_occupied(&self, row: u32, column: u32) -> bool {
        match self.columns.get(column as usize) {
            Some(rows) => rows.contains(&row),
            None => true,
        }
    }

    pub fn is_footprint_free(&self, rows: Range<u32>, columns: Range<u32>) -> bool {
        columns
            .into_iter()
            .all(|column| rows.clone().all(|row| !self.is_occupied(row, column)))
    }

    /// Highest occupied row over all columns, or `None` for an empty grid.
    pub fn max_occupied_row(&self) -> Option<u32> {
        self.columns.iter().filter_map(|rows| rows.last().copied()).max()
    }

    /// Number of rows the grid spans. An empty grid still counts one row.
    pub fn total_rows(&self) -> u32 { self.max_occupied_row().unwrap_or(0) + 1 }
}
