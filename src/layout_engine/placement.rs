use tracing::trace;

use super::{GridPosition, OccupancyGrid};
use crate::model::widget::Widget;

/// Finds the first free footprint for `widget`, scanning left to right and
/// then top to bottom, starting at `(desired_row, desired_column)`.
///
/// The scan moves one column right while the footprint still fits inside the
/// grid, and otherwise wraps to column 0 of the next row. Rows below the
/// lowest occupied cell are always free, so the scan terminates.
///
/// A widget wider than the grid is narrowed to the full grid width. The
/// widget is expected to have passed `validate_widgets`, which bounds the
/// row arithmetic of the scan.
pub fn determine_position(
    grid: &OccupancyGrid,
    widget: &Widget,
    desired_row: u32,
    desired_column: u32,
) -> GridPosition {
    let fitting_columns = grid.fitting_columns();
    let width = widget.width.min(fitting_columns);
    if width < widget.width {
        trace!(
            "widget {} is {} columns wide, narrowing to {}",
            widget.id, widget.width, width
        );
    }

    let mut row = desired_row;
    let mut column = desired_column;
    while !grid.is_footprint_free(row..row + widget.height, column..column + width) {
        if column + width < fitting_columns {
            column += 1;
        } else {
            row += 1;
            column = 0;
        }
    }

    GridPosition::new(row, column, width, widget.height)
}
