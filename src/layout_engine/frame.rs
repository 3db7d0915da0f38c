use serde::{Deserialize, Serialize};

use super::GridPosition;
use crate::common::config::GridSettings;

/// Pixel rectangle of a placed widget, relative to the grid container.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFrame {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl CellFrame {
    /// Converts a cell footprint to pixels. Spanned gaps between cells are
    /// part of the frame; the trailing margin is not.
    ///
    /// Pixel values saturate at the `i64` range.
    pub fn new(position: &GridPosition, settings: &GridSettings) -> Self {
        Self {
            x: i64::from(position.column).saturating_mul(settings.column_pitch()),
            y: i64::from(position.row).saturating_mul(settings.row_pitch()),
            width: span(position.width, settings.column_size, settings.margin),
            height: span(position.height, settings.row_size, settings.margin),
        }
    }
}

fn span(cells: u32, size: i64, margin: i64) -> i64 {
    let cells = i64::from(cells);
    cells
        .saturating_mul(size)
        .saturating_add(cells.saturating_sub(1).saturating_mul(margin))
}
