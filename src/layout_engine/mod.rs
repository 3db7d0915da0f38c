//! The widget grid layout engine.
//!
//! A layout pass classifies widgets into arranged and auto groups, places
//! the arranged ones first (grouped by their row hints), then the auto ones
//! below them, and derives the total number of rows from the resulting
//! occupancy.

mod classify;
mod columns;
mod engine;
mod frame;
mod occupancy;
mod placement;

pub use classify::{Classification, classify};
pub use columns::fitting_columns;
pub use engine::{
    EventResponse, GridLayout, GridLayoutEngine, LayoutEvent, LayoutState, PlacedWidget,
    compute_layout, validate_widgets,
};
pub use frame::CellFrame;
pub use occupancy::OccupancyGrid;
pub use placement::determine_position;
use thiserror::Error;

use crate::common::config::ConfigError;
use crate::model::widget::WidgetId;

/// Largest footprint side, in cells, a widget may ask for.
pub const MAX_WIDGET_SPAN: u32 = 1024;

/// The top-left cell and footprint size of a placed widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: u32,
    pub column: u32,
    pub width: u32,
    pub height: u32,
}

impl GridPosition {
    pub fn new(row: u32, column: u32, width: u32, height: u32) -> Self {
        Self { row, column, width, height }
    }

    pub fn rows(&self) -> std::ops::Range<u32> { self.row..self.row + self.height }

    pub fn columns(&self) -> std::ops::Range<u32> { self.column..self.column + self.width }

    pub fn overlaps(&self, other: &GridPosition) -> bool {
        self.row < other.row + other.height
            && other.row < self.row + self.height
            && self.column < other.column + other.width
            && other.column < self.column + self.width
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(
        "widget {id} has invalid footprint {width}x{height}, each side must be between 1 and {}",
        MAX_WIDGET_SPAN
    )]
    InvalidWidget { id: WidgetId, width: u32, height: u32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
