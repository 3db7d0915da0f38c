//! Widget grid layout for dashboards.
//!
//! Given a set of widgets that each want a rectangular footprint of grid
//! cells, the layout engine computes a dense, non-overlapping placement on a
//! grid whose column count follows the viewport width, and reports how tall
//! the container must be.

pub mod actor;
pub mod common;
pub mod layout_engine;
pub mod model;
pub mod ui;

pub use common::config::{Config, ConfigError, GridSettings};
pub use layout_engine::{
    GridLayout, GridLayoutEngine, GridPosition, LayoutError, LayoutEvent, OccupancyGrid,
    compute_layout, fitting_columns,
};
pub use model::widget::{Dashboard, Placement, Widget, WidgetId};
