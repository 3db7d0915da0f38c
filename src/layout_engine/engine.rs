use tracing::{debug, instrument, trace, warn};

use super::{
    CellFrame, Classification, GridPosition, LayoutError, MAX_WIDGET_SPAN, OccupancyGrid,
    classify, determine_position, fitting_columns,
};
use crate::common::collections::HashSet;
use crate::common::config::GridSettings;
use crate::model::widget::{Placement, Widget, WidgetId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWidget {
    pub widget: Widget,
    pub position: GridPosition,
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub fitting_columns: u32,
    /// Arranged widgets first, then auto widgets, in placement order.
    pub placements: Vec<PlacedWidget>,
    pub total_rows: u32,
}

impl GridLayout {
    /// Saturates at `i64::MAX` for very large row sizes.
    pub fn container_height(&self, settings: &GridSettings) -> i64 {
        i64::from(self.total_rows).saturating_mul(settings.row_pitch())
    }

    pub fn position_of(&self, id: &WidgetId) -> Option<GridPosition> {
        self.placements
            .iter()
            .find(|placed| &placed.widget.id == id)
            .map(|placed| placed.position)
    }

    pub fn frames<'a>(
        &'a self,
        settings: &'a GridSettings,
    ) -> impl Iterator<Item = (&'a PlacedWidget, CellFrame)> + 'a {
        self.placements
            .iter()
            .map(move |placed| (placed, CellFrame::new(&placed.position, settings)))
    }
}

/// Rejects widgets whose footprint is empty or larger than
/// [`MAX_WIDGET_SPAN`] on either side.
///
/// Each widget ends at most `height + 1` rows below the lowest row used
/// before it, so the sum of those bounds must fit in the row space too.
/// Duplicate ids are allowed but logged, since renderers key cells by id.
pub fn validate_widgets(widgets: &[Widget]) -> Result<(), LayoutError> {
    let span = 1..=MAX_WIDGET_SPAN;
    let mut row_budget: u32 = 0;
    let mut seen = HashSet::default();
    for widget in widgets {
        let budget = row_budget
            .checked_add(widget.height.saturating_add(2))
            .filter(|_| span.contains(&widget.width) && span.contains(&widget.height));
        let Some(budget) = budget else {
            return Err(LayoutError::InvalidWidget {
                id: widget.id.clone(),
                width: widget.width,
                height: widget.height,
            });
        };
        row_budget = budget;
        if !seen.insert(&widget.id) {
            warn!(id = %widget.id, "duplicate widget id");
        }
    }
    Ok(())
}

/// Runs a full layout pass over `widgets` on a grid `fitting_columns` wide.
pub fn compute_layout(
    widgets: &[Widget],
    fitting_columns: u32,
) -> Result<GridLayout, LayoutError> {
    validate_widgets(widgets)?;
    Ok(compute_layout_classified(widgets, &classify(widgets), fitting_columns))
}

fn hint_row(widget: &Widget) -> Option<u32> {
    match widget.placement {
        Placement::Positioned { row, .. } => Some(row),
        Placement::Unpositioned => None,
    }
}

/// Layout pass over widgets that were already validated and classified.
#[instrument(
    level = "debug",
    skip_all,
    fields(widgets = classification.len(), fitting_columns = fitting_columns)
)]
pub(super) fn compute_layout_classified(
    widgets: &[Widget],
    classification: &Classification,
    fitting_columns: u32,
) -> GridLayout {
    let mut grid = OccupancyGrid::new(fitting_columns);
    let fitting_columns = grid.fitting_columns();
    let mut placements = Vec::with_capacity(classification.len());

    let mut row = 0;
    let mut column = 0;
    let mut group = None;

    for (n, &index) in classification.arranged.iter().enumerate() {
        let widget = &widgets[index];
        let hint = hint_row(widget);
        if n == 0 || hint != group {
            group = hint;
            row = if n == 0 { 0 } else { row + 1 };
            column = 0;
        }

        let position = determine_position(&grid, widget, row, column);
        trace!("arranged widget {} at {position:?}", widget.id);
        grid.occupy(&position);
        column = position.column + position.width;
        placements.push(PlacedWidget { widget: widget.clone(), position });
    }

    // Auto widgets start on a fresh row below the arranged ones.
    if !classification.arranged.is_empty() {
        row += 1;
        column = 0;
    }

    for &index in &classification.auto {
        let widget = &widgets[index];
        let position = determine_position(&grid, widget, row, column);
        trace!("auto widget {} at {position:?}", widget.id);
        grid.occupy(&position);
        row = position.row;
        column = position.column + position.width;
        placements.push(PlacedWidget { widget: widget.clone(), position });
    }

    let total_rows = grid.total_rows();
    debug!(placed = placements.len(), total_rows, "layout pass complete");

    GridLayout {
        fitting_columns,
        placements,
        total_rows,
    }
}

/// Inputs derived for the current pass. Recomputed whenever the widgets or
/// the column count change, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    pub fitting_columns: u32,
    pub classification: Classification,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    WidgetsChanged(Vec<Widget>),
    ViewportResized { width: i64 },
}

#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Whether a new layout was computed.
    pub relaid_out: bool,
}

/// Keeps the layout of one dashboard grid current.
///
/// Every widget change and every resize that changes the number of fitting
/// columns runs a full layout pass from scratch.
#[derive(Debug, Clone)]
pub struct GridLayoutEngine {
    settings: GridSettings,
    widgets: Vec<Widget>,
    state: LayoutState,
    layout: GridLayout,
}

impl GridLayoutEngine {
    pub fn new(
        settings: GridSettings,
        widgets: Vec<Widget>,
        viewport_width: i64,
    ) -> Result<Self, LayoutError> {
        settings.validate()?;
        validate_widgets(&widgets)?;
        let fitting_columns =
            fitting_columns(viewport_width, settings.column_size, settings.margin)?;
        let classification = classify(&widgets);
        let layout = compute_layout_classified(&widgets, &classification, fitting_columns);
        Ok(Self {
            settings,
            widgets,
            state: LayoutState { fitting_columns, classification },
            layout,
        })
    }

    pub fn settings(&self) -> &GridSettings { &self.settings }

    pub fn widgets(&self) -> &[Widget] { &self.widgets }

    pub fn state(&self) -> &LayoutState { &self.state }

    pub fn layout(&self) -> &GridLayout { &self.layout }

    pub fn fitting_columns(&self) -> u32 { self.state.fitting_columns }

    pub fn container_height(&self) -> i64 { self.layout.container_height(&self.settings) }

    pub fn handle_event(&mut self, event: LayoutEvent) -> Result<EventResponse, LayoutError> {
        match event {
            LayoutEvent::WidgetsChanged(widgets) => self.set_widgets(widgets),
            LayoutEvent::ViewportResized { width } => self.resize(width),
        }
    }

    /// Replaces the widget collection. Invalid widgets leave the current
    /// layout untouched.
    pub fn set_widgets(&mut self, widgets: Vec<Widget>) -> Result<EventResponse, LayoutError> {
        validate_widgets(&widgets)?;
        self.state.classification = classify(&widgets);
        self.widgets = widgets;
        self.relayout();
        Ok(EventResponse { relaid_out: true })
    }

    pub fn resize(&mut self, viewport_width: i64) -> Result<EventResponse, LayoutError> {
        let fitting_columns =
            fitting_columns(viewport_width, self.settings.column_size, self.settings.margin)?;
        if fitting_columns == self.state.fitting_columns {
            trace!(viewport_width, fitting_columns, "resize keeps column count");
            return Ok(EventResponse::default());
        }
        debug!(
            viewport_width,
            from = self.state.fitting_columns,
            to = fitting_columns,
            "column count changed"
        );
        self.state.fitting_columns = fitting_columns;
        self.relayout();
        Ok(EventResponse { relaid_out: true })
    }

    fn relayout(&mut self) {
        self.layout = compute_layout_classified(
            &self.widgets,
            &self.state.classification,
            self.state.fitting_columns,
        );
    }
}
