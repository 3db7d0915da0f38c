use tracing::{debug, info, warn};

use super::resize::{ResizeSource, ResizeSubscription};
use crate::common::config::GridSettings;
use crate::layout_engine::{
    CellFrame, EventResponse, GridLayout, GridLayoutEngine, LayoutError, LayoutEvent,
    PlacedWidget,
};
use crate::model::widget::{Dashboard, Widget};

/// A dashboard grid as mounted in a host view.
///
/// While active it holds a resize subscription and re-lays out its widgets
/// whenever the number of fitting columns changes.
pub struct GridView {
    dashboard_id: String,
    engine: GridLayoutEngine,
    subscription: Option<ResizeSubscription>,
}

impl GridView {
    pub fn new(
        dashboard_id: impl Into<String>,
        settings: GridSettings,
        widgets: Vec<Widget>,
        viewport_width: i64,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            dashboard_id: dashboard_id.into(),
            engine: GridLayoutEngine::new(settings, widgets, viewport_width)?,
            subscription: None,
        })
    }

    pub fn for_dashboard(
        dashboard: Dashboard,
        settings: GridSettings,
        viewport_width: i64,
    ) -> Result<Self, LayoutError> {
        Self::new(dashboard.id, settings, dashboard.widgets, viewport_width)
    }

    pub fn dashboard_id(&self) -> &str { &self.dashboard_id }

    pub fn engine(&self) -> &GridLayoutEngine { &self.engine }

    pub fn layout(&self) -> &GridLayout { self.engine.layout() }

    pub fn container_height(&self) -> i64 { self.engine.container_height() }

    pub fn is_active(&self) -> bool { self.subscription.is_some() }

    pub fn activate(&mut self, source: &dyn ResizeSource) {
        if self.is_active() {
            warn!(dashboard = %self.dashboard_id, "grid is already active");
            return;
        }
        info!(dashboard = %self.dashboard_id, "grid activated");
        self.subscription = Some(source.subscribe());
    }

    pub fn deactivate(&mut self) {
        if self.subscription.take().is_some() {
            info!(dashboard = %self.dashboard_id, "grid deactivated");
        }
    }

    /// Applies the most recent pending resize, if any.
    pub fn process_resizes(&mut self) -> Result<EventResponse, LayoutError> {
        let Some(resized) = self.subscription.as_ref().and_then(ResizeSubscription::latest)
        else {
            return Ok(EventResponse::default());
        };
        debug!(dashboard = %self.dashboard_id, width = resized.width, "processing resize");
        self.engine.handle_event(LayoutEvent::ViewportResized { width: resized.width })
    }

    pub fn set_widgets(&mut self, widgets: Vec<Widget>) -> Result<EventResponse, LayoutError> {
        self.engine.handle_event(LayoutEvent::WidgetsChanged(widgets))
    }

    /// Placed widgets with their pixel frames, in placement order.
    pub fn cells(&self) -> Vec<(&PlacedWidget, CellFrame)> {
        self.engine.layout().frames(self.engine.settings()).collect()
    }
}

impl Drop for GridView {
    fn drop(&mut self) { self.deactivate(); }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::actor::resize::ResizeNotifier;
    use crate::layout_engine::GridPosition;
    use crate::model::widget::WidgetId;

    fn widgets() -> Vec<Widget> {
        vec![
            Widget::positioned("a", 1, 0, 1, 1),
            Widget::positioned("b", 1, 1, 1, 1),
            Widget::positioned("c", 1, 2, 1, 1),
            Widget::unpositioned("d", 2, 1),
        ]
    }

    #[test_log::test]
    fn resize_while_active_relayouts() {
        let notifier = ResizeNotifier::new();
        let mut view = GridView::new("dash", GridSettings::default(), widgets(), 1230).unwrap();
        assert_eq!(
            view.layout().position_of(&WidgetId::from("c")),
            Some(GridPosition::new(0, 2, 1, 1))
        );

        view.activate(&notifier);
        assert!(view.is_active());
        assert_eq!(notifier.subscriber_count(), 1);

        notifier.notify(900);
        notifier.notify(820);
        let response = view.process_resizes().unwrap();
        assert!(response.relaid_out);
        assert_eq!(view.layout().fitting_columns, 2);
        for (placed, _) in view.cells() {
            assert!(placed.position.column + placed.position.width <= 2);
        }
        assert_eq!(
            view.layout().position_of(&WidgetId::from("c")),
            Some(GridPosition::new(1, 0, 1, 1))
        );
    }

    #[test]
    fn resize_within_same_column_count_is_ignored() {
        let notifier = ResizeNotifier::new();
        let mut view = GridView::new("dash", GridSettings::default(), widgets(), 1230).unwrap();
        view.activate(&notifier);

        notifier.notify(1300);
        assert!(!view.process_resizes().unwrap().relaid_out);
        assert!(!view.process_resizes().unwrap().relaid_out);
    }

    #[test]
    fn deactivated_grid_ignores_resizes() {
        let notifier = ResizeNotifier::new();
        let mut view = GridView::new("dash", GridSettings::default(), widgets(), 1230).unwrap();
        view.activate(&notifier);
        view.deactivate();
        assert!(!view.is_active());
        assert_eq!(notifier.subscriber_count(), 0);

        notifier.notify(400);
        assert!(!view.process_resizes().unwrap().relaid_out);
        assert_eq!(view.layout().fitting_columns, 3);
    }

    #[test]
    fn activation_is_not_repeated() {
        let notifier = ResizeNotifier::new();
        let mut view = GridView::new("dash", GridSettings::default(), widgets(), 1230).unwrap();
        view.activate(&notifier);
        view.activate(&notifier);
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn dropping_view_releases_subscription() {
        let notifier = ResizeNotifier::new();
        {
            let mut view =
                GridView::new("dash", GridSettings::default(), widgets(), 1230).unwrap();
            view.activate(&notifier);
            assert_eq!(notifier.subscriber_count(), 1);
        }
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn cells_carry_pixel_frames() {
        let dashboard = Dashboard {
            id: "dash".into(),
            title: "Overview".into(),
            description: String::new(),
            widgets: widgets(),
        };
        let view = GridView::for_dashboard(dashboard, GridSettings::default(), 1230).unwrap();
        assert_eq!(view.dashboard_id(), "dash");

        let frames: Vec<_> = view
            .cells()
            .into_iter()
            .map(|(placed, frame)| (placed.widget.id.as_str(), frame))
            .collect();
        assert_eq!(frames, vec![
            ("a", CellFrame { x: 0, y: 0, width: 400, height: 200 }),
            ("b", CellFrame { x: 410, y: 0, width: 400, height: 200 }),
            ("c", CellFrame { x: 820, y: 0, width: 400, height: 200 }),
            ("d", CellFrame { x: 0, y: 210, width: 810, height: 200 }),
        ]);
        assert_eq!(view.container_height(), 420);
    }

    #[test]
    fn invalid_widget_update_is_reported() {
        let mut view = GridView::new("dash", GridSettings::default(), widgets(), 1230).unwrap();
        let result = view.set_widgets(vec![Widget::unpositioned("zero", 0, 0)]);
        assert!(matches!(result, Err(LayoutError::InvalidWidget { .. })));
        assert_eq!(view.layout().placements.len(), 4);
    }
}
