use serde::{Deserialize, Serialize};

use crate::common::config::GridSettings;
use crate::layout_engine::{CellFrame, GridLayout};
use crate::model::widget::WidgetId;

/// Serializable form of a layout, as handed to cell renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_id: Option<String>,
    pub fitting_columns: u32,
    pub total_rows: u32,
    pub container_height: i64,
    pub settings: GridSettings,
    pub widgets: Vec<PlacedWidgetData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWidgetData {
    pub id: WidgetId,
    pub row: u32,
    pub column: u32,
    pub width: u32,
    pub height: u32,
    pub frame: CellFrame,
}

impl LayoutData {
    pub fn new(
        dashboard_id: Option<String>,
        layout: &GridLayout,
        settings: &GridSettings,
    ) -> Self {
        Self {
            dashboard_id,
            fitting_columns: layout.fitting_columns,
            total_rows: layout.total_rows,
            container_height: layout.container_height(settings),
            settings: *settings,
            widgets: layout
                .frames(settings)
                .map(|(placed, frame)| PlacedWidgetData {
                    id: placed.widget.id.clone(),
                    row: placed.position.row,
                    column: placed.position.column,
                    width: placed.position.width,
                    height: placed.position.height,
                    frame,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::layout_engine::compute_layout;
    use crate::model::widget::Widget;

    #[test]
    fn layout_data_serializes_with_frames() {
        let widgets = vec![Widget::positioned("a", 1, 0, 2, 1), Widget::unpositioned("b", 1, 1)];
        let layout = compute_layout(&widgets, 2).expect("layout");
        let data = LayoutData::new(Some("dash".into()), &layout, &GridSettings::default());

        let value = serde_json::to_value(&data).expect("serialize LayoutData");
        let expected = json!({
            "dashboard_id": "dash",
            "fitting_columns": 2,
            "total_rows": 2,
            "container_height": 420,
            "settings": { "row_size": 200, "column_size": 400, "margin": 10 },
            "widgets": [
                {
                    "id": "a", "row": 0, "column": 0, "width": 2, "height": 1,
                    "frame": { "x": 0, "y": 0, "width": 810, "height": 200 },
                },
                {
                    "id": "b", "row": 1, "column": 0, "width": 1, "height": 1,
                    "frame": { "x": 0, "y": 210, "width": 400, "height": 200 },
                },
            ],
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn dashboard_id_is_omitted_when_absent() {
        let layout = compute_layout(&[], 1).expect("layout");
        let value = serde_json::to_value(LayoutData::new(None, &layout, &GridSettings::default()))
            .expect("serialize LayoutData");
        assert!(value.get("dashboard_id").is_none());
    }
}
