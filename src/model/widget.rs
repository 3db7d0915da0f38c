use std::fmt;

use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self { Self::new(id) }
}

impl From<String> for WidgetId {
    fn from(id: String) -> Self { Self(id) }
}

/// Where a widget asked to be placed.
///
/// The row and column of a positioned widget are ordering and grouping
/// hints, not literal grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Positioned { row: u32, column: u32 },
    Unpositioned,
}

impl Placement {
    pub fn is_positioned(&self) -> bool { matches!(self, Placement::Positioned { .. }) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub id: WidgetId,
    pub placement: Placement,
    /// Footprint width in grid cells.
    pub width: u32,
    /// Footprint height in grid cells.
    pub height: u32,
}

impl Widget {
    pub fn positioned(
        id: impl Into<WidgetId>,
        row: u32,
        column: u32,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            placement: Placement::Positioned { row, column },
            width,
            height,
        }
    }

    pub fn unpositioned(id: impl Into<WidgetId>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            placement: Placement::Unpositioned,
            width,
            height,
        }
    }
}

// Dashboard configurations store widgets as `{id, row, col, width, height}`,
// where `row = 0` means the widget has no explicit placement.
impl Serialize for Widget {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        #[derive(Serialize)]
        struct WidgetSer<'a> {
            id: &'a WidgetId,
            row: u32,
            col: u32,
            width: u32,
            height: u32,
        }

        let (row, col) = match self.placement {
            Placement::Positioned { row: 0, .. } => {
                return Err(S::Error::custom(format!(
                    "widget {} is positioned at row 0, which the stored format reserves for \
                     unpositioned widgets",
                    self.id
                )));
            }
            Placement::Positioned { row, column } => (row, column),
            Placement::Unpositioned => (0, 0),
        };

        let helper = WidgetSer {
            id: &self.id,
            row,
            col,
            width: self.width,
            height: self.height,
        };

        helper.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Widget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        #[derive(Deserialize)]
        struct WidgetDe {
            id: WidgetId,
            #[serde(default)]
            row: u32,
            #[serde(default, alias = "column")]
            col: u32,
            width: u32,
            height: u32,
        }

        let helper = WidgetDe::deserialize(deserializer)?;
        let placement = match helper.row {
            0 => Placement::Unpositioned,
            row => Placement::Positioned { row, column: helper.col },
        };

        Ok(Widget {
            id: helper.id,
            placement,
            width: helper.width,
            height: helper.height,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn row_zero_deserializes_as_unpositioned() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "w1", "row": 0, "col": 3, "width": 1, "height": 2,
        }))
        .expect("deserialize widget");
        assert_eq!(widget, Widget::unpositioned("w1", 1, 2));
    }

    #[test]
    fn missing_row_is_unpositioned() {
        let widget: Widget =
            serde_json::from_value(json!({ "id": "w1", "width": 2, "height": 1 }))
                .expect("deserialize widget");
        assert_eq!(widget.placement, Placement::Unpositioned);
    }

    #[test]
    fn non_zero_row_keeps_hint() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "w2", "row": 3, "column": 1, "width": 2, "height": 1,
        }))
        .expect("deserialize widget");
        assert_eq!(widget.placement, Placement::Positioned { row: 3, column: 1 });
    }

    #[test]
    fn serializes_with_stored_shape() {
        let value = serde_json::to_value(Widget::positioned("w", 2, 1, 3, 4))
            .expect("serialize widget");
        assert_eq!(
            value,
            json!({ "id": "w", "row": 2, "col": 1, "width": 3, "height": 4 })
        );

        let value =
            serde_json::to_value(Widget::unpositioned("u", 1, 1)).expect("serialize widget");
        assert_eq!(
            value,
            json!({ "id": "u", "row": 0, "col": 0, "width": 1, "height": 1 })
        );
    }

    #[test]
    fn positioned_row_zero_cannot_be_stored() {
        let result = serde_json::to_value(Widget::positioned("w", 0, 0, 1, 1));
        assert!(result.is_err());
    }

    #[test]
    fn dashboard_defaults_optional_fields() {
        let dashboard: Dashboard = serde_json::from_value(json!({
            "id": "dash",
            "widgets": [{ "id": "a", "row": 1, "col": 0, "width": 1, "height": 1 }],
        }))
        .expect("deserialize dashboard");
        assert_eq!(dashboard.title, "");
        assert_eq!(dashboard.widgets, vec![Widget::positioned("a", 1, 0, 1, 1)]);
    }
}
