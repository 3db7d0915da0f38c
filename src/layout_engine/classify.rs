use crate::model::widget::{Placement, Widget};

/// Widgets split into the order a layout pass visits them.
///
/// Entries are indices into the widget slice that was classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Widgets with a placement hint, sorted by `(row, column)`. Equal hints
    /// keep their input order.
    pub arranged: Vec<usize>,
    /// Widgets without a placement hint, in input order.
    pub auto: Vec<usize>,
}

impl Classification {
    pub fn len(&self) -> usize { self.arranged.len() + self.auto.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

pub fn classify(widgets: &[Widget]) -> Classification {
    let mut arranged = Vec::new();
    let mut auto = Vec::new();
    for (index, widget) in widgets.iter().enumerate() {
        match widget.placement {
            Placement::Positioned { row, column } => arranged.push((row, column, index)),
            Placement::Unpositioned => auto.push(index),
        }
    }
    // Stable, so identical hints stay in input order.
    arranged.sort_by_key(|&(row, column, _)| (row, column));

    Classification {
        arranged: arranged.into_iter().map(|(_, _, index)| index).collect(),
        auto,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn splits_and_sorts_by_hint() {
        let widgets = vec![
            Widget::unpositioned("a0", 1, 1),
            Widget::positioned("r2c0", 2, 0, 1, 1),
            Widget::positioned("r1c1", 1, 1, 1, 1),
            Widget::unpositioned("a1", 1, 1),
            Widget::positioned("r1c0", 1, 0, 1, 1),
        ];

        let classification = classify(&widgets);
        assert_eq!(classification.arranged, vec![4, 2, 1]);
        assert_eq!(classification.auto, vec![0, 3]);
        assert_eq!(classification.len(), 5);
    }

    #[test]
    fn identical_hints_keep_input_order() {
        let widgets = vec![
            Widget::positioned("first", 3, 1, 1, 1),
            Widget::positioned("other", 1, 0, 1, 1),
            Widget::positioned("second", 3, 1, 1, 1),
        ];
        assert_eq!(classify(&widgets).arranged, vec![1, 0, 2]);
    }

    #[test]
    fn empty_input() {
        let classification = classify(&[]);
        assert!(classification.is_empty());
    }
}
