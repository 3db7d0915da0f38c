//! Plain-text cell map of a layout, one line per grid row.

use crate::layout_engine::GridLayout;

const MAX_LABEL_WIDTH: usize = 8;
const EMPTY_CELL: char = '.';

pub fn render(layout: &GridLayout) -> String {
    let columns = layout.fitting_columns as usize;
    let rows = layout.total_rows as usize;

    let labels: Vec<String> = layout
        .placements
        .iter()
        .map(|placed| placed.widget.id.as_str().chars().take(MAX_LABEL_WIDTH).collect())
        .collect();
    let cell_width = labels.iter().map(|label| label.chars().count()).max().unwrap_or(1).max(1);

    let mut cells: Vec<Option<usize>> = vec![None; rows * columns];
    for (index, placed) in layout.placements.iter().enumerate() {
        for row in placed.position.rows() {
            for column in placed.position.columns() {
                cells[row as usize * columns + column as usize] = Some(index);
            }
        }
    }

    let mut out = String::new();
    for row in cells.chunks(columns.max(1)) {
        let line = row
            .iter()
            .map(|cell| match cell {
                Some(index) => format!("{:<cell_width$}", labels[*index]),
                None => format!("{EMPTY_CELL:<cell_width$}"),
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::compute_layout;
    use crate::model::widget::Widget;

    #[test]
    fn renders_cell_map() {
        let widgets = vec![
            Widget::positioned("cpu", 1, 0, 2, 1),
            Widget::unpositioned("mem", 1, 2),
            Widget::unpositioned("io", 1, 1),
        ];
        let layout = compute_layout(&widgets, 3).expect("layout");
        assert_eq!(render(&layout), "cpu cpu .\nmem io  .\nmem .   .\n");
    }

    #[test]
    fn long_ids_are_truncated() {
        let widgets = vec![Widget::unpositioned("throughput-by-node", 1, 1)];
        let layout = compute_layout(&widgets, 2).expect("layout");
        assert_eq!(render(&layout), "throughp .\n");
    }
}
