//! Plain-text rendering of a distance field

use crate::algorithm::board::Board;

/// Marker for open cells with no route to an exit
pub const UNREACHABLE_MARK: &str = "—";
/// Marker for obstacles
pub const OBSTACLE_MARK: &str = "#";

/// Render the field as one line per row (`y`), columns separated by spaces
///
/// Costs are right-aligned to the widest value on the board. Obstacles show
/// as `#` and unreachable open cells as `—`.
pub fn render_field(board: &Board) -> String {
    let grid = board.grid();
    let cells: Vec<Vec<String>> = (0..board.height())
        .map(|y| {
            (0..board.width())
                .map(|x| {
                    if grid.is_blocked([x, y]).unwrap_or(false) {
                        OBSTACLE_MARK.to_string()
                    } else {
                        grid.get_cost([x, y])
                            .ok()
                            .flatten()
                            .map_or_else(|| UNREACHABLE_MARK.to_string(), |c| c.to_string())
                    }
                })
                .collect()
        })
        .collect();

    let column_width = cells
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for row in &cells {
        let line = row
            .iter()
            .map(|cell| format!("{cell:>column_width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
