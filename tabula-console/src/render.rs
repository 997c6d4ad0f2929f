//! Text rendering of a board view.
//!
//! ```text
//!    A B C D E F G H
//!  8 r n b q k b n r  8
//!  7 p p p p p p p p  7
//!  ...
//!    A B C D E F G H
//! ```
//!
//! Hex boards use the same grid with staggered cells and blank margins.

use tabula_core::{BoardView, Cell, Topology, VariantRules};

const EMPTY: char = '.';
const OFF: char = ' ';

/// Draw the board with column letters above and below and row numbers on
/// both sides where the shape has them.
pub fn render(view: &BoardView, topology: &dyn Topology, rules: &dyn VariantRules) -> String {
    let columns: Vec<String> = (0..view.width())
        .map(|c| topology.column_label(c).to_string())
        .collect();
    let header = format!("    {}", columns.join(" "));

    let mut out = String::new();
    out.push_str(header.trim_end());
    out.push('\n');

    for (index, row) in view.rows().enumerate() {
        let label = topology.row_label(index as u8).unwrap_or_default();
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::Off => OFF,
                Cell::Empty => EMPTY,
                Cell::Occupied(piece) => rules.symbol(*piece),
            })
            .map(String::from)
            .collect();
        let line = format!("{label:>2}  {}  {label}", cells.join(" "));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(header.trim_end());
    out.push('\n');
    out
}
