//! Text rendering of a compiled matrix, used by `--preview`

use crate::font::MAX_INTENSITY;
use crate::pattern::IntensityMatrix;

/// Symbol for one matrix cell.
///
/// Blank cells render as a space. Non-zero intensities take the last
/// symbols of the set, full intensity being the last one; a set shorter than
/// three symbols repeats its first symbol for the faintest levels.
fn cell_symbol(cell: u8, symbols: &[char]) -> char {
    if cell == 0 {
        return ' ';
    }
    let Some(last) = symbols.len().checked_sub(1) else {
        return ' ';
    };
    let from_top = usize::from(MAX_INTENSITY.saturating_sub(cell));
    symbols[last.saturating_sub(from_top)]
}

/// Render each weekday row as a line of shading symbols
pub fn preview(matrix: &IntensityMatrix, symbols: &[char]) -> String {
    matrix
        .rows()
        .iter()
        .map(|row| row.iter().map(|&cell| cell_symbol(cell, symbols)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
