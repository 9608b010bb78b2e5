//! Progress projection for live rendering
//!
//! Pure functions; nothing here is persisted or affects the schedule.

/// Shading symbols from faintest to most intense
pub const DEFAULT_SYMBOLS: [char; 4] = ['░', '▒', '▓', '█'];

/// Share of cells processed, in `[0, 1]`.
///
/// `cells_passed` is 1-indexed. An empty drawing counts as complete.
pub fn overall_progress(cells_passed: usize, total_cells: usize) -> f64 {
    if total_cells == 0 {
        return 1.0;
    }
    (cells_passed as f64 / total_cells as f64).clamp(0.0, 1.0)
}

/// Symbol for the `commit_index`-th commit of a day with `commits_per_day`
/// commits, spreading the day's commits linearly over the symbol set.
///
/// Returns `None` only when `symbols` is empty.
pub fn intensity_symbol(commit_index: u32, commits_per_day: u32, symbols: &[char]) -> Option<char> {
    let last = symbols.len().checked_sub(1)?;

    // A single commit has no range to interpolate over.
    if commits_per_day <= 1 {
        return Some(symbols[last]);
    }

    let span = f64::from(commits_per_day - 1);
    let position = f64::from(commit_index) * last as f64 / span;
    let index = (position.floor() as usize).min(last);
    Some(symbols[index])
}
