//! Pattern compiler: text to a 7 x W intensity matrix
//!
//! Glyphs are laid side by side, each followed by one blank separator column.
//! Row `d` of the matrix is weekday `d` counted from the start date and
//! column `w` is the week offset.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{GraphError, Result};
use crate::font::{Font, DAYS_IN_WEEK};

/// Compiled day-by-week intensity grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntensityMatrix {
    rows: [Vec<u8>; DAYS_IN_WEEK],
}

impl IntensityMatrix {
    /// Number of week columns
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    /// Intensity for a weekday row and week column
    pub fn get(&self, day: usize, week: usize) -> Option<u8> {
        self.rows.get(day)?.get(week).copied()
    }

    pub fn row(&self, day: usize) -> &[u8] {
        &self.rows[day]
    }

    pub fn rows(&self) -> &[Vec<u8>; DAYS_IN_WEEK] {
        &self.rows
    }

    /// Sum of every cell
    pub fn total(&self) -> u64 {
        self.rows.iter().flatten().map(|&c| u64::from(c)).sum()
    }

    /// Number of cells (7 x width)
    pub fn area(&self) -> usize {
        self.width() * DAYS_IN_WEEK
    }
}

/// Compile `text` with `font`.
///
/// Every character is checked before anything is built, so an unsupported
/// character never yields a partial matrix. Empty text gives a zero-width
/// matrix.
pub fn compile(text: &str, font: &Font) -> Result<IntensityMatrix> {
    let glyphs = text
        .chars()
        .map(|ch| {
            font.lookup(ch).ok_or_else(|| GraphError::UnsupportedCharacter {
                character: ch,
                charset: Arc::new(font.charset_display()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let width: usize = glyphs.iter().map(|g| g.width() + 1).sum();
    let mut rows: [Vec<u8>; DAYS_IN_WEEK] = std::array::from_fn(|_| Vec::with_capacity(width));

    for glyph in &glyphs {
        for (day, row) in rows.iter_mut().enumerate() {
            row.extend_from_slice(glyph.row(day));
            row.push(0);
        }
    }

    debug!(
        "Compiled {} characters into a {}x{} matrix",
        glyphs.len(),
        DAYS_IN_WEEK,
        width
    );
    Ok(IntensityMatrix { rows })
}
