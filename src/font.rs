//! Glyph font table
//!
//! Every glyph is exactly seven rows tall, one row per weekday of the
//! contribution graph. Rows hold intensity cells: `'0'..='3'` or a blank
//! `' '`, which counts as zero. Widths vary between glyphs but every row of a
//! single glyph has the same width.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{GraphError, Result};

/// Rows per glyph (days in a week)
pub const DAYS_IN_WEEK: usize = 7;

/// Highest intensity a glyph cell may hold
pub const MAX_INTENSITY: u8 = 3;

/// Built-in 5x7 font. Strokes use full intensity.
const BUILTIN_GLYPHS: &[(char, [&str; DAYS_IN_WEEK])] = &[
    ('A', [" 333 ", "3   3", "3   3", "33333", "3   3", "3   3", "3   3"]),
    ('B', ["3333 ", "3   3", "3   3", "3333 ", "3   3", "3   3", "3333 "]),
    ('C', [" 333 ", "3   3", "3    ", "3    ", "3    ", "3   3", " 333 "]),
    ('D', ["333  ", "3  3 ", "3   3", "3   3", "3   3", "3  3 ", "333  "]),
    ('E', ["33333", "3    ", "3    ", "3333 ", "3    ", "3    ", "33333"]),
    ('F', ["33333", "3    ", "3    ", "3333 ", "3    ", "3    ", "3    "]),
    ('G', [" 333 ", "3   3", "3    ", "3 333", "3   3", "3   3", " 3333"]),
    ('H', ["3   3", "3   3", "3   3", "33333", "3   3", "3   3", "3   3"]),
    ('I', ["333", " 3 ", " 3 ", " 3 ", " 3 ", " 3 ", "333"]),
    ('J', ["  333", "   3 ", "   3 ", "   3 ", "   3 ", "3  3 ", " 33  "]),
    ('K', ["3   3", "3  3 ", "3 3  ", "33   ", "3 3  ", "3  3 ", "3   3"]),
    ('L', ["3    ", "3    ", "3    ", "3    ", "3    ", "3    ", "33333"]),
    ('M', ["3   3", "33 33", "3 3 3", "3 3 3", "3   3", "3   3", "3   3"]),
    ('N', ["3   3", "3   3", "33  3", "3 3 3", "3  33", "3   3", "3   3"]),
    ('O', [" 333 ", "3   3", "3   3", "3   3", "3   3", "3   3", " 333 "]),
    ('P', ["3333 ", "3   3", "3   3", "3333 ", "3    ", "3    ", "3    "]),
    ('Q', [" 333 ", "3   3", "3   3", "3   3", "3 3 3", "3  3 ", " 33 3"]),
    ('R', ["3333 ", "3   3", "3   3", "3333 ", "3 3  ", "3  3 ", "3   3"]),
    ('S', [" 3333", "3    ", "3    ", " 333 ", "    3", "    3", "3333 "]),
    ('T', ["33333", "  3  ", "  3  ", "  3  ", "  3  ", "  3  ", "  3  "]),
    ('U', ["3   3", "3   3", "3   3", "3   3", "3   3", "3   3", " 333 "]),
    ('V', ["3   3", "3   3", "3   3", "3   3", "3   3", " 3 3 ", "  3  "]),
    ('W', ["3   3", "3   3", "3   3", "3 3 3", "3 3 3", "3 3 3", " 3 3 "]),
    ('X', ["3   3", "3   3", " 3 3 ", "  3  ", " 3 3 ", "3   3", "3   3"]),
    ('Y', ["3   3", "3   3", " 3 3 ", "  3  ", "  3  ", "  3  ", "  3  "]),
    ('Z', ["33333", "    3", "   3 ", "  3  ", " 3   ", "3    ", "33333"]),
    ('0', [" 333 ", "3   3", "3  33", "3 3 3", "33  3", "3   3", " 333 "]),
    ('1', [" 3 ", "33 ", " 3 ", " 3 ", " 3 ", " 3 ", "333"]),
    ('2', [" 333 ", "3   3", "    3", "   3 ", "  3  ", " 3   ", "33333"]),
    ('3', ["33333", "   3 ", "  3  ", "   3 ", "    3", "3   3", " 333 "]),
    ('4', ["   3 ", "  33 ", " 3 3 ", "3  3 ", "33333", "   3 ", "   3 "]),
    ('5', ["33333", "3    ", "3333 ", "    3", "    3", "3   3", " 333 "]),
    ('6', ["  33 ", " 3   ", "3    ", "3333 ", "3   3", "3   3", " 333 "]),
    ('7', ["33333", "    3", "   3 ", "  3  ", " 3   ", " 3   ", " 3   "]),
    ('8', [" 333 ", "3   3", "3   3", " 333 ", "3   3", "3   3", " 333 "]),
    ('9', [" 333 ", "3   3", "3   3", " 3333", "    3", "   3 ", " 33  "]),
    ('!', ["3", "3", "3", "3", "3", " ", "3"]),
    ('?', [" 333 ", "3   3", "    3", "   3 ", "  3  ", "     ", "  3  "]),
    ('.', [" ", " ", " ", " ", " ", " ", "3"]),
    (',', ["  ", "  ", "  ", "  ", "  ", " 3", "3 "]),
    ('-', ["   ", "   ", "   ", "333", "   ", "   ", "   "]),
    (':', [" ", "3", " ", " ", " ", "3", " "]),
    ('\'', ["3", "3", " ", " ", " ", " ", " "]),
    ('♥', ["     ", " 2 2 ", "23332", "23332", "12321", " 121 ", "  1  "]),
];

/// A single character template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: [Vec<u8>; DAYS_IN_WEEK],
}

impl Glyph {
    /// Parse a glyph from its seven row strings
    pub fn parse<S: AsRef<str>>(ch: char, rows: &[S]) -> Result<Self> {
        if rows.len() != DAYS_IN_WEEK {
            return Err(GraphError::font(format!(
                "glyph '{ch}' has {} rows, expected {DAYS_IN_WEEK}",
                rows.len()
            )));
        }

        let mut parsed: [Vec<u8>; DAYS_IN_WEEK] = Default::default();
        for (slot, row) in parsed.iter_mut().zip(rows) {
            *slot = row
                .as_ref()
                .chars()
                .map(|cell| parse_cell(ch, cell))
                .collect::<Result<Vec<_>>>()?;
        }

        let width = parsed[0].len();
        if parsed.iter().any(|row| row.len() != width) {
            return Err(GraphError::font(format!(
                "glyph '{ch}' has inconsistent row widths"
            )));
        }

        Ok(Self { rows: parsed })
    }

    /// Seven blank rows of width one
    pub fn blank() -> Self {
        Self {
            rows: std::array::from_fn(|_| vec![0]),
        }
    }

    /// Number of columns (weeks) the glyph occupies
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Intensity cells of one weekday row
    pub fn row(&self, day: usize) -> &[u8] {
        &self.rows[day]
    }

    pub fn rows(&self) -> &[Vec<u8>; DAYS_IN_WEEK] {
        &self.rows
    }
}

fn parse_cell(ch: char, cell: char) -> Result<u8> {
    match cell {
        ' ' => Ok(0),
        '0'..='3' => Ok(cell as u8 - b'0'),
        other => Err(GraphError::font(format!(
            "glyph '{ch}' contains invalid cell '{other}' (expected ' ' or 0-{MAX_INTENSITY})"
        ))),
    }
}

/// Immutable character to glyph mapping, built once and passed around
#[derive(Debug, Clone)]
pub struct Font {
    glyphs: BTreeMap<char, Glyph>,
}

impl Font {
    /// The bundled font
    pub fn builtin() -> Self {
        let glyphs = BUILTIN_GLYPHS
            .iter()
            .map(|(ch, rows)| Glyph::parse(*ch, &rows[..]).map(|g| (*ch, g)));

        // Entries are checked by the tests below; a bad one is skipped.
        let mut map = BTreeMap::new();
        for entry in glyphs {
            match entry {
                Ok((ch, glyph)) => {
                    map.insert(ch, glyph);
                }
                Err(e) => debug!("Skipping built-in glyph: {}", e),
            }
        }
        Self::with_space(map)
    }

    /// Build a font from `(character, rows)` pairs, validating every glyph
    pub fn from_rows<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, Vec<S>)>,
        S: AsRef<str>,
    {
        let mut glyphs = BTreeMap::new();
        for (ch, rows) in entries {
            glyphs.insert(ch, Glyph::parse(ch, &rows[..])?);
        }
        if glyphs.is_empty() {
            return Err(GraphError::font("font defines no glyphs"));
        }
        Ok(Self::with_space(glyphs))
    }

    /// Parse a JSON font: an object mapping single characters to 7 row strings
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(content)
            .map_err(|e| GraphError::font(format!("invalid JSON font: {e}")))?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, rows) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => entries.push((ch, rows)),
                _ => {
                    return Err(GraphError::font(format!(
                        "font key \"{key}\" must be exactly one character"
                    )))
                }
            }
        }
        Self::from_rows(entries)
    }

    /// Load a JSON font file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GraphError::font(format!("failed to read {}: {e}", path.display()))
        })?;
        let font = Self::from_json(&content)?;
        debug!("Loaded {} glyphs from {}", font.len(), path.display());
        Ok(font)
    }

    fn with_space(mut glyphs: BTreeMap<char, Glyph>) -> Self {
        glyphs.entry(' ').or_insert_with(Glyph::blank);
        Self { glyphs }
    }

    pub fn lookup(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Supported characters, in sorted order
    pub fn charset(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }

    /// Supported characters joined by spaces, for user-facing messages
    pub fn charset_display(&self) -> String {
        self.charset()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::builtin()
    }
}
