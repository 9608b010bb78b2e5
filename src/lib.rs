//! # Contribution Graph
//!
//! Renders short text into a 7-row intensity matrix and replays it as dated,
//! empty git commits so a contribution heatmap spells the text out.
//!
//! ```text
//! text ──compile──▶ IntensityMatrix ──generate──▶ Schedule ──draw──▶ commits
//!        (Font)                      (StartDate,              (CommitEmitter,
//!                                     Multiplier)              ProgressDisplay)
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod emitter;
pub mod errors;
pub mod font;
pub mod pattern;
pub mod progress;
pub mod runner;
pub mod schedule;

pub use errors::{GraphError, Result};
pub use font::{Font, Glyph};
pub use pattern::{compile, IntensityMatrix};
pub use schedule::{generate, Multiplier, Schedule, ScheduleEntry, StartDate};
