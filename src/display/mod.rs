//! Presentation of a running schedule
//!
//! The runner feeds every display the same events in schedule order:
//!
//! ```text
//!   begin(schedule)
//!   ├── cell(entry, progress)      once per day
//!   │   └── commit(entry, symbol)  once per commit of that day
//!   └── finish()
//! ```
//!
//! Displays only observe; the schedule is computed before `begin`.

mod bar;
mod grid;
mod preview;

pub use bar::BarDisplay;
pub use grid::GridDisplay;
pub use preview::preview;

use crate::errors::Result;
use crate::schedule::{Schedule, ScheduleEntry};

/// Receives progress events while commits are emitted
pub trait ProgressDisplay {
    fn begin(&mut self, schedule: &Schedule) -> Result<()>;

    /// A new day is about to be processed; `progress` is in `[0, 1]`
    fn cell(&mut self, entry: &ScheduleEntry, progress: f64) -> Result<()>;

    /// One commit of `entry` is about to be created
    fn commit(&mut self, entry: &ScheduleEntry, symbol: char) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}

/// Display that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl ProgressDisplay for NullDisplay {
    fn begin(&mut self, _schedule: &Schedule) -> Result<()> {
        Ok(())
    }

    fn cell(&mut self, _entry: &ScheduleEntry, _progress: f64) -> Result<()> {
        Ok(())
    }

    fn commit(&mut self, _entry: &ScheduleEntry, _symbol: char) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
