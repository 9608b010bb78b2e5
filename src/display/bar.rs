//! Plain progress bar for non-interactive output

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::ProgressDisplay;
use crate::errors::Result;
use crate::schedule::{Schedule, ScheduleEntry};

/// indicatif bar counting days, with the running commit count as message
pub struct BarDisplay {
    bar: ProgressBar,
    commits: u64,
}

impl BarDisplay {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.white} {pos}/{len} days {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar, commits: 0 }
    }

    pub fn commits(&self) -> u64 {
        self.commits
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for BarDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressDisplay for BarDisplay {
    fn begin(&mut self, schedule: &Schedule) -> Result<()> {
        self.bar.set_length(schedule.len() as u64);
        self.bar.set_position(0);
        self.commits = 0;
        Ok(())
    }

    fn cell(&mut self, entry: &ScheduleEntry, _progress: f64) -> Result<()> {
        self.bar.set_position(entry.cells_passed() as u64);
        Ok(())
    }

    fn commit(&mut self, _entry: &ScheduleEntry, _symbol: char) -> Result<()> {
        self.commits += 1;
        self.bar.set_message(format!("{} commits", self.commits));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.bar.finish_and_clear();
        Ok(())
    }
}
