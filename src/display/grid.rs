//! Live terminal grid
//!
//! Each commit paints its shading symbol at column = week, row = day, so the
//! drawing builds up on screen the way it will appear on the graph. Row 8
//! holds an overall bar as wide as the drawing.

use std::io::Write;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType, SetTitle},
};

use super::ProgressDisplay;
use crate::errors::Result;
use crate::font::DAYS_IN_WEEK;
use crate::schedule::{Schedule, ScheduleEntry};

const BAR_ROW: u16 = DAYS_IN_WEEK as u16;

pub struct GridDisplay<W: Write> {
    out: W,
    bar_width: usize,
}

impl<W: Write> GridDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, bar_width: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn render_bar(progress: f64, width: usize) -> String {
    let filled = ((progress * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        " ".repeat(width - filled),
        (progress * 100.0).round() as u32
    )
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl<W: Write> ProgressDisplay for GridDisplay<W> {
    fn begin(&mut self, schedule: &Schedule) -> Result<()> {
        self.bar_width = schedule.weeks;
        queue!(
            self.out,
            SetTitle(env!("CARGO_PKG_NAME")),
            Clear(ClearType::All),
            Hide
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn cell(&mut self, _entry: &ScheduleEntry, progress: f64) -> Result<()> {
        queue!(
            self.out,
            MoveTo(0, BAR_ROW),
            Print(render_bar(progress, self.bar_width))
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn commit(&mut self, entry: &ScheduleEntry, symbol: char) -> Result<()> {
        queue!(
            self.out,
            MoveTo(to_u16(entry.week), to_u16(entry.day)),
            Print(symbol)
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        queue!(
            self.out,
            MoveTo(0, BAR_ROW),
            Clear(ClearType::CurrentLine),
            Show
        )?;
        self.out.flush()?;
        Ok(())
    }
}
