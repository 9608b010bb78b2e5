//! Orchestration of one drawing
//!
//! Validation, compilation and scheduling happen first and have no side
//! effects. Only a complete schedule is handed to the emitter, and it is
//! consumed strictly in order.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::{RunOptions, Target};
use crate::display::{preview, ProgressDisplay};
use crate::emitter::{CommitEmitter, GitRepository};
use crate::errors::{GraphError, Result};
use crate::font::Font;
use crate::pattern::{compile, IntensityMatrix};
use crate::progress::{intensity_symbol, overall_progress};
use crate::schedule::{generate, Schedule, StartDate};

/// Outcome of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Folder name of the repository, `None` for a preview
    pub folder: Option<String>,
    pub commits: u64,
    pub start: StartDate,
    /// Text rendering of the matrix when previewing
    pub preview: Option<String>,
}

impl RunSummary {
    /// One-line report printed at the end of a run
    pub fn report(&self) -> String {
        match &self.folder {
            Some(folder) => format!(
                "{folder} generated ({} commits), starting date {}",
                self.commits, self.start
            ),
            None => format!(
                "preview ({} commits), starting date {}",
                self.commits, self.start
            ),
        }
    }
}

/// Compiled pattern and schedule for a run, before any side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub matrix: IntensityMatrix,
    pub start: StartDate,
    pub schedule: Schedule,
}

/// Validate inputs and compute the full schedule
pub fn plan(options: &RunOptions, font: &Font, now: DateTime<Utc>) -> Result<Plan> {
    let text = match options.text.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => {
            return Err(GraphError::MissingRequiredInput {
                field: Arc::new("text".to_string()),
            })
        }
    };

    let matrix = compile(text, font)?;
    let start = match options.start_date.as_deref() {
        Some(input) => StartDate::parse(input)?,
        None => StartDate::default_for(now)?,
    };
    let schedule = generate(&matrix, start, options.multiplier)?;

    Ok(Plan {
        matrix,
        start,
        schedule,
    })
}

/// Stream `schedule` through `emitter`, reporting to `display`.
///
/// Returns the number of commits made. On failure, commits already made stay.
pub fn draw(
    schedule: &Schedule,
    emitter: &mut dyn CommitEmitter,
    display: &mut dyn ProgressDisplay,
    symbols: &[char],
) -> Result<u64> {
    let total_cells = schedule.len();
    let mut commits = 0u64;

    display.begin(schedule)?;
    for entry in &schedule.entries {
        display.cell(entry, overall_progress(entry.cells_passed(), total_cells))?;
        emitter.emit_with(entry.unix_seconds(), entry.commits, &mut |index| {
            let symbol = intensity_symbol(index, entry.commits, symbols).unwrap_or(' ');
            display.commit(entry, symbol)
        })?;
        commits += u64::from(entry.commits);
    }
    display.finish()?;

    Ok(commits)
}

/// Run a drawing end to end
pub fn run(
    options: &RunOptions,
    font: &Font,
    now: DateTime<Utc>,
    display: &mut dyn ProgressDisplay,
) -> Result<RunSummary> {
    for issue in options.check_consistency() {
        warn!("{}", issue);
    }

    let plan = plan(options, font, now)?;
    info!(
        "Drawing {} weeks starting {} ({} commits)",
        plan.schedule.weeks, plan.start, plan.schedule.total_commits
    );

    if options.preview {
        return Ok(RunSummary {
            folder: None,
            commits: plan.schedule.total_commits,
            start: plan.start,
            preview: Some(preview(&plan.matrix, &options.symbols)),
        });
    }

    let repo = match &options.target {
        Target::NewRepository { parent, prefix } => {
            GitRepository::create(parent, prefix, &options.branch, &options.readme)?
        }
        Target::Existing(path) => GitRepository::open(path)?,
    };
    let mut repo = repo
        .with_message(options.commit_message.clone())
        .with_identity(options.identity.clone());

    let commits = draw(&plan.schedule, &mut repo, display, &options.symbols)?;

    if let Some(origin) = &options.origin {
        repo.add_remote(origin)?;
    }
    if options.push {
        repo.push(&options.branch, options.force)?;
    }

    Ok(RunSummary {
        folder: Some(repo.name()),
        commits,
        start: plan.start,
        preview: None,
    })
}
