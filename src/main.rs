use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::Parser;

use contribution_graph::cli::Cli;
use contribution_graph::config::load_settings;
use contribution_graph::display::{BarDisplay, GridDisplay, NullDisplay, ProgressDisplay};
use contribution_graph::errors::GraphError;
use contribution_graph::font::Font;
use contribution_graph::runner;

#[allow(clippy::print_stdout)]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set log level based on flags
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!("Starting contribution-graph version {}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings(cli.config.as_deref())?;
    let options = cli.run_options(&settings)?;
    let font = match &cli.font {
        Some(path) => Font::load(path).with_context(|| format!("loading font {}", path.display()))?,
        None => Font::builtin(),
    };

    let mut display: Box<dyn ProgressDisplay> = if cli.quiet || cli.preview {
        Box::new(NullDisplay)
    } else if io::stdout().is_terminal() {
        Box::new(GridDisplay::new(io::stdout()))
    } else {
        Box::new(BarDisplay::new())
    };

    let summary = match runner::run(&options, &font, chrono::Utc::now(), display.as_mut()) {
        Ok(summary) => summary,
        Err(err) => {
            if !err.is_validation() {
                // leave the terminal usable if the grid was drawing
                let _ = display.finish();
            }
            if let GraphError::EmitterFailure { .. } = err {
                tracing::error!("Run aborted, commits made so far were kept");
            }
            return Err(err.into());
        }
    };

    if let Some(drawing) = &summary.preview {
        println!("{drawing}");
    }
    println!("{}", summary.report());

    if options.push && !options.preview {
        tracing::info!("Pushed {} to origin", options.branch);
    }
    Ok(())
}
