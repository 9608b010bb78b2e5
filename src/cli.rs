//! Command-line arguments using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{RunOptions, Settings, Target};
use crate::errors::Result;
use crate::schedule::Multiplier;

/// Draw text on your contribution graph with dated, empty commits
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "contribution-graph", about, version, arg_required_else_help = true)]
pub struct Cli {
    /// Text to draw
    #[arg(short, long)]
    pub text: Option<String>,

    /// Set the start date, rounded back to its week's Sunday (YYYY-MM-DD)
    #[arg(short, long)]
    pub startdate: Option<String>,

    /// Commits per intensity level
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub multiplier: Option<u32>,

    /// Add origin url
    #[arg(short, long)]
    pub origin: Option<String>,

    /// Push to origin
    #[arg(short, long)]
    pub push: bool,

    /// Force push
    #[arg(short, long)]
    pub force: bool,

    /// Set the branch
    #[arg(short, long)]
    pub branch: Option<String>,

    /// JSON font file replacing the built-in font
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Settings file (default: config.toml in the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Draw into an existing repository instead of creating one
    #[arg(long, value_name = "PATH", conflicts_with = "output")]
    pub dir: Option<PathBuf>,

    /// Parent directory for the generated repository
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the drawing and commit count without touching git
    #[arg(long)]
    pub preview: bool,

    /// No live rendering
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable info logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Merge flags over `settings`
    pub fn run_options(&self, settings: &Settings) -> Result<RunOptions> {
        let mut options = RunOptions::from_settings(settings, self.text.clone());
        options.start_date = self.startdate.clone();
        if let Some(m) = self.multiplier {
            options.multiplier = Multiplier::new(m)?;
        }
        options.origin = self.origin.clone();
        options.push = self.push;
        options.force = self.force;
        if let Some(branch) = &self.branch {
            options.branch = branch.clone();
        }
        options.preview = self.preview;
        options.target = match (&self.dir, &self.output) {
            (Some(dir), _) => Target::Existing(dir.clone()),
            (None, Some(parent)) => Target::NewRepository {
                parent: parent.clone(),
                prefix: settings.folder_prefix.clone(),
            },
            (None, None) => options.target,
        };
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "contribution-graph",
            "-t",
            "HI",
            "-m",
            "3",
            "-b",
            "trunk",
            "--output",
            "/tmp",
        ])
        .expect("parses");
        let options = cli.run_options(&Settings::default()).expect("resolves");
        assert_eq!(options.text.as_deref(), Some("HI"));
        assert_eq!(options.multiplier.get(), 3);
        assert_eq!(options.branch, "trunk");
        assert!(matches!(options.target, Target::NewRepository { ref parent, .. } if parent == &PathBuf::from("/tmp")));
    }

    #[test]
    fn test_zero_multiplier_is_usage_error() {
        assert!(Cli::try_parse_from(["contribution-graph", "-t", "HI", "-m", "0"]).is_err());
        assert!(Cli::try_parse_from(["contribution-graph", "-t", "HI", "-m", "1.5"]).is_err());
    }

    #[test]
    fn test_dir_conflicts_with_output() {
        let parsed = Cli::try_parse_from([
            "contribution-graph",
            "-t",
            "HI",
            "--dir",
            ".",
            "--output",
            "/tmp",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_settings_multiplier_used_when_flag_absent() {
        let cli = Cli::try_parse_from(["contribution-graph", "-t", "HI"]).expect("parses");
        let settings = Settings {
            multiplier: Multiplier::new(2).expect("positive"),
            ..Settings::default()
        };
        let options = cli.run_options(&settings).expect("resolves");
        assert_eq!(options.multiplier.get(), 2);
    }
}
