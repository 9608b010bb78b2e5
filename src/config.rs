//! Persistent settings and resolved run options
//!
//! Settings come from `config.toml` in the platform config directory (or a
//! file passed with `--config`); command-line flags override them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emitter::Identity;
use crate::errors::{GraphError, Result};
use crate::progress::DEFAULT_SYMBOLS;
use crate::schedule::Multiplier;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_README: &str =
    "This is a tool to analyze and visualize git contributions and commit patterns";

/// Settings stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Branch commits land on and get pushed to
    pub branch: String,

    /// Default multiplier when `--multiplier` is absent
    pub multiplier: Multiplier,

    /// Message of every generated commit
    pub commit_message: String,

    /// Contents of the readme committed with the drawing
    pub readme: String,

    /// Prefix of generated repository folders
    pub folder_prefix: String,

    /// Shading symbols, faintest first
    pub symbols: Option<String>,

    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            multiplier: Multiplier::ONE,
            commit_message: env!("CARGO_PKG_NAME").to_string(),
            readme: DEFAULT_README.to_string(),
            folder_prefix: env!("CARGO_PKG_NAME").to_string(),
            symbols: None,
            author_name: None,
            author_email: None,
        }
    }
}

impl Settings {
    /// Configuration directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "contribution-graph", "contribution-graph")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Default path of the settings file
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Shading symbols, falling back to the built-in set
    pub fn symbol_set(&self) -> Vec<char> {
        match &self.symbols {
            Some(s) if !s.is_empty() => s.chars().collect(),
            _ => DEFAULT_SYMBOLS.to_vec(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            name: self.author_name.clone(),
            email: self.author_email.clone(),
        }
    }
}

/// Load settings.
///
/// An explicit `path` must exist. Without one the default location is tried
/// and defaults are used when nothing is there.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match Settings::config_path() {
            Some(p) => (p, false),
            None => return Ok(Settings::default()),
        },
    };

    if !path.exists() {
        if explicit {
            return Err(load_error(&path, "file not found"));
        }
        debug!("No config at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| load_error(&path, e))?;
    let settings = parse_settings(&path, &content)?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

fn parse_settings(path: &Path, content: &str) -> Result<Settings> {
    // TOML unless the file says otherwise
    if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(content).map_err(|e| load_error(path, format!("invalid JSON: {e}")))
    } else {
        toml::from_str(content).map_err(|e| load_error(path, format!("invalid TOML: {e}")))
    }
}

fn load_error(path: &Path, message: impl ToString) -> GraphError {
    GraphError::ConfigLoadError {
        path: path.to_path_buf(),
        message: Arc::new(message.to_string()),
    }
}

/// Where commits are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A fresh `<prefix>-<hex>` folder under `parent`
    NewRepository { parent: PathBuf, prefix: String },
    /// An existing working tree
    Existing(PathBuf),
}

/// Everything one run needs, after merging flags and settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub text: Option<String>,
    pub start_date: Option<String>,
    pub multiplier: Multiplier,
    pub origin: Option<String>,
    pub push: bool,
    pub force: bool,
    pub branch: String,
    pub target: Target,
    pub preview: bool,
    pub commit_message: String,
    pub readme: String,
    pub symbols: Vec<char>,
    pub identity: Identity,
}

impl RunOptions {
    /// Options with settings defaults and the given text
    pub fn from_settings(settings: &Settings, text: Option<String>) -> Self {
        Self {
            text,
            start_date: None,
            multiplier: settings.multiplier,
            origin: None,
            push: false,
            force: false,
            branch: settings.branch.clone(),
            target: Target::NewRepository {
                parent: PathBuf::from("."),
                prefix: settings.folder_prefix.clone(),
            },
            preview: false,
            commit_message: settings.commit_message.clone(),
            readme: settings.readme.clone(),
            symbols: settings.symbol_set(),
            identity: settings.identity(),
        }
    }

    /// Non-fatal inconsistencies, reported as warnings before the run
    pub fn check_consistency(&self) -> Vec<GraphError> {
        let mut issues = Vec::new();
        let new_repo = matches!(self.target, Target::NewRepository { .. });
        if self.push && self.origin.is_none() && new_repo {
            issues.push(GraphError::config("Option --origin required"));
        }
        if self.force && !self.push {
            issues.push(GraphError::config("--force has no effect without --push"));
        }
        if self.preview && (self.push || self.origin.is_some()) {
            issues.push(GraphError::config("--preview makes no commits, remote options are ignored"));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.branch, "main");
        assert_eq!(settings.multiplier, Multiplier::ONE);
        assert_eq!(settings.symbol_set(), DEFAULT_SYMBOLS.to_vec());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "branch = \"gh-pages\"\nmultiplier = 4\nsymbols = \".oO@\"").expect("write");

        let settings = load_settings(Some(file.path())).expect("loads");
        assert_eq!(settings.branch, "gh-pages");
        assert_eq!(settings.multiplier.get(), 4);
        assert_eq!(settings.symbol_set(), vec!['.', 'o', 'O', '@']);
        assert_eq!(settings.folder_prefix, "contribution-graph");
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(file, r#"{{"author_name": "Octo Cat"}}"#).expect("write");

        let settings = load_settings(Some(file.path())).expect("loads");
        assert_eq!(settings.author_name.as_deref(), Some("Octo Cat"));
    }

    #[test]
    fn test_zero_multiplier_in_file_is_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "multiplier = 0").expect("write");
        assert!(load_settings(Some(file.path())).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = load_settings(Some(Path::new("/nonexistent/graph.toml"))).unwrap_err();
        assert!(matches!(err, GraphError::ConfigLoadError { .. }));
    }

    #[test]
    fn test_push_without_origin_warns() {
        let mut options = RunOptions::from_settings(&Settings::default(), Some("HI".into()));
        options.push = true;
        let issues = options.check_consistency();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].to_string().contains("--origin required"));

        options.target = Target::Existing(PathBuf::from("."));
        assert!(options.check_consistency().is_empty());
    }
}
