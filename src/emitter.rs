//! Commit emission through the `git` binary
//!
//! Every commit is empty and carries the schedule date as both author and
//! committer date. Commands run synchronously; a failing command stops the
//! run and commits already made are left in place.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use crate::errors::{GraphError, Result};

/// File committed first so the repository has a tree
pub const README_FILE: &str = "readme.md";

/// Receives dated commits in schedule order.
///
/// The runner hands over one schedule entry at a time through
/// [`CommitEmitter::emit_with`]; implementors usually only provide `commit`.
pub trait CommitEmitter {
    /// Create one commit dated at `unix_seconds`
    fn commit(&mut self, unix_seconds: i64) -> Result<()>;

    /// Create exactly `count` commits dated at `unix_seconds`
    fn emit(&mut self, unix_seconds: i64, count: u32) -> Result<()> {
        self.emit_with(unix_seconds, count, &mut |_| Ok(()))
    }

    /// Like `emit`, calling `before_commit` with the commit index ahead of
    /// each commit
    fn emit_with(
        &mut self,
        unix_seconds: i64,
        count: u32,
        before_commit: &mut dyn FnMut(u32) -> Result<()>,
    ) -> Result<()> {
        for index in 0..count {
            before_commit(index)?;
            self.commit(unix_seconds)?;
        }
        Ok(())
    }
}

/// Author identity passed through the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A git working tree that commits are written into
#[derive(Debug, Clone)]
pub struct GitRepository {
    path: PathBuf,
    message: String,
    identity: Identity,
}

impl GitRepository {
    /// Create `<parent>/<prefix>-<12 hex>`, initialize it on `branch` and
    /// stage a readme.
    pub fn create(parent: &Path, prefix: &str, branch: &str, readme: &str) -> Result<Self> {
        let suffix: [u8; 6] = rand::rng().random();
        let hex: String = suffix.iter().map(|b| format!("{b:02x}")).collect();
        let path = parent.join(format!("{prefix}-{hex}"));

        fs::create_dir_all(&path)?;
        info!("Initializing repository at {}", path.display());

        let repo = Self::at(path);
        repo.git(["init", "--quiet"])?;
        repo.git([
            "symbolic-ref".to_string(),
            "HEAD".to_string(),
            format!("refs/heads/{branch}"),
        ])?;
        fs::write(repo.path.join(README_FILE), readme)?;
        repo.git(["add", README_FILE])?;
        Ok(repo)
    }

    /// Use an existing working tree
    pub fn open(path: &Path) -> Result<Self> {
        if !path.join(".git").exists() {
            return Err(GraphError::config(format!(
                "{} is not a git repository",
                path.display()
            )));
        }
        Ok(Self::at(path.to_path_buf()))
    }

    fn at(path: PathBuf) -> Self {
        Self {
            path,
            message: env!("CARGO_PKG_NAME").to_string(),
            identity: Identity::default(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Folder name for summaries
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn add_remote(&self, url: &str) -> Result<()> {
        info!("Adding origin {}", url);
        self.git(["remote", "add", "origin", url])
    }

    pub fn push(&self, branch: &str, force: bool) -> Result<()> {
        info!("Pushing {} to origin{}", branch, if force { " (forced)" } else { "" });
        let mut args = vec!["push"];
        if force {
            args.push("--force");
        }
        args.extend(["-u", "origin", branch]);
        self.git(args)
    }

    /// Number of commits reachable from HEAD
    pub fn commit_count(&self) -> Result<u64> {
        let output = self.run(["rev-list", "--count", "HEAD"], &[])?;
        output
            .trim()
            .parse()
            .map_err(|e| GraphError::config(format!("unexpected rev-list output: {e}")))
    }

    fn git<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.run(args, &[]).map(|_| ())
    }

    fn run<I, S>(&self, args: I, envs: &[(&str, String)]) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command_line = std::iter::once("git".to_string())
            .chain(args.iter().map(|a| a.as_ref().to_string_lossy().to_string()))
            .collect::<Vec<_>>()
            .join(" ");
        debug!("Running `{}` in {}", command_line, self.path.display());

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(&args)
            .envs(envs.iter().map(|(k, v)| (*k, v.as_str())))
            .output()
            .map_err(|e| GraphError::EmitterFailure {
                command: Arc::new(command_line.clone()),
                status: Arc::new("not started".to_string()),
                stderr: Arc::new(e.to_string()),
            })?;

        if !output.status.success() {
            return Err(GraphError::EmitterFailure {
                command: Arc::new(command_line),
                status: Arc::new(output.status.to_string()),
                stderr: Arc::new(String::from_utf8_lossy(&output.stderr).trim().to_string()),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl CommitEmitter for GitRepository {
    fn commit(&mut self, unix_seconds: i64) -> Result<()> {
        let date = format!("{unix_seconds} +0000");
        let mut envs = vec![
            ("GIT_AUTHOR_DATE", date.clone()),
            ("GIT_COMMITTER_DATE", date),
        ];
        if let Some(name) = &self.identity.name {
            envs.push(("GIT_AUTHOR_NAME", name.clone()));
            envs.push(("GIT_COMMITTER_NAME", name.clone()));
        }
        if let Some(email) = &self.identity.email {
            envs.push(("GIT_AUTHOR_EMAIL", email.clone()));
            envs.push(("GIT_COMMITTER_EMAIL", email.clone()));
        }

        self.run(
            ["commit", "--quiet", "--allow-empty", "-am", self.message.as_str()],
            &envs,
        )
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        stamps: Vec<i64>,
    }

    impl CommitEmitter for Counter {
        fn commit(&mut self, unix_seconds: i64) -> Result<()> {
            self.stamps.push(unix_seconds);
            Ok(())
        }
    }

    #[test]
    fn test_emit_commits_exact_count() {
        let mut counter = Counter::default();
        counter.emit(86_400, 3).expect("emits");
        counter.emit(172_800, 0).expect("emits");
        assert_eq!(counter.stamps, vec![86_400, 86_400, 86_400]);
    }

    #[test]
    fn test_emit_with_runs_callback_before_each_commit() {
        let mut counter = Counter::default();
        let mut seen = Vec::new();
        counter
            .emit_with(86_400, 2, &mut |index| {
                seen.push(index);
                Ok(())
            })
            .expect("emits");
        assert_eq!(seen, vec![0, 1]);
        assert_eq!(counter.stamps.len(), 2);
    }

    #[test]
    fn test_open_rejects_plain_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(GitRepository::open(dir.path()).is_err());
    }
}
