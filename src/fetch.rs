//! Obtaining the registry snapshot
//!
//! The snapshot is the local copy of the Bluetooth SIG's public repository. How it gets onto the
//! disk is up to a [`Fetcher`]. [`GitFetcher`] clones and pulls the repository with the git
//! program, and [`LocalSnapshot`] uses a directory that is already there.

use crate::config::Config;
use crate::error::FetchError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The revision (commit hash) of a snapshot
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Revision {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of an update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateStatus {
    /// There was no snapshot so it was created
    Created,
    /// The snapshot was updated to a new revision
    Updated,
    /// The snapshot was already up to date
    UpToDate,
}

impl UpdateStatus {
    /// Check if the content of the snapshot changed
    pub fn changed(&self) -> bool {
        *self != UpdateStatus::UpToDate
    }
}

/// A way of getting the snapshot onto the disk
pub trait Fetcher: Send + Sync {
    /// The directory of the snapshot
    fn snapshot_dir(&self) -> &Path;

    /// Make sure the snapshot exists
    ///
    /// Nothing is done if there is already a snapshot.
    fn ensure_present(&self) -> Result<(), FetchError>;

    /// Bring the snapshot up to the latest revision
    fn update(&self) -> Result<UpdateStatus, FetchError>;

    /// Get the revision of the snapshot
    ///
    /// `None` is returned if there is no snapshot or the fetcher does not track revisions.
    fn revision(&self) -> Result<Option<Revision>, FetchError> {
        Ok(None)
    }
}

/// A fetcher using the `git` program
#[derive(Clone, Debug)]
pub struct GitFetcher {
    repo_url: String,
    dir: PathBuf,
    git: PathBuf,
}

impl GitFetcher {
    pub fn new(repo_url: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        GitFetcher {
            repo_url: repo_url.into(),
            dir: dir.into(),
            git: PathBuf::from("git"),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        GitFetcher {
            repo_url: config.repo_url.clone(),
            dir: config.snapshot_dir.clone(),
            git: config.git.clone(),
        }
    }

    /// Change the git program
    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    /// Fail early if git cannot be run
    fn ensure_git_available(&self) -> Result<(), FetchError> {
        Command::new(&self.git)
            .arg("--version")
            .output()
            .map_err(|source| FetchError::GitUnavailable {
                program: self.git.clone(),
                source,
            })?;

        Ok(())
    }

    fn clone_fresh(&self) -> Result<(), FetchError> {
        if let Some(parent) = self.dir.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| FetchError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        log::info!("cloning {} into {}", self.repo_url, self.dir.display());

        self.run_git(&[
            OsStr::new("clone"),
            OsStr::new("--depth"),
            OsStr::new("1"),
            OsStr::new(&self.repo_url),
            self.dir.as_os_str(),
        ])?;

        Ok(())
    }

    fn rev_parse(&self) -> Result<Revision, FetchError> {
        self.run_git(&[
            OsStr::new("-C"),
            self.dir.as_os_str(),
            OsStr::new("rev-parse"),
            OsStr::new("HEAD"),
        ])
        .map(Revision)
    }

    /// Run git, returning its trimmed standard output
    fn run_git(&self, args: &[&OsStr]) -> Result<String, FetchError> {
        let output = Command::new(&self.git)
            .args(args)
            .output()
            .map_err(|source| FetchError::GitUnavailable {
                program: self.git.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let command = std::iter::once(self.git.as_os_str())
                .chain(args.iter().copied())
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ");

            Err(FetchError::Command {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Fetcher for GitFetcher {
    fn snapshot_dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_present(&self) -> Result<(), FetchError> {
        if self.dir.exists() {
            log::debug!("snapshot already exists at {}", self.dir.display());

            return Ok(());
        }

        self.ensure_git_available()?;

        self.clone_fresh()
    }

    fn update(&self) -> Result<UpdateStatus, FetchError> {
        self.ensure_git_available()?;

        if !self.dir.exists() {
            self.clone_fresh()?;

            return Ok(UpdateStatus::Created);
        }

        let before = self.rev_parse()?;

        self.run_git(&[OsStr::new("-C"), self.dir.as_os_str(), OsStr::new("pull")])?;

        let after = self.rev_parse()?;

        if before != after {
            log::info!("snapshot at {} updated from {} to {}", self.dir.display(), before, after);

            Ok(UpdateStatus::Updated)
        } else {
            log::debug!("snapshot at {} is already up to date", self.dir.display());

            Ok(UpdateStatus::UpToDate)
        }
    }

    fn revision(&self) -> Result<Option<Revision>, FetchError> {
        if !self.dir.exists() {
            return Ok(None);
        }

        self.ensure_git_available()?;

        self.rev_parse().map(Some)
    }
}

/// A snapshot directory that is populated by other means
///
/// This never fetches anything. It is useful for a snapshot that is vendored with an application
/// or for tests.
#[derive(Clone, Debug)]
pub struct LocalSnapshot {
    dir: PathBuf,
}

impl LocalSnapshot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalSnapshot { dir: dir.into() }
    }
}

impl Fetcher for LocalSnapshot {
    fn snapshot_dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_present(&self) -> Result<(), FetchError> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(FetchError::MissingSnapshot(self.dir.clone()))
        }
    }

    fn update(&self) -> Result<UpdateStatus, FetchError> {
        self.ensure_present()?;

        Ok(UpdateStatus::UpToDate)
    }
}
