//! Registry configuration
//!
//! The defaults clone the public Bluetooth SIG repository into the user's local data directory.
//! Every value can be overridden by an environment variable (see [`Config::from_env`]) or by the
//! builder methods.

use std::path::PathBuf;

/// The public repository of the Bluetooth SIG
pub const DEFAULT_REPO_URL: &str = "https://bitbucket.org/bluetooth-SIG/public.git";

/// Environment variable for the snapshot directory
pub const DIR_ENV: &str = "BLUENUMBERS_DIR";

/// Environment variable for the URL of the upstream repository
pub const REPO_URL_ENV: &str = "BLUENUMBERS_REPO_URL";

/// Environment variable for the git program
pub const GIT_ENV: &str = "BLUENUMBERS_GIT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The URL cloned when there is no snapshot
    pub repo_url: String,
    /// The directory of the snapshot
    pub snapshot_dir: PathBuf,
    /// The git program (a name looked up in `PATH` or a path to the binary)
    pub git: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repo_url: DEFAULT_REPO_URL.to_string(),
            snapshot_dir: default_snapshot_dir(),
            git: PathBuf::from("git"),
        }
    }
}

impl Config {
    /// Create a configuration from the environment
    ///
    /// | variable | overrides |
    /// |---|---|
    /// | `BLUENUMBERS_DIR` | `snapshot_dir` |
    /// | `BLUENUMBERS_REPO_URL` | `repo_url` |
    /// | `BLUENUMBERS_GIT` | `git` |
    ///
    /// Variables that are unset or empty keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut config = Config::default();

        if let Some(dir) = var(DIR_ENV) {
            config.snapshot_dir = PathBuf::from(dir);
        }

        if let Some(url) = var(REPO_URL_ENV) {
            config.repo_url = url;
        }

        if let Some(git) = var(GIT_ENV) {
            config.git = PathBuf::from(git);
        }

        config
    }

    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = url.into();
        self
    }

    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }
}

/// The default directory of the snapshot
///
/// This is `bluenumbers/bluetooth_sig_public` within the local data directory of the user, or
/// `.bluetooth_sig_public` within the working directory if the platform has no such directory.
pub fn default_snapshot_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("bluenumbers").join("bluetooth_sig_public"))
        .unwrap_or_else(|| PathBuf::from(".bluetooth_sig_public"))
}
