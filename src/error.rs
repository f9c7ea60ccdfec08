//! Errors of the registry
//!
//! A lookup that does not find its key is not an error, it is `Ok(None)`. Errors are only for
//! when the snapshot could not be fetched or one of its files could not be parsed.

use crate::parse::Category;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize {category} to JSON: {source}")]
    Json {
        category: Category,
        #[source]
        source: serde_json::Error,
    },
}

/// An error from obtaining or updating the snapshot
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("git is not available (tried to run `{}`): {source}", .program.display())]
    GitUnavailable {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` failed: {stderr}")]
    Command { command: String, stderr: String },
    #[error("failed to create {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no registry snapshot exists at {}", .0.display())]
    MissingSnapshot(PathBuf),
}

/// A registry file that could not be interpreted
#[derive(Debug, thiserror::Error)]
#[error("failed to parse {category} file {}: {kind}", .path.display())]
pub struct ParseError {
    pub category: Category,
    pub path: PathBuf,
    #[source]
    pub kind: ParseErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error("missing the top level list `{0}`")]
    MissingList(&'static str),
    #[error("no YAML files were found")]
    NoFiles,
}

impl ParseError {
    pub(crate) fn new<K: Into<ParseErrorKind>>(category: Category, path: impl Into<PathBuf>, kind: K) -> Self {
        ParseError {
            category,
            path: path.into(),
            kind: kind.into(),
        }
    }
}
