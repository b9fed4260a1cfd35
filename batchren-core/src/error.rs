//! Error types for the rename engine.

use std::path::PathBuf;
use thiserror::Error;

use crate::rules::RuleError;
use crate::template::TemplateError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by catalog, rule and template operations.
///
/// Per-entry failures during scan, execute and undo are never returned
/// through this type; they are collected into the corresponding report.
#[derive(Debug, Error)]
pub enum Error {
    /// The scan root does not exist.
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// I/O failure on a path that the operation cannot continue without.
    #[error("I/O error for path {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Invalid rule #{index}: {source}")]
    InvalidRule {
        index: usize,
        #[source]
        source: RuleError,
    },

    /// A rules file could not be parsed or written.
    #[error("Rules file {path}: {message}")]
    RulesFile { path: PathBuf, message: String },

    /// An operation needs a loaded directory but none is loaded yet.
    #[error("No directory loaded")]
    NoDirectory,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
