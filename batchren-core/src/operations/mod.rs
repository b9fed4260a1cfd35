//! High-level operations that correspond to CLI commands
//!
//! These modules hold the logic of each one-shot batchren command, separated
//! from CLI concerns like argument parsing and terminal prompts.

pub mod apply;
pub mod check;
pub mod generate;
pub mod preview;

pub use apply::apply_operation;
pub use check::check_operation;
pub use generate::{generate_operation, GenerateRequest};
pub use preview::preview_operation;

use crate::catalog::ScanOptions;
use crate::rules::RuleSet;
use crate::session::Renamer;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// A directory, how to scan it and the rules to run over it
#[derive(Debug, Clone, Default)]
pub struct RenameRequest {
    pub directory: PathBuf,
    pub scan: ScanOptions,
    pub rules: RuleSet,
}

impl RenameRequest {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn display_dir(&self) -> String {
        self.directory.display().to_string()
    }

    /// Load the directory into a fresh session holding this request's rules
    pub(crate) fn open(&self) -> Result<Renamer> {
        let mut renamer = Renamer::with_rules(self.rules.clone());
        renamer
            .load_directory(&self.directory, self.scan.clone())
            .with_context(|| format!("Failed to scan {}", self.directory.display()))?;
        Ok(renamer)
    }
}
