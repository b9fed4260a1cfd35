//! The stateful rename session a front end drives.
//!
//! A [`Renamer`] owns the catalog of the loaded directory, the rule list and
//! the undo log. Every operation a UI offers maps to one method here.

use crate::catalog::{Catalog, ScanOptions};
use crate::entry::FileEntry;
use crate::error::{Error, Result};
use crate::execute::{self, ExecuteReport, UndoReport};
use crate::history::UndoLog;
use crate::pipeline::{self, PreviewReport};
use crate::preview::PreviewSummary;
use crate::rules::RuleSet;
use crate::template;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Renamer {
    catalog: Option<Catalog>,
    rules: RuleSet,
    log: UndoLog,
}

impl Renamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Scan `root` and make it the session's directory. Returns the number of
    /// entries found.
    ///
    /// The undo log survives loading another directory since its operations
    /// carry absolute paths.
    pub fn load_directory(&mut self, root: impl Into<PathBuf>, options: ScanOptions) -> Result<usize> {
        let catalog = Catalog::load(root, options)?;
        let count = catalog.len();
        tracing::info!("Loaded {} entries from {}", count, catalog.root().display());
        self.catalog = Some(catalog);
        Ok(count)
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn root(&self) -> Option<&Path> {
        self.catalog.as_ref().map(Catalog::root)
    }

    /// Entries of the loaded directory, empty when nothing is loaded
    pub fn entries(&self) -> &[FileEntry] {
        self.catalog
            .as_ref()
            .map(Catalog::entries)
            .unwrap_or_default()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    pub fn undo_log(&self) -> &UndoLog {
        &self.log
    }

    fn catalog_mut(&mut self) -> Result<&mut Catalog> {
        self.catalog.as_mut().ok_or(Error::NoDirectory)
    }

    /// Recompute proposed names from the current rules
    pub fn preview(&mut self) -> Result<PreviewReport> {
        let Self { catalog, rules, .. } = self;
        let catalog = catalog.as_mut().ok_or(Error::NoDirectory)?;
        Ok(pipeline::preview(catalog.entries_mut(), rules.as_slice()))
    }

    pub fn summary(&self) -> PreviewSummary {
        PreviewSummary::from_entries(self.entries())
    }

    /// Commit the current proposed names, then re-read entry metadata
    pub fn execute(&mut self) -> Result<ExecuteReport> {
        let Self { catalog, log, .. } = self;
        let catalog = catalog.as_mut().ok_or(Error::NoDirectory)?;
        let report = execute::execute(catalog.entries_mut(), log);
        catalog.refresh();
        Ok(report)
    }

    /// Revert the newest batch and rescan the loaded directory.
    ///
    /// The rescan reuses the options the directory was loaded with.
    pub fn undo_last(&mut self) -> Result<UndoReport> {
        let had_batch = self.log.can_undo();
        let report = execute::undo_last(&mut self.log);
        if had_batch {
            if let Some(catalog) = self.catalog.as_mut() {
                if let Err(e) = catalog.rescan() {
                    tracing::warn!("Rescan after undo failed: {}", e);
                }
            }
        }
        Ok(report)
    }

    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Replace every proposed name with a rendering of `template`. Returns the
    /// number of conflicting entries.
    pub fn generate(&mut self, template: &str, start: i64, step: i64, padding: usize) -> Result<usize> {
        let catalog = self.catalog_mut()?;
        Ok(template::generate(catalog.entries_mut(), template, start, step, padding)?)
    }

    pub fn clear_names(&mut self) -> Result<usize> {
        let catalog = self.catalog_mut()?;
        Ok(template::clear_names(catalog.entries_mut()))
    }

    /// Re-read metadata of the current entries
    pub fn refresh(&mut self) -> Result<()> {
        self.catalog_mut()?.refresh();
        Ok(())
    }

    /// Scan the loaded directory again with the same options
    pub fn rescan(&mut self) -> Result<usize> {
        let catalog = self.catalog_mut()?;
        catalog.rescan()?;
        Ok(catalog.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_operations_need_a_directory() {
        let mut renamer = Renamer::new();
        assert!(renamer.entries().is_empty());
        assert!(matches!(renamer.preview(), Err(Error::NoDirectory)));
        assert!(matches!(renamer.execute(), Err(Error::NoDirectory)));
        assert!(matches!(renamer.clear_names(), Err(Error::NoDirectory)));
        assert!(!renamer.can_undo());
    }

    #[test]
    fn test_preview_execute_undo_cycle() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();

        let mut renamer = Renamer::with_rules(vec![Rule::add_suffix("_v2")].into());
        assert_eq!(renamer.load_directory(temp.path(), ScanOptions::default()).unwrap(), 2);

        renamer.preview().unwrap();
        assert_eq!(renamer.summary().will_rename, 2);

        let report = renamer.execute().unwrap();
        assert_eq!(report.success_count, 2);
        assert!(temp.path().join("a_v2.txt").exists());
        assert!(renamer.can_undo());

        let undo = renamer.undo_last().unwrap();
        assert!(undo.success);
        assert_eq!(undo.restored, 2);
        assert!(temp.path().join("a.txt").exists());
        let names: Vec<_> = renamer
            .entries()
            .iter()
            .map(|e| e.original_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert!(!renamer.can_undo());
    }

    #[test]
    fn test_undo_report_survives_failed_rescan() {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("work");
        let gone = temp.path().join("gone");
        fs::create_dir(&work).unwrap();
        fs::create_dir(&gone).unwrap();
        fs::write(work.join("x.txt"), "x").unwrap();

        let mut renamer = Renamer::new();
        renamer.load_directory(&gone, ScanOptions::default()).unwrap();

        let mut entries = crate::catalog::scan(&work, &ScanOptions::default()).unwrap();
        entries[0].proposed_name = "y.txt".to_string();
        execute::execute(&mut entries, &mut renamer.log);
        fs::remove_dir(&gone).unwrap();

        let report = renamer.undo_last().unwrap();
        assert!(report.success);
        assert_eq!(report.restored, 1);
        assert!(work.join("x.txt").exists());
        assert!(!renamer.can_undo());
    }
}
