use crate::entry::{EntryStatus, FileEntry};
use crate::history::{Batch, RenameOperation, UndoLog};
use crate::transform::has_path_separator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of committing proposed names to disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteReport {
    pub success_count: usize,
    pub error_count: usize,
    /// Entries left alone because their proposed name conflicts
    pub skipped_count: usize,
    pub errors: Vec<String>,
    /// Names of the skipped entries
    pub skipped: Vec<String>,
}

/// Outcome of reverting the newest batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoReport {
    pub success: bool,
    pub message: String,
    pub restored: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Rename every changed, non-conflicting entry to its proposed name.
///
/// Failures are recorded per entry and never stop the batch. Successful
/// renames are pushed onto `log` as one batch.
pub fn execute(entries: &mut [FileEntry], log: &mut UndoLog) -> ExecuteReport {
    let mut report = ExecuteReport::default();
    let mut operations = Vec::new();

    for i in 0..entries.len() {
        let entry = &mut entries[i];

        if entry.status == EntryStatus::Conflict {
            entry.status = EntryStatus::Skipped;
            report.skipped_count += 1;
            report.skipped.push(entry.original_name.clone());
            continue;
        }
        if !entry.is_changed() {
            continue;
        }
        if !is_valid_name(&entry.proposed_name) {
            entry.status = EntryStatus::Error;
            report.error_count += 1;
            report.errors.push(format!(
                "Invalid name '{}' for {}",
                entry.proposed_name, entry.original_name
            ));
            continue;
        }

        let source = entry.path.clone();
        let target = source
            .parent()
            .map_or_else(|| PathBuf::from(&entry.proposed_name), |p| p.join(&entry.proposed_name));

        if let Err(message) = rename_path(&source, &target) {
            tracing::warn!("{}", message);
            entry.status = EntryStatus::Error;
            report.error_count += 1;
            report.errors.push(message);
            continue;
        }

        tracing::debug!("Renamed {} -> {}", source.display(), target.display());
        operations.push(RenameOperation {
            from: target.clone(),
            to: source.clone(),
            original_name: entry.original_name.clone(),
            new_name: entry.proposed_name.clone(),
        });
        let is_dir = entry.is_dir;
        entry.mark_renamed(target.clone());
        report.success_count += 1;

        if is_dir {
            relocate_children(entries, i, &source, &target);
        }
    }

    tracing::info!(
        "Renamed {} entries ({} errors, {} skipped)",
        report.success_count,
        report.error_count,
        report.skipped_count
    );
    log.push(Batch::new(operations, report.error_count));
    report
}

/// Revert the newest batch in `log`, newest rename first.
///
/// Each step checks that the renamed path still exists and that the original
/// path is free before moving anything. The batch is removed from the log
/// whatever the outcome.
pub fn undo_last(log: &mut UndoLog) -> UndoReport {
    let Some(batch) = log.pop() else {
        return UndoReport {
            success: false,
            message: "Nothing to undo".to_string(),
            ..UndoReport::default()
        };
    };

    let mut report = UndoReport::default();
    for op in batch.operations.iter().rev() {
        match restore(op) {
            Ok(()) => report.restored += 1,
            Err(message) => {
                tracing::warn!("{}", message);
                report.failed += 1;
                report.errors.push(message);
            },
        }
    }

    report.success = report.failed == 0;
    report.message = if report.success {
        format!("Restored {} renamed entries", report.restored)
    } else {
        format!(
            "Restored {} entries, {} could not be restored",
            report.restored, report.failed
        )
    };
    tracing::info!("{}", report.message);
    report
}

fn restore(op: &RenameOperation) -> Result<(), String> {
    if fs::symlink_metadata(&op.from).is_err() {
        return Err(format!(
            "Cannot restore '{}': {} no longer exists",
            op.original_name,
            op.from.display()
        ));
    }
    if fs::symlink_metadata(&op.to).is_ok() && !is_same_object(&op.from, &op.to) {
        return Err(format!(
            "Cannot restore '{}': {} is occupied",
            op.original_name,
            op.to.display()
        ));
    }
    rename_path(&op.from, &op.to)
}

/// After a directory moved, point entries below it at the new location
fn relocate_children(entries: &mut [FileEntry], moved: usize, source: &Path, target: &Path) {
    for (j, other) in entries.iter_mut().enumerate() {
        if j == moved {
            continue;
        }
        if let Ok(relative) = other.path.strip_prefix(source) {
            other.path = target.join(relative);
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !has_path_separator(name)
}

/// Rename `source` to `target`, refusing to replace a different object.
///
/// Case-only renames go through a temporary name so they also work on
/// case-insensitive filesystems.
fn rename_path(source: &Path, target: &Path) -> Result<(), String> {
    rename_path_with(source, target, |from, to| fs::rename(from, to))
}

fn rename_path_with<F>(source: &Path, target: &Path, rename: F) -> Result<(), String>
where
    F: Fn(&Path, &Path) -> io::Result<()>,
{
    let describe = |e: io::Error| {
        format!(
            "Failed to rename {} -> {}: {}",
            source.display(),
            target.display(),
            e
        )
    };

    if fs::symlink_metadata(target).is_ok() {
        if !is_same_object(source, target) {
            return Err(format!("Target already exists: {}", target.display()));
        }
        if source == target {
            return Ok(());
        }

        let temp = source.with_file_name(format!(
            "{}.{}.batchren-tmp",
            source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            std::process::id()
        ));
        rename(source, &temp).map_err(describe)?;
        if let Err(e) = rename(&temp, target) {
            if let Err(back) = rename(&temp, source) {
                return Err(format!(
                    "{}; could not move it back, it is now at {} ({})",
                    describe(e),
                    temp.display(),
                    back
                ));
            }
            return Err(describe(e));
        }
        return Ok(());
    }

    rename(source, target).map_err(describe)
}

#[cfg(unix)]
fn is_same_object(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_object(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca.to_string_lossy().to_lowercase() == cb.to_string_lossy().to_lowercase(),
        _ => false,
    }
}
