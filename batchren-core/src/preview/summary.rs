use crate::entry::{EntryStatus, FileEntry};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Counts shown above a preview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub total: usize,
    /// Entries with a new, non-conflicting name
    pub will_rename: usize,
    pub conflicts: usize,
    pub unchanged: usize,
}

impl PreviewSummary {
    pub fn from_entries(entries: &[FileEntry]) -> Self {
        let total = entries.len();
        let conflicts = entries
            .iter()
            .filter(|e| e.status == EntryStatus::Conflict)
            .count();
        let will_rename = entries
            .iter()
            .filter(|e| e.status != EntryStatus::Conflict && e.is_changed())
            .count();

        Self {
            total,
            will_rename,
            conflicts,
            unchanged: total - will_rename - conflicts,
        }
    }
}

/// Render a plain text summary: counts, then one line per pending rename and
/// per conflict.
pub fn render_summary(entries: &[FileEntry]) -> String {
    let summary = PreviewSummary::from_entries(entries);
    let mut output = String::new();

    let _ = writeln!(output, "[PREVIEW SUMMARY]");
    let _ = writeln!(output, "Entries: {}", summary.total);
    let _ = writeln!(output, "Will rename: {}", summary.will_rename);
    let _ = writeln!(output, "Conflicts: {}", summary.conflicts);
    let _ = writeln!(output, "Unchanged: {}", summary.unchanged);

    let renames: Vec<_> = entries
        .iter()
        .filter(|e| e.status != EntryStatus::Conflict && e.is_changed())
        .collect();
    if !renames.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "[RENAMES]");
        for entry in renames {
            let kind = if entry.is_dir { "dir" } else { "file" };
            let _ = writeln!(
                output,
                "{}: {} -> {}",
                kind, entry.original_name, entry.proposed_name
            );
        }
    }

    if summary.conflicts > 0 {
        let _ = writeln!(output);
        let _ = writeln!(output, "[CONFLICTS]");
        for entry in entries.iter().filter(|e| e.status == EntryStatus::Conflict) {
            let _ = writeln!(output, "{} -> {}", entry.original_name, entry.proposed_name);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::path::PathBuf;

    fn entry(name: &str, proposed: &str, status: EntryStatus) -> FileEntry {
        let now = Local::now();
        let mut e = FileEntry::new(PathBuf::from("/d").join(name), false, 1, now, now);
        e.proposed_name = proposed.to_string();
        e.status = status;
        e
    }

    #[test]
    fn test_counts() {
        let entries = vec![
            entry("a.txt", "a_v2.txt", EntryStatus::Ready),
            entry("b.txt", "b.txt", EntryStatus::Ready),
            entry("x.txt", "z.txt", EntryStatus::Conflict),
            entry("y.txt", "z.txt", EntryStatus::Conflict),
        ];
        let summary = PreviewSummary::from_entries(&entries);
        assert_eq!(
            summary,
            PreviewSummary {
                total: 4,
                will_rename: 1,
                conflicts: 2,
                unchanged: 1,
            }
        );
    }

    #[test]
    fn test_render_summary() {
        let entries = vec![
            entry("a.txt", "a_v2.txt", EntryStatus::Ready),
            entry("x.txt", "z.txt", EntryStatus::Conflict),
            entry("y.txt", "z.txt", EntryStatus::Conflict),
        ];
        insta::assert_snapshot!(render_summary(&entries), @r"
        [PREVIEW SUMMARY]
        Entries: 3
        Will rename: 1
        Conflicts: 2
        Unchanged: 0

        [RENAMES]
        file: a.txt -> a_v2.txt

        [CONFLICTS]
        x.txt -> z.txt
        y.txt -> z.txt
        ");
    }
}
