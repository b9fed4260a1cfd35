use crate::entry::{EntryStatus, FileEntry};
use std::collections::HashMap;

/// Mark every entry whose proposed name collides, ignoring case, with another.
///
/// All members of a colliding group are marked, not just the later ones.
/// Entries outside a collision keep their status. Returns the number of
/// entries marked.
pub fn mark_conflicts(entries: &mut [FileEntry]) -> usize {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, entry) in entries.iter().enumerate() {
        groups
            .entry(entry.proposed_name.to_lowercase())
            .or_default()
            .push(i);
    }

    let mut marked = 0;
    for members in groups.values().filter(|m| m.len() > 1) {
        for &i in members {
            entries[i].status = EntryStatus::Conflict;
            marked += 1;
        }
    }

    if marked > 0 {
        tracing::debug!("{} entries have conflicting names", marked);
    }
    marked
}

/// Proposed names shared by more than one entry, in catalog order
pub fn conflicting_names(entries: &[FileEntry]) -> Vec<String> {
    let mut seen = Vec::new();
    for entry in entries.iter().filter(|e| e.status == EntryStatus::Conflict) {
        let key = entry.proposed_name.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::path::PathBuf;

    fn entry(path: &str, proposed: &str) -> FileEntry {
        let now = Local::now();
        let mut e = FileEntry::new(PathBuf::from(path), false, 1, now, now);
        e.proposed_name = proposed.to_string();
        e
    }

    #[test]
    fn test_all_members_marked() {
        let mut entries = vec![
            entry("/d/x.txt", "z.txt"),
            entry("/d/y.txt", "Z.TXT"),
            entry("/d/w.txt", "w.txt"),
        ];
        assert_eq!(mark_conflicts(&mut entries), 2);
        assert_eq!(entries[0].status, EntryStatus::Conflict);
        assert_eq!(entries[1].status, EntryStatus::Conflict);
        assert_eq!(entries[2].status, EntryStatus::Ready);
        assert_eq!(conflicting_names(&entries), vec!["z.txt".to_string()]);
    }

    #[test]
    fn test_same_name_in_different_folders_conflicts() {
        let mut entries = vec![entry("/d/a/x.txt", "x.txt"), entry("/d/b/x.txt", "x.txt")];
        assert_eq!(mark_conflicts(&mut entries), 2);
    }

    #[test]
    fn test_non_conflicting_status_preserved() {
        let mut entries = vec![entry("/d/a.txt", "a.txt")];
        entries[0].status = EntryStatus::Error;
        assert_eq!(mark_conflicts(&mut entries), 0);
        assert_eq!(entries[0].status, EntryStatus::Error);
    }
}
