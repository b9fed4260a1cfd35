use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Lifecycle state of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Ready,
    Renamed,
    Error,
    Skipped,
    Conflict,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Renamed => "renamed",
            Self::Error => "error",
            Self::Skipped => "skipped",
            Self::Conflict => "conflict",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file or directory found under the scanned root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path, updated in place after a successful rename
    pub path: PathBuf,
    /// Name on disk at scan time (or after the last rename)
    pub original_name: String,
    /// Name produced by the rule pipeline or template generator
    pub proposed_name: String,
    /// Extension including the leading dot, empty when there is none
    pub extension: String,
    /// Size in bytes, 0 for directories
    pub size: u64,
    pub modified: DateTime<Local>,
    pub created: DateTime<Local>,
    pub is_dir: bool,
    pub status: EntryStatus,
}

impl FileEntry {
    /// Build an entry for `path`, with the proposed name equal to the current one.
    pub fn new(
        path: PathBuf,
        is_dir: bool,
        size: u64,
        modified: DateTime<Local>,
        created: DateTime<Local>,
    ) -> Self {
        let original_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = if is_dir {
            String::new()
        } else {
            split_name(&original_name).1.to_string()
        };

        Self {
            path,
            proposed_name: original_name.clone(),
            original_name,
            extension,
            size: if is_dir { 0 } else { size },
            modified,
            created,
            is_dir,
            status: EntryStatus::Ready,
        }
    }

    /// Split the current proposed name into `(stem, extension)`.
    ///
    /// Directories never carry an extension.
    pub fn proposed_parts(&self) -> (&str, &str) {
        if self.is_dir {
            (self.proposed_name.as_str(), "")
        } else {
            split_name(&self.proposed_name)
        }
    }

    /// Stem of the name on disk
    pub fn original_stem(&self) -> &str {
        if self.is_dir {
            &self.original_name
        } else {
            split_name(&self.original_name).0
        }
    }

    /// Name of the directory containing this entry
    pub fn parent_name(&self) -> String {
        self.path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_changed(&self) -> bool {
        self.proposed_name != self.original_name
    }

    /// Forget the proposed name and any status from a previous pass.
    pub fn reset(&mut self) {
        self.proposed_name.clone_from(&self.original_name);
        self.status = EntryStatus::Ready;
    }

    /// Record that the entry now lives at `new_path` on disk.
    pub(crate) fn mark_renamed(&mut self, new_path: PathBuf) {
        self.original_name.clone_from(&self.proposed_name);
        if !self.is_dir {
            self.extension = split_name(&self.original_name).1.to_string();
        }
        self.path = new_path;
        self.status = EntryStatus::Renamed;
    }
}

/// Split a file name into stem and extension.
///
/// The extension starts at the last dot, unless that dot is the first or
/// the last character of the name: `.bashrc` and `notes.` have no extension.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx < name.len() - 1 => name.split_at(idx),
        _ => (name, ""),
    }
}
