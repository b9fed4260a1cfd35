use crate::entry::{EntryStatus, FileEntry};
use crate::error::{Error, Result};
use crate::filter::{normalize_extension, EntryFilter, ExtensionPreset};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling which entries a scan collects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Descend into subdirectories instead of listing direct children only
    pub recursive: bool,
    /// Allowed file extensions (lowercase, leading dot); empty allows all
    pub extension_filter: Vec<String>,
    #[serde(default)]
    pub filter: EntryFilter,
}

impl ScanOptions {
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Restrict files to the given extensions. Values are normalized.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extensions {
            let ext = normalize_extension(ext.as_ref());
            if !ext.is_empty() && !self.extension_filter.contains(&ext) {
                self.extension_filter.push(ext);
            }
        }
        self
    }

    pub fn with_preset(self, preset: ExtensionPreset) -> Self {
        self.with_extensions(preset.extensions().iter().copied())
    }

    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = filter;
        self
    }

    fn allows_extension(&self, entry: &FileEntry) -> bool {
        entry.is_dir
            || self.extension_filter.is_empty()
            || self
                .extension_filter
                .iter()
                .any(|ext| normalize_extension(ext) == entry.extension.to_lowercase())
    }
}

/// Scan `root` and return its entries sorted case-insensitively by name.
///
/// Entries whose metadata cannot be read are logged and skipped.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<Vec<FileEntry>> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {},
        Ok(_) => return Err(Error::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NotFound(root.to_path_buf()));
        },
        Err(e) => return Err(Error::io(root, e)),
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let now = Local::now();
    let mut entries = Vec::new();

    for item in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
    {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            },
        };

        let meta = match item.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!("Cannot read metadata for {}: {}", item.path().display(), e);
                continue;
            },
        };

        let entry = entry_from_metadata(item.path().to_path_buf(), &meta);
        if options.allows_extension(&entry) && options.filter.matches(&entry, now) {
            entries.push(entry);
        }
    }

    sort_entries(&mut entries);
    tracing::debug!("Scanned {} entries under {}", entries.len(), root.display());
    Ok(entries)
}

fn entry_from_metadata(path: PathBuf, meta: &Metadata) -> FileEntry {
    let modified: DateTime<Local> = meta
        .modified()
        .map(DateTime::from)
        .unwrap_or_else(|_| Local::now());
    // Not every platform records a birth time
    let created: DateTime<Local> = meta.created().map(DateTime::from).unwrap_or(modified);

    FileEntry::new(path, meta.is_dir(), meta.len(), modified, created)
}

/// Catalog order: case-insensitive name, then full path for a total order.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by_cached_key(|e| (e.original_name.to_lowercase(), e.path.clone()));
}

/// The entries of one scanned directory together with the options used
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    options: ScanOptions,
    entries: Vec<FileEntry>,
}

impl Catalog {
    /// Scan `root` and build a catalog from the result
    pub fn load(root: impl Into<PathBuf>, options: ScanOptions) -> Result<Self> {
        let root = root.into();
        let entries = scan(&root, &options)?;
        Ok(Self {
            root,
            options,
            entries,
        })
    }

    /// Replace the entry list with a fresh scan using the same options.
    pub fn rescan(&mut self) -> Result<()> {
        self.entries = scan(&self.root, &self.options)?;
        Ok(())
    }

    /// Re-read metadata for the current entries without rescanning.
    ///
    /// Entries whose path no longer exists are marked as errors.
    pub fn refresh(&mut self) {
        for entry in &mut self.entries {
            match fs::symlink_metadata(&entry.path) {
                Ok(meta) => {
                    let fresh = entry_from_metadata(entry.path.clone(), &meta);
                    entry.size = fresh.size;
                    entry.modified = fresh.modified;
                    entry.created = fresh.created;
                    if fresh.original_name != entry.original_name {
                        entry.original_name = fresh.original_name;
                        entry.extension = fresh.extension;
                        entry.reset();
                    }
                },
                Err(e) => {
                    tracing::warn!("{} is no longer accessible: {}", entry.path.display(), e);
                    entry.status = EntryStatus::Error;
                },
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut Vec<FileEntry> {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
