use crate::entry::FileEntry;
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MIB: u64 = 1024 * 1024;

/// File size buckets offered by the file list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeFilter {
    #[default]
    Any,
    Under1M,
    From1MTo10M,
    From10MTo100M,
    Over100M,
}

impl SizeFilter {
    /// Directories always pass.
    pub fn matches(self, entry: &FileEntry) -> bool {
        if entry.is_dir {
            return true;
        }
        let size = entry.size;
        match self {
            Self::Any => true,
            Self::Under1M => size < MIB,
            Self::From1MTo10M => (MIB..=10 * MIB).contains(&size),
            Self::From10MTo100M => (10 * MIB..=100 * MIB).contains(&size),
            Self::Over100M => size > 100 * MIB,
        }
    }
}

impl FromStr for SizeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "under-1m" | "small" => Ok(Self::Under1M),
            "1m-10m" | "medium" => Ok(Self::From1MTo10M),
            "10m-100m" | "large" => Ok(Self::From10MTo100M),
            "over-100m" | "huge" => Ok(Self::Over100M),
            _ => Err(format!("Invalid size filter: {}", s)),
        }
    }
}

/// Modification-time windows offered by the file list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeFilter {
    #[default]
    Any,
    Today,
    LastWeek,
    LastMonth,
    LastYear,
}

impl AgeFilter {
    pub fn matches(self, modified: DateTime<Local>, now: DateTime<Local>) -> bool {
        match self {
            Self::Any => true,
            Self::Today => modified.date_naive() == now.date_naive(),
            Self::LastWeek => modified >= now - Duration::days(7),
            Self::LastMonth => modified >= now - Duration::days(30),
            Self::LastYear => modified >= now - Duration::days(365),
        }
    }
}

impl FromStr for AgeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "today" => Ok(Self::Today),
            "week" | "last-week" => Ok(Self::LastWeek),
            "month" | "last-month" => Ok(Self::LastMonth),
            "year" | "last-year" => Ok(Self::LastYear),
            _ => Err(format!("Invalid age filter: {}", s)),
        }
    }
}

/// Named groups of extensions for the type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionPreset {
    Images,
    Documents,
    Audio,
    Video,
    Archives,
    Executables,
}

impl ExtensionPreset {
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Images => &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"],
            Self::Documents => &[
                ".txt", ".doc", ".docx", ".pdf", ".rtf", ".odt", ".xls", ".xlsx",
            ],
            Self::Audio => &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a", ".wma"],
            Self::Video => &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm"],
            Self::Archives => &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2"],
            Self::Executables => &[".exe", ".msi", ".bat", ".cmd", ".com"],
        }
    }
}

impl FromStr for ExtensionPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "images" | "image" => Ok(Self::Images),
            "documents" | "docs" => Ok(Self::Documents),
            "audio" => Ok(Self::Audio),
            "video" | "videos" => Ok(Self::Video),
            "archives" | "archive" => Ok(Self::Archives),
            "executables" | "exe" => Ok(Self::Executables),
            _ => Err(format!("Invalid extension preset: {}", s)),
        }
    }
}

/// Lowercase an extension and make sure it has exactly one leading dot.
///
/// An empty input stays empty.
pub fn normalize_extension(ext: &str) -> String {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(".{}", trimmed.to_lowercase())
    }
}

/// Post-scan filters applied to every entry the walker yields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Keep directories in the catalog
    pub include_folders: bool,
    /// Keep names starting with a dot
    pub show_hidden: bool,
    /// Case-insensitive substring the name must contain
    pub name_contains: Option<String>,
    pub size: SizeFilter,
    pub age: AgeFilter,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            include_folders: true,
            show_hidden: true,
            name_contains: None,
            size: SizeFilter::Any,
            age: AgeFilter::Any,
        }
    }
}

impl EntryFilter {
    pub fn matches(&self, entry: &FileEntry, now: DateTime<Local>) -> bool {
        if entry.is_dir && !self.include_folders {
            return false;
        }
        if !self.show_hidden && entry.original_name.starts_with('.') {
            return false;
        }
        if let Some(needle) = self.name_contains.as_deref().filter(|n| !n.is_empty()) {
            if !entry
                .original_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        self.size.matches(entry) && self.age.matches(entry.modified, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str, is_dir: bool, size: u64) -> FileEntry {
        let now = Local::now();
        FileEntry::new(PathBuf::from("/data").join(name), is_dir, size, now, now)
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("JPG"), ".jpg");
        assert_eq!(normalize_extension(".Png"), ".png");
        assert_eq!(normalize_extension("..md"), ".md");
        assert_eq!(normalize_extension(""), "");
        assert_eq!(normalize_extension("."), "");
    }

    #[test]
    fn test_size_filter_buckets() {
        assert!(SizeFilter::Under1M.matches(&entry("a.bin", false, 10)));
        assert!(!SizeFilter::Under1M.matches(&entry("a.bin", false, 2 * MIB)));
        assert!(SizeFilter::From1MTo10M.matches(&entry("a.bin", false, 2 * MIB)));
        assert!(SizeFilter::Over100M.matches(&entry("a.bin", false, 101 * MIB)));
        // Directories are never excluded by size
        assert!(SizeFilter::Over100M.matches(&entry("dir", true, 0)));
    }

    #[test]
    fn test_age_filter() {
        let now = Local::now();
        assert!(AgeFilter::Today.matches(now, now));
        assert!(AgeFilter::LastWeek.matches(now - Duration::days(3), now));
        assert!(!AgeFilter::LastWeek.matches(now - Duration::days(8), now));
        assert!(AgeFilter::LastYear.matches(now - Duration::days(200), now));
    }

    #[test]
    fn test_entry_filter_hidden_and_folders() {
        let now = Local::now();
        let filter = EntryFilter {
            include_folders: false,
            show_hidden: false,
            ..EntryFilter::default()
        };
        assert!(!filter.matches(&entry(".env", false, 1), now));
        assert!(!filter.matches(&entry("photos", true, 0), now));
        assert!(filter.matches(&entry("a.txt", false, 1), now));
    }

    #[test]
    fn test_entry_filter_name_contains_ignores_case() {
        let now = Local::now();
        let filter = EntryFilter {
            name_contains: Some("holiday".to_string()),
            ..EntryFilter::default()
        };
        assert!(filter.matches(&entry("Holiday_2023.jpg", false, 1), now));
        assert!(!filter.matches(&entry("work.jpg", false, 1), now));
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("images".parse::<ExtensionPreset>(), Ok(ExtensionPreset::Images));
        assert!(ExtensionPreset::Audio.extensions().contains(&".flac"));
        assert!("bogus".parse::<ExtensionPreset>().is_err());
    }
}
