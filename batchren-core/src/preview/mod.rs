mod json;
mod summary;
mod table;

pub use json::render_json;
pub use summary::{render_summary, PreviewSummary};
pub use table::{format_size, render_table};

use crate::entry::FileEntry;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit) => explicit,
        None => std::env::var_os("NO_COLOR").is_none() && is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render entries in the requested format
pub fn render_preview(
    entries: &[FileEntry],
    format: Preview,
    use_color: Option<bool>,
    fixed_table_width: bool,
) -> String {
    match format {
        Preview::Table => render_table(entries, should_use_color(use_color), fixed_table_width),
        Preview::Summary => render_summary(entries),
        Preview::Json => render_json(entries),
        Preview::None => String::new(),
    }
}

/// Render a preview into `out`, making sure it ends with a newline
pub fn write_preview<W: Write>(
    out: &mut W,
    entries: &[FileEntry],
    format: Preview,
    use_color: Option<bool>,
    fixed_table_width: bool,
) -> io::Result<()> {
    let rendered = render_preview(entries, format, use_color, fixed_table_width);
    write!(out, "{}", rendered)?;
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryStatus;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;
    use std::str::FromStr;

    fn entries() -> Vec<FileEntry> {
        let date = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let mut a = FileEntry::new(PathBuf::from("/d/a.txt"), false, 2048, date, date);
        a.proposed_name = "a_v2.txt".to_string();
        let b = FileEntry::new(PathBuf::from("/d/docs"), true, 0, date, date);
        let mut c = FileEntry::new(PathBuf::from("/d/x.txt"), false, 10, date, date);
        c.proposed_name = "z.txt".to_string();
        c.status = EntryStatus::Conflict;
        vec![a, b, c]
    }

    #[test]
    fn test_preview_from_str() {
        assert_eq!(Preview::from_str("table"), Ok(Preview::Table));
        assert_eq!(Preview::from_str("SUMMARY"), Ok(Preview::Summary));
        assert_eq!(Preview::from_str("json"), Ok(Preview::Json));
        assert_eq!(Preview::from_str("none"), Ok(Preview::None));
        assert!(Preview::from_str("diff").is_err());
    }

    #[test]
    fn test_should_use_color_explicit() {
        assert!(should_use_color_with_detector(Some(true), || false));
        assert!(!should_use_color_with_detector(Some(false), || true));
    }

    #[test]
    fn test_render_table_no_color() {
        let output = render_table(&entries(), false, true);
        assert!(output.contains("Original"));
        assert!(output.contains("→ a_v2.txt"));
        assert!(output.contains("docs/"));
        assert!(output.contains("2.0 KB"));
        assert!(output.contains("2024-03-01 09:30"));
        assert!(output.contains("conflict"));
        assert!(output.contains("TOTALS"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_render_table_with_color() {
        let output = render_table(&entries(), true, true);
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn test_render_json() {
        let output = render_preview(&entries(), Preview::Json, Some(false), false);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["summary"]["will_rename"], 1);
        assert_eq!(value["summary"]["conflicts"], 1);
        assert_eq!(value["entries"][0]["proposed_name"], "a_v2.txt");
        assert_eq!(value["entries"][2]["status"], "conflict");
    }

    #[test]
    fn test_render_none_is_empty() {
        assert!(render_preview(&entries(), Preview::None, None, false).is_empty());
    }
}
