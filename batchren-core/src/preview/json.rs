use crate::entry::FileEntry;
use crate::preview::summary::PreviewSummary;
use serde_json::json;

/// Render entries and their summary counts as pretty JSON
pub fn render_json(entries: &[FileEntry]) -> String {
    let value = json!({
        "summary": PreviewSummary::from_entries(entries),
        "entries": entries,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "null".to_string())
}
