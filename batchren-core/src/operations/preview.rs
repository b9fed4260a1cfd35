use super::RenameRequest;
use crate::output::PreviewResult;
use crate::preview::{render_preview, Preview};
use anyhow::Result;

/// Preview operation - scans, runs the rules and renders the result.
///
/// Returns the structured result and, unless the format is `None`, the
/// rendered preview.
pub fn preview_operation(
    request: &RenameRequest,
    preview_format: Preview,
    use_color: Option<bool>,
    fixed_table_width: bool,
) -> Result<(PreviewResult, Option<String>)> {
    let mut renamer = request.open()?;
    let report = renamer.preview()?;

    let rendered = match preview_format {
        Preview::None => None,
        format => Some(render_preview(
            renamer.entries(),
            format,
            use_color,
            fixed_table_width,
        )),
    };

    let result = PreviewResult {
        directory: request.display_dir(),
        summary: renamer.summary(),
        warnings: report.warnings,
        entries: renamer.entries().to_vec(),
    };
    Ok((result, rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_preview_touches_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let mut request = RenameRequest::new(temp.path());
        request.rules.push(Rule::add_prefix("new_"));

        let (result, rendered) =
            preview_operation(&request, Preview::Summary, Some(false), true).unwrap();
        assert_eq!(result.summary.will_rename, 1);
        assert_eq!(result.entries[0].proposed_name, "new_a.txt");
        assert!(rendered.unwrap().contains("a.txt -> new_a.txt"));
        assert!(temp.path().join("a.txt").exists());
    }

    #[test]
    fn test_preview_missing_directory() {
        let temp = TempDir::new().unwrap();
        let request = RenameRequest::new(temp.path().join("missing"));
        let err = preview_operation(&request, Preview::None, None, false).unwrap_err();
        assert!(format!("{:#}", err).contains("Directory not found"));
    }
}
