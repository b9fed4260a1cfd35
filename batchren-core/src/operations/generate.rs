use super::apply::commit;
use super::RenameRequest;
use crate::entry::FileEntry;
use crate::output::GenerateResult;
use crate::preview::PreviewSummary;
use anyhow::{Context, Result};

/// Parameters of a template rename
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub template: String,
    pub start: i64,
    pub step: i64,
    pub padding: usize,
    /// Rename on disk after generating, subject to confirmation
    pub apply: bool,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            template: String::new(),
            start: 1,
            step: 1,
            padding: 3,
            apply: false,
        }
    }
}

/// Generate operation - regenerate every name from a template, optionally
/// applying the result. The request's rule list is ignored.
pub fn generate_operation<F>(
    request: &RenameRequest,
    generate: &GenerateRequest,
    confirm: F,
) -> Result<GenerateResult>
where
    F: FnOnce(&[FileEntry], &PreviewSummary) -> Result<bool>,
{
    let mut renamer = request.open()?;
    renamer
        .generate(&generate.template, generate.start, generate.step, generate.padding)
        .with_context(|| format!("Invalid template '{}'", generate.template))?;

    let summary = renamer.summary();
    let entries = renamer.entries().to_vec();
    let applied = if generate.apply {
        Some(commit(&mut renamer, request.display_dir(), confirm)?)
    } else {
        None
    };

    Ok(GenerateResult {
        directory: request.display_dir(),
        template: generate.template.clone(),
        summary,
        entries,
        applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.jpg"), "b").unwrap();
        fs::write(temp.path().join("a.jpg"), "a").unwrap();
        temp
    }

    #[test]
    fn test_generate_preview_only() {
        let temp = setup();
        let generate = GenerateRequest {
            template: "photo_{n}{ext}".to_string(),
            padding: 2,
            ..GenerateRequest::default()
        };
        let result =
            generate_operation(&RenameRequest::new(temp.path()), &generate, |_, _| Ok(true))
                .unwrap();
        let names: Vec<_> = result.entries.iter().map(|e| e.proposed_name.as_str()).collect();
        assert_eq!(names, vec!["photo_01.jpg", "photo_02.jpg"]);
        assert!(result.applied.is_none());
        assert!(temp.path().join("a.jpg").exists());
    }

    #[test]
    fn test_generate_and_apply() {
        let temp = setup();
        let generate = GenerateRequest {
            template: "{n}{ext}".to_string(),
            apply: true,
            ..GenerateRequest::default()
        };
        let result =
            generate_operation(&RenameRequest::new(temp.path()), &generate, |_, _| Ok(true))
                .unwrap();
        assert_eq!(result.applied.unwrap().success_count, 2);
        assert!(temp.path().join("001.jpg").exists());
        assert!(temp.path().join("002.jpg").exists());
    }

    #[test]
    fn test_bad_template_is_an_error() {
        let temp = setup();
        let generate = GenerateRequest {
            template: "{what}".to_string(),
            ..GenerateRequest::default()
        };
        let err = generate_operation(&RenameRequest::new(temp.path()), &generate, |_, _| Ok(true))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("unknown placeholder"));
        assert!(temp.path().join("a.jpg").exists());
    }
}
