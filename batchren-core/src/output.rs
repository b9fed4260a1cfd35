use crate::entry::FileEntry;
use crate::execute::{ExecuteReport, UndoReport};
use crate::pipeline::RuleWarning;
use crate::preview::PreviewSummary;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Result of a preview operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResult {
    pub directory: String,
    pub summary: PreviewSummary,
    pub warnings: Vec<RuleWarning>,
    pub entries: Vec<FileEntry>,
}

/// Result of an apply operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResult {
    pub directory: String,
    pub success_count: usize,
    pub error_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<String>,
    pub skipped: Vec<String>,
    /// Set when nothing was applied, e.g. the user declined or there was
    /// nothing to rename
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ApplyResult {
    pub fn from_report(directory: String, report: ExecuteReport) -> Self {
        Self {
            directory,
            success_count: report.success_count,
            error_count: report.error_count,
            skipped_count: report.skipped_count,
            errors: report.errors,
            skipped: report.skipped,
            note: None,
        }
    }

    /// Nothing was renamed, for the given reason
    pub fn nothing(directory: String, note: &str) -> Self {
        Self {
            directory,
            success_count: 0,
            error_count: 0,
            skipped_count: 0,
            errors: Vec::new(),
            skipped: Vec::new(),
            note: Some(note.to_string()),
        }
    }
}

/// Result of an undo operation
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResult {
    pub success: bool,
    pub message: String,
    pub restored: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl From<UndoReport> for UndoResult {
    fn from(report: UndoReport) -> Self {
        Self {
            success: report.success,
            message: report.message,
            restored: report.restored,
            failed: report.failed,
            errors: report.errors,
        }
    }
}

/// Result of a template generate operation
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResult {
    pub directory: String,
    pub template: String,
    pub summary: PreviewSummary,
    pub entries: Vec<FileEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<ApplyResult>,
}

/// Result of validating a rules file
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub path: String,
    pub rules: usize,
    pub enabled: usize,
    /// One message per invalid rule, prefixed with its position
    pub problems: Vec<String>,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn write_counts(output: &mut String, summary: &PreviewSummary) {
    let _ = writeln!(
        output,
        "Entries: {} ({} to rename, {} conflicts, {} unchanged)",
        summary.total, summary.will_rename, summary.conflicts, summary.unchanged
    );
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "preview",
            "directory": self.directory,
            "summary": self.summary,
            "warnings": self.warnings,
            "entries": self.entries,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Preview of {}\n", self.directory);
        write_counts(&mut output, &self.summary);
        for warning in &self.warnings {
            let _ = writeln!(
                output,
                "Warning: rule #{} ({}) skipped: {}",
                warning.index + 1,
                warning.kind,
                warning.message
            );
        }
        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.error_count == 0,
            "operation": "apply",
            "directory": self.directory,
            "summary": {
                "renamed": self.success_count,
                "errors": self.error_count,
                "skipped": self.skipped_count,
            },
            "errors": self.errors,
            "skipped": self.skipped,
            "note": self.note,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if let Some(note) = &self.note {
            return format!("{}\n", note);
        }

        let mut output = String::new();
        let _ = writeln!(output, "✓ Renamed {} entries", self.success_count);
        if self.skipped_count > 0 {
            let _ = writeln!(
                output,
                "Skipped {} conflicting entries: {}",
                self.skipped_count,
                self.skipped.join(", ")
            );
        }
        if self.error_count > 0 {
            let _ = writeln!(output, "✗ {} entries failed:", self.error_count);
            for error in self.errors.iter().take(10) {
                let _ = writeln!(output, "  {}", error);
            }
            if self.errors.len() > 10 {
                let _ = writeln!(output, "  ... and {} more", self.errors.len() - 10);
            }
        }
        output
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.success,
            "operation": "undo",
            "message": self.message,
            "summary": {
                "restored": self.restored,
                "failed": self.failed,
            },
            "errors": self.errors,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("{}\n", self.message);
        for error in &self.errors {
            let _ = writeln!(output, "  {}", error);
        }
        output
    }
}

impl OutputFormatter for GenerateResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "generate",
            "directory": self.directory,
            "template": self.template,
            "summary": self.summary,
            "entries": self.entries,
            "applied": self.applied,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Template '{}' on {}\n", self.template, self.directory);
        write_counts(&mut output, &self.summary);
        if let Some(applied) = &self.applied {
            output.push_str(&applied.format_summary());
        }
        output
    }
}

impl OutputFormatter for CheckResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.is_valid(),
            "operation": "check",
            "path": self.path,
            "rules": self.rules,
            "enabled": self.enabled,
            "problems": self.problems,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        if self.is_valid() {
            let _ = writeln!(
                output,
                "✓ {}: {} rules ({} enabled)",
                self.path, self.rules, self.enabled
            );
        } else {
            let _ = writeln!(output, "✗ {}: {} invalid rules", self.path, self.problems.len());
            for problem in &self.problems {
                let _ = writeln!(output, "  {}", problem);
            }
        }
        output
    }
}
