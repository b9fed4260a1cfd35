use crate::conflict::mark_conflicts;
use crate::entry::FileEntry;
use crate::rules::{DateSource, Rule, RuleKind};
use crate::transform;
use serde::{Deserialize, Serialize};

/// A rule that could not run during a preview pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWarning {
    /// Position of the rule in the rule list
    pub index: usize,
    pub kind: String,
    pub message: String,
}

/// Outcome of one preview pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewReport {
    /// Rules skipped for every entry, e.g. an invalid regex
    pub warnings: Vec<RuleWarning>,
    /// Number of entries marked as conflicting
    pub conflicts: usize,
}

/// Working name of one entry while the rules run
#[derive(Debug, Clone, PartialEq, Eq)]
struct NameParts {
    stem: String,
    extension: String,
}

impl NameParts {
    fn of(entry: &FileEntry) -> Self {
        let (stem, extension) = entry.proposed_parts();
        Self {
            stem: stem.to_string(),
            extension: extension.to_string(),
        }
    }

    fn join(&self) -> String {
        format!("{}{}", self.stem, self.extension)
    }
}

/// Recompute every proposed name from the original names.
///
/// Enabled rules run in order, each one seeing the previous rule's output.
/// The stem and extension are tracked separately for the whole pass, so a
/// rule that empties the stem cannot turn the extension into part of it.
/// No files are touched.
pub fn preview(entries: &mut [FileEntry], rules: &[Rule]) -> PreviewReport {
    for entry in entries.iter_mut() {
        entry.reset();
    }
    let mut parts: Vec<NameParts> = entries.iter().map(NameParts::of).collect();

    let mut report = PreviewReport::default();
    for (index, rule) in rules.iter().enumerate().filter(|(_, r)| r.enabled) {
        let outcome = rule
            .kind
            .validate()
            .map_err(|e| e.to_string())
            .and_then(|()| transform_parts(entries, &mut parts, &rule.kind));
        if let Err(message) = outcome {
            tracing::warn!("Skipping rule #{} ({}): {}", index, rule.kind.name(), message);
            report.warnings.push(RuleWarning {
                index,
                kind: rule.kind.name().to_string(),
                message,
            });
        }
    }

    for (entry, part) in entries.iter_mut().zip(&parts) {
        entry.proposed_name = part.join();
    }
    report.conflicts = mark_conflicts(entries);
    report
}

fn transform_parts(
    entries: &[FileEntry],
    parts: &mut [NameParts],
    kind: &RuleKind,
) -> Result<(), String> {
    match kind {
        RuleKind::Replace {
            search,
            replacement,
            case_sensitive,
        } => map_stems(entries, parts, |_, _, stem| {
            transform::replace_literal(stem, search, replacement, *case_sensitive)
        }),
        RuleKind::AddPrefix { text } => {
            map_stems(entries, parts, |_, _, stem| format!("{}{}", text, stem));
        },
        RuleKind::AddSuffix { text } => {
            map_stems(entries, parts, |_, _, stem| format!("{}{}", stem, text));
        },
        RuleKind::AddIndex {
            start,
            step,
            padding,
            template,
        } => map_stems(entries, parts, |position, _, stem| {
            let offset = step.saturating_mul(i64::try_from(position).unwrap_or(i64::MAX));
            let counter = transform::pad_counter(start.saturating_add(offset), *padding);
            format!("{}_{}", stem, transform::format_index(&counter, template))
        }),
        RuleKind::DeleteChars { start, end } => {
            map_stems(entries, parts, |_, _, stem| transform::delete_chars(stem, *start, *end));
        },
        RuleKind::Regex {
            pattern,
            replacement,
            case_insensitive,
            multiline,
        } => {
            let re = transform::build_regex(pattern, *case_insensitive, *multiline)
                .map_err(|e| e.to_string())?;
            map_stems(entries, parts, |_, _, stem| {
                re.replace_all(stem, replacement.as_str()).into_owned()
            });
        },
        RuleKind::CaseChange { mode } => {
            map_stems(entries, parts, |_, _, stem| transform::change_case(stem, *mode));
        },
        RuleKind::ChangeExtension { new_extension } => {
            let extension = transform::normalize_new_extension(new_extension);
            for (entry, part) in entries.iter().zip(parts.iter_mut()) {
                if !entry.is_dir {
                    part.extension.clone_from(&extension);
                }
            }
        },
        RuleKind::DateStamp {
            format,
            source,
            template,
        } => {
            transform::check_date_format(format)
                .map_err(|f| format!("invalid date format '{}'", f))?;
            map_stems(entries, parts, |_, entry, stem| {
                let date = match source {
                    DateSource::Created => &entry.created,
                    DateSource::Modified => &entry.modified,
                };
                let formatted = transform::format_date(date, format).unwrap_or_default();
                format!("{}_{}", transform::format_date_label(&formatted, template), stem)
            });
        },
    }
    Ok(())
}

/// Rewrite the stem of every entry, leaving its extension alone.
fn map_stems<F>(entries: &[FileEntry], parts: &mut [NameParts], mut f: F)
where
    F: FnMut(usize, &FileEntry, &str) -> String,
{
    for (position, (entry, part)) in entries.iter().zip(parts.iter_mut()).enumerate() {
        part.stem = f(position, entry, &part.stem);
    }
}
