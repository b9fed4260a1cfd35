//! Named-placeholder templates for regenerating whole names.
//!
//! Supported placeholders are `{n}`, `{ext}`, `{name}` and `{dir}`; `{{` and
//! `}}` produce literal braces. Nothing else is interpreted.

use crate::conflict::mark_conflicts;
use crate::entry::{EntryStatus, FileEntry};
use crate::rules::MAX_PADDING;
use crate::transform;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,

    #[error("unknown placeholder '{{{name}}}' at offset {offset}")]
    UnknownPlaceholder { name: String, offset: usize },

    #[error("unclosed '{{' at offset {0}")]
    Unclosed(usize),

    #[error("unmatched '}}' at offset {0}")]
    StrayBrace(usize),

    #[error("template text contains a path separator")]
    PathSeparator,

    #[error("counter padding {0} exceeds the maximum of 32")]
    PaddingTooLarge(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Counter,
    Extension,
    Name,
    Dir,
}

/// A parsed name template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        if source.trim().is_empty() {
            return Err(TemplateError::Empty);
        }
        if transform::has_path_separator(source) {
            return Err(TemplateError::PathSeparator);
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            let next = chars.peek().map(|&(_, n)| n);
            match c {
                '{' if next == Some('{') => {
                    chars.next();
                    literal.push('{');
                },
                '}' if next == Some('}') => {
                    chars.next();
                    literal.push('}');
                },
                '}' => return Err(TemplateError::StrayBrace(offset)),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(offset));
                    }

                    let segment = match name.as_str() {
                        "n" => Segment::Counter,
                        "ext" => Segment::Extension,
                        "name" => Segment::Name,
                        "dir" => Segment::Dir,
                        _ => return Err(TemplateError::UnknownPlaceholder { name, offset }),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                },
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Render the template for one entry with an already formatted counter
    pub fn render(&self, entry: &FileEntry, counter: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Counter => out.push_str(counter),
                Segment::Extension => out.push_str(&entry.extension),
                Segment::Name => out.push_str(entry.original_stem()),
                Segment::Dir => out.push_str(&entry.parent_name()),
            }
        }
        out
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Replace every proposed name with a rendering of `template`.
///
/// The template is parsed before any entry is touched, so a malformed
/// template leaves the entries exactly as they were. Returns the number of
/// conflicting entries afterwards.
pub fn generate(
    entries: &mut [FileEntry],
    template: &str,
    start: i64,
    step: i64,
    padding: usize,
) -> Result<usize, TemplateError> {
    let template = Template::parse(template)?;
    if padding > MAX_PADDING {
        return Err(TemplateError::PaddingTooLarge(padding));
    }

    let mut counter = start;
    for entry in entries.iter_mut() {
        let rendered = template.render(entry, &transform::pad_counter(counter, padding));
        entry.proposed_name = rendered;
        entry.status = EntryStatus::Ready;
        counter = counter.saturating_add(step);
    }

    Ok(mark_conflicts(entries))
}

/// Blank every proposed name, keeping only file extensions.
pub fn clear_names(entries: &mut [FileEntry]) -> usize {
    for entry in entries.iter_mut() {
        entry.proposed_name.clone_from(&entry.extension);
        entry.status = EntryStatus::Ready;
    }
    mark_conflicts(entries)
}
