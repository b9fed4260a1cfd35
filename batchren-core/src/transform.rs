//! String-level building blocks used by the rename rules.
//!
//! Everything here is pure: no filesystem access and no entry state.

use crate::rules::{CaseMode, MAX_PADDING};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use regex::{NoExpand, Regex, RegexBuilder};
use std::fmt::Write;

pub const INDEX_TOKEN: &str = "{index}";
pub const DATE_TOKEN: &str = "{date}";

pub fn build_regex(
    pattern: &str,
    case_insensitive: bool,
    multiline: bool,
) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .multi_line(multiline)
        .build()
}

/// True when `text` cannot be part of a single path component
pub fn has_path_separator(text: &str) -> bool {
    text.contains(['/', '\\', '\0'])
}

/// Replace every occurrence of `search` with `replacement`, inserted literally.
///
/// An empty `search` leaves the input unchanged.
pub fn replace_literal(stem: &str, search: &str, replacement: &str, case_sensitive: bool) -> String {
    if search.is_empty() {
        return stem.to_string();
    }
    if case_sensitive {
        return stem.replace(search, replacement);
    }
    match build_regex(&regex::escape(search), true, false) {
        Ok(re) => re.replace_all(stem, NoExpand(replacement)).into_owned(),
        // An escaped literal always compiles unless it exceeds the size limit
        Err(_) => stem.to_string(),
    }
}

/// Zero-pad a counter to `width` characters, keeping a minus sign in front.
/// Widths above [`MAX_PADDING`] are capped.
pub fn pad_counter(value: i64, width: usize) -> String {
    let width = width.min(MAX_PADDING);
    let digits = value.unsigned_abs().to_string();
    if value < 0 {
        let width = width.saturating_sub(1);
        format!("-{:0>width$}", digits)
    } else {
        format!("{:0>width$}", digits)
    }
}

/// Combine a padded counter with the index template.
pub fn format_index(counter: &str, template: &str) -> String {
    if template.is_empty() {
        counter.to_string()
    } else if template.contains(INDEX_TOKEN) {
        template.replace(INDEX_TOKEN, counter)
    } else {
        format!("{}{}", template, counter)
    }
}

/// Combine a formatted date with the date template.
pub fn format_date_label(date: &str, template: &str) -> String {
    if template.is_empty() {
        date.to_string()
    } else if template.contains(DATE_TOKEN) {
        template.replace(DATE_TOKEN, date)
    } else {
        format!("{}_{}", date, template)
    }
}

/// Remove the characters at offsets `[start, end)`.
///
/// Offsets count characters, not bytes, and are clamped to the input length.
pub fn delete_chars(stem: &str, start: i64, end: i64) -> String {
    if start < 0 || end <= start {
        return stem.to_string();
    }
    let len = stem.chars().count();
    let start = usize::try_from(start).map_or(len, |s| s.min(len));
    let end = usize::try_from(end).map_or(len, |e| e.min(len));

    stem.chars()
        .enumerate()
        .filter(|(i, _)| *i < start || *i >= end)
        .map(|(_, c)| c)
        .collect()
}

pub fn change_case(stem: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Upper => stem.to_uppercase(),
        CaseMode::Lower => stem.to_lowercase(),
        CaseMode::Title => title_case(stem),
        CaseMode::Sentence => sentence_case(stem),
    }
}

/// Uppercase the first cased character of every run, lowercase the rest.
///
/// Any character without case (digits, separators, punctuation) starts a new run.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && !prev_cased {
            out.extend(c.to_uppercase());
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Normalize a replacement extension to have one leading dot.
///
/// Case is preserved. An empty value means "no extension".
pub fn normalize_new_extension(ext: &str) -> String {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(".{}", trimmed)
    }
}

/// Reject strftime strings containing unknown or malformed specifiers.
pub fn check_date_format(format: &str) -> Result<(), String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        Err(format.to_string())
    } else {
        Ok(())
    }
}

/// Format a timestamp without panicking on bad specifiers.
pub fn format_date(date: &DateTime<Local>, format: &str) -> Result<String, String> {
    check_date_format(format)?;
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| format.to_string())?;
    Ok(out)
}
