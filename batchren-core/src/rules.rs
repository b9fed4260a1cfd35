use crate::error::{Error, Result};
use crate::transform;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Widest zero-padded counter an index rule or template may ask for
pub const MAX_PADDING: usize = 32;

/// Case conversion applied by [`RuleKind::CaseChange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    /// EVERYTHING UPPER
    Upper,
    /// everything lower
    Lower,
    /// Each Word Capitalized
    Title,
    /// First letter only
    Sentence,
}

impl FromStr for CaseMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "title" => Ok(Self::Title),
            "sentence" => Ok(Self::Sentence),
            _ => Err(format!("Invalid case mode: {}", s)),
        }
    }
}

/// Which timestamp a date stamp uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    #[default]
    Created,
    Modified,
}

/// The kind-specific part of a rename rule.
///
/// Every variant carries only the parameters it uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    Replace {
        search: String,
        #[serde(default)]
        replacement: String,
        #[serde(default = "default_true")]
        case_sensitive: bool,
    },
    AddPrefix {
        text: String,
    },
    AddSuffix {
        text: String,
    },
    AddIndex {
        #[serde(default = "default_start")]
        start: i64,
        #[serde(default = "default_step")]
        step: i64,
        #[serde(default = "default_padding")]
        padding: usize,
        /// Text placed around the counter; `{index}` marks where it goes
        #[serde(default)]
        template: String,
    },
    /// Remove the characters in `[start, end)` of the stem
    DeleteChars {
        start: i64,
        end: i64,
    },
    Regex {
        pattern: String,
        #[serde(default)]
        replacement: String,
        #[serde(default)]
        case_insensitive: bool,
        #[serde(default)]
        multiline: bool,
    },
    CaseChange {
        mode: CaseMode,
    },
    ChangeExtension {
        new_extension: String,
    },
    DateStamp {
        #[serde(default = "default_date_format")]
        format: String,
        #[serde(default)]
        source: DateSource,
        /// Text placed around the date; `{date}` marks where it goes
        #[serde(default)]
        template: String,
    },
}

fn default_true() -> bool {
    true
}

fn default_start() -> i64 {
    1
}

fn default_step() -> i64 {
    1
}

fn default_padding() -> usize {
    3
}

fn default_date_format() -> String {
    "%Y%m%d".to_string()
}

/// Reasons a rule cannot do useful work
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("search text is empty")]
    EmptySearch,

    #[error("text to add is empty")]
    EmptyText,

    #[error("padding {0} exceeds the maximum of 32")]
    PaddingTooLarge(usize),

    #[error("step must not be zero")]
    ZeroStep,

    #[error("delete range [{start}, {end}) is empty or negative")]
    InvalidRange { start: i64, end: i64 },

    #[error("invalid regular expression: {0}")]
    Regex(String),

    #[error("invalid date format: {0}")]
    DateFormat(String),

    #[error("'{0}' contains a path separator")]
    PathSeparator(String),
}

impl RuleKind {
    /// Short stable name of the rule kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Replace { .. } => "replace",
            Self::AddPrefix { .. } => "add_prefix",
            Self::AddSuffix { .. } => "add_suffix",
            Self::AddIndex { .. } => "add_index",
            Self::DeleteChars { .. } => "delete_chars",
            Self::Regex { .. } => "regex",
            Self::CaseChange { .. } => "case_change",
            Self::ChangeExtension { .. } => "change_extension",
            Self::DateStamp { .. } => "date_stamp",
        }
    }

    /// One-line human description, used by previews and the session listing
    pub fn describe(&self) -> String {
        match self {
            Self::Replace {
                search,
                replacement,
                case_sensitive,
            } => format!(
                "replace '{}' -> '{}'{}",
                search,
                replacement,
                if *case_sensitive { "" } else { " (ignore case)" }
            ),
            Self::AddPrefix { text } => format!("prefix '{}'", text),
            Self::AddSuffix { text } => format!("suffix '{}'", text),
            Self::AddIndex {
                start,
                step,
                padding,
                template,
            } => {
                let mut out = format!("index from {} step {} width {}", start, step, padding);
                if !template.is_empty() {
                    out.push_str(&format!(" template '{}'", template));
                }
                out
            },
            Self::DeleteChars { start, end } => format!("delete chars [{}, {})", start, end),
            Self::Regex {
                pattern,
                replacement,
                ..
            } => format!("regex /{}/ -> '{}'", pattern, replacement),
            Self::CaseChange { mode } => format!("case {:?}", mode).to_lowercase(),
            Self::ChangeExtension { new_extension } => format!("extension -> '{}'", new_extension),
            Self::DateStamp {
                format, source, ..
            } => format!(
                "date stamp '{}' ({})",
                format,
                format!("{:?}", source).to_lowercase()
            ),
        }
    }

    /// Check the parameters for values that make the rule useless or unsafe.
    pub fn validate(&self) -> std::result::Result<(), RuleError> {
        match self {
            Self::Replace {
                search,
                replacement,
                ..
            } => {
                if search.is_empty() {
                    return Err(RuleError::EmptySearch);
                }
                check_separator(replacement)
            },
            Self::AddPrefix { text } | Self::AddSuffix { text } => {
                if text.is_empty() {
                    return Err(RuleError::EmptyText);
                }
                check_separator(text)
            },
            Self::AddIndex {
                step,
                padding,
                template,
                ..
            } => {
                if *padding > MAX_PADDING {
                    return Err(RuleError::PaddingTooLarge(*padding));
                }
                if *step == 0 {
                    return Err(RuleError::ZeroStep);
                }
                check_separator(template)
            },
            Self::DeleteChars { start, end } => {
                if *start < 0 || end <= start {
                    return Err(RuleError::InvalidRange {
                        start: *start,
                        end: *end,
                    });
                }
                Ok(())
            },
            Self::Regex {
                pattern,
                replacement,
                case_insensitive,
                multiline,
            } => {
                transform::build_regex(pattern, *case_insensitive, *multiline)
                    .map_err(|e| RuleError::Regex(e.to_string()))?;
                check_separator(replacement)
            },
            Self::CaseChange { .. } => Ok(()),
            Self::ChangeExtension { new_extension } => check_separator(new_extension),
            Self::DateStamp {
                format, template, ..
            } => {
                transform::check_date_format(format).map_err(RuleError::DateFormat)?;
                check_separator(template)
            },
        }
    }
}

fn check_separator(text: &str) -> std::result::Result<(), RuleError> {
    if transform::has_path_separator(text) {
        Err(RuleError::PathSeparator(text.to_string()))
    } else {
        Ok(())
    }
}

/// A rename rule with its on/off switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(flatten)]
    pub kind: RuleKind,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            enabled: true,
            kind,
        }
    }

    pub fn replace(search: &str, replacement: &str, case_sensitive: bool) -> Self {
        Self::new(RuleKind::Replace {
            search: search.to_string(),
            replacement: replacement.to_string(),
            case_sensitive,
        })
    }

    pub fn add_prefix(text: &str) -> Self {
        Self::new(RuleKind::AddPrefix {
            text: text.to_string(),
        })
    }

    pub fn add_suffix(text: &str) -> Self {
        Self::new(RuleKind::AddSuffix {
            text: text.to_string(),
        })
    }

    pub fn add_index(start: i64, step: i64, padding: usize, template: &str) -> Self {
        Self::new(RuleKind::AddIndex {
            start,
            step,
            padding,
            template: template.to_string(),
        })
    }

    pub fn delete_chars(start: i64, end: i64) -> Self {
        Self::new(RuleKind::DeleteChars { start, end })
    }

    pub fn regex(pattern: &str, replacement: &str) -> Self {
        Self::new(RuleKind::Regex {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            case_insensitive: false,
            multiline: false,
        })
    }

    pub fn case_change(mode: CaseMode) -> Self {
        Self::new(RuleKind::CaseChange { mode })
    }

    pub fn change_extension(new_extension: &str) -> Self {
        Self::new(RuleKind::ChangeExtension {
            new_extension: new_extension.to_string(),
        })
    }

    pub fn date_stamp(format: &str, source: DateSource, template: &str) -> Self {
        Self::new(RuleKind::DateStamp {
            format: format.to_string(),
            source,
            template: template.to_string(),
        })
    }

    /// Return the same rule switched off
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Ordered list of rules. Disabled rules keep their place and settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Insert at `index`, appending when it is past the end
    pub fn insert(&mut self, index: usize, rule: Rule) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    pub fn remove(&mut self, index: usize) -> Option<Rule> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Move the rule at `from` so it ends up at position `to`.
    ///
    /// Returns false when either index is out of range.
    pub fn move_rule(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rules.len() || to >= self.rules.len() {
            return false;
        }
        let rule = self.rules.remove(from);
        self.rules.insert(to, rule);
        true
    }

    /// Flip the enabled flag, returning the new state
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        self.rules.get_mut(index).map(|rule| {
            rule.enabled = !rule.enabled;
            rule.enabled
        })
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Enabled rules in sequence order
    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.enabled)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    /// Validate every enabled rule, returning the index and reason of each failure
    pub fn validate(&self) -> Vec<(usize, RuleError)> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.enabled)
            .filter_map(|(i, rule)| rule.kind.validate().err().map(|e| (i, e)))
            .collect()
    }

    /// Fail on the first invalid enabled rule
    pub fn ensure_valid(&self) -> Result<()> {
        match self.validate().into_iter().next() {
            Some((index, source)) => Err(Error::InvalidRule { index, source }),
            None => Ok(()),
        }
    }

    /// Load rules from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let parsed = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| Error::RulesFile {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Write rules to a `.json` or `.toml` file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| e.to_string())
        } else {
            toml::to_string_pretty(self).map_err(|e| e.to_string())
        }
        .map_err(|message| Error::RulesFile {
            path: path.to_path_buf(),
            message,
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(path, content).map_err(|e| Error::io(path, e))
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_reports_bad_rules() {
        assert_eq!(
            Rule::replace("", "x", true).kind.validate(),
            Err(RuleError::EmptySearch)
        );
        assert_eq!(
            Rule::delete_chars(3, 3).kind.validate(),
            Err(RuleError::InvalidRange { start: 3, end: 3 })
        );
        assert_eq!(
            Rule::add_index(1, 0, 3, "").kind.validate(),
            Err(RuleError::ZeroStep)
        );
        assert!(matches!(
            Rule::regex("(unclosed", "").kind.validate(),
            Err(RuleError::Regex(_))
        ));
        assert!(matches!(
            Rule::add_suffix("a/b").kind.validate(),
            Err(RuleError::PathSeparator(_))
        ));
        assert!(matches!(
            Rule::date_stamp("%Y-%Q", DateSource::Modified, "").kind.validate(),
            Err(RuleError::DateFormat(_))
        ));
        assert!(Rule::case_change(CaseMode::Title).kind.validate().is_ok());
    }

    #[test]
    fn test_validate_skips_disabled_rules() {
        let rules = RuleSet::from(vec![
            Rule::add_suffix("_ok"),
            Rule::regex("[", "").disabled(),
            Rule::delete_chars(5, 1),
        ]);
        let errors = rules.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 2);
        assert!(matches!(
            rules.ensure_valid(),
            Err(Error::InvalidRule { index: 2, .. })
        ));
    }

    #[test]
    fn test_move_and_toggle() {
        let mut rules = RuleSet::new();
        rules.push(Rule::add_prefix("a"));
        rules.push(Rule::add_prefix("b"));
        rules.push(Rule::add_prefix("c"));

        assert!(rules.move_rule(2, 0));
        let order: Vec<_> = rules.iter().map(|r| r.kind.describe()).collect();
        assert_eq!(order, vec!["prefix 'c'", "prefix 'a'", "prefix 'b'"]);
        assert!(!rules.move_rule(0, 3));

        assert_eq!(rules.toggle(1), Some(false));
        assert_eq!(rules.enabled().count(), 2);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.toggle(9), None);
        assert!(rules.remove(9).is_none());
    }

    #[test]
    fn test_parse_toml_rules_with_defaults() {
        let content = r#"
[[rules]]
kind = "add_index"

[[rules]]
kind = "replace"
search = "IMG"
replacement = "photo"
case_sensitive = false
enabled = false

[[rules]]
kind = "case_change"
mode = "title"
"#;
        let rules: RuleSet = toml::from_str(content).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(
            rules.get(0).unwrap().kind,
            RuleKind::AddIndex {
                start: 1,
                step: 1,
                padding: 3,
                template: String::new(),
            }
        );
        assert!(!rules.get(1).unwrap().enabled);
        assert_eq!(
            rules.get(2).unwrap().kind,
            RuleKind::CaseChange {
                mode: CaseMode::Title
            }
        );
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let temp = TempDir::new().unwrap();
        let rules = RuleSet::from(vec![
            Rule::date_stamp("%Y-%m-%d", DateSource::Modified, "{date}"),
            Rule::change_extension("md").disabled(),
        ]);

        for name in ["rules.toml", "rules.json"] {
            let path = temp.path().join(name);
            rules.save(&path).unwrap();
            assert_eq!(RuleSet::load(&path).unwrap(), rules);
        }
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "[[rules]]\nkind = \"teleport\"\n").unwrap();
        assert!(matches!(
            RuleSet::load(&path),
            Err(Error::RulesFile { .. })
        ));
    }
}
