use crate::output::CheckResult;
use crate::rules::RuleSet;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a rules file and report every invalid enabled rule.
///
/// An unreadable or unparsable file is an error; invalid rules are not.
pub fn check_operation(path: &Path) -> Result<CheckResult> {
    let rules = RuleSet::load(path)
        .with_context(|| format!("Failed to load rules from {}", path.display()))?;

    let problems = rules
        .validate()
        .into_iter()
        .map(|(index, error)| {
            let kind = rules.get(index).map_or("rule", |r| r.kind.name());
            format!("#{} {}: {}", index + 1, kind, error)
        })
        .collect();

    Ok(CheckResult {
        path: path.display().to_string(),
        rules: rules.len(),
        enabled: rules.enabled().count(),
        problems,
    })
}
