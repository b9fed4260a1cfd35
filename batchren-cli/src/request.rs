use anyhow::{anyhow, Context, Result};
use batchren_core::{Config, EntryFilter, RenameRequest, Rule, RuleSet, ScanOptions};
use std::path::Path;

use crate::cli::args::{RuleArgs, ScanArgs};

/// Combine scan flags with the config defaults. Flags can only narrow what
/// the config allows, except `--recursive` which turns recursion on.
pub fn scan_options(args: &ScanArgs, config: &Config) -> ScanOptions {
    let defaults = &config.defaults;
    let filter = EntryFilter {
        include_folders: defaults.include_folders && !args.no_folders,
        show_hidden: defaults.show_hidden && !args.no_hidden,
        name_contains: args.name.clone().filter(|n| !n.is_empty()),
        size: args.size.map(Into::into).unwrap_or_default(),
        age: args.age.map(Into::into).unwrap_or_default(),
    };

    let mut options = ScanOptions::default()
        .recursive(args.recursive || defaults.recursive)
        .with_extensions(&args.extensions)
        .with_filter(filter);
    if let Some(preset) = args.preset {
        options = options.with_preset(preset.into());
    }
    options
}

/// Parse a `FROM=TO` replacement. `TO` may be empty, `FROM` may not.
pub fn parse_replacement(spec: &str) -> Result<(&str, &str)> {
    let (from, to) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid --replace '{}', expected FROM=TO", spec))?;
    if from.is_empty() {
        return Err(anyhow!("invalid --replace '{}', FROM is empty", spec));
    }
    Ok((from, to))
}

/// Build the rule list from a rules file followed by the quick flags
pub fn rule_set(args: &RuleArgs) -> Result<RuleSet> {
    let mut rules = match &args.rules {
        Some(path) => RuleSet::load(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => RuleSet::new(),
    };

    for spec in &args.replace {
        let (from, to) = parse_replacement(spec)?;
        rules.push(Rule::replace(from, to, !args.ignore_case));
    }
    if let Some(text) = &args.prefix {
        rules.push(Rule::add_prefix(text));
    }
    if let Some(text) = &args.suffix {
        rules.push(Rule::add_suffix(text));
    }
    if let Some(mode) = args.case {
        rules.push(Rule::case_change(mode.into()));
    }
    if let Some(ext) = &args.set_ext {
        rules.push(Rule::change_extension(ext));
    }
    Ok(rules)
}

pub fn build_request(dir: &Path, scan: &ScanArgs, rules: RuleSet, config: &Config) -> RenameRequest {
    RenameRequest {
        directory: dir.to_path_buf(),
        scan: scan_options(scan, config),
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{CaseArg, SizeArg};
    use batchren_core::{RuleKind, SizeFilter};

    #[test]
    fn test_parse_replacement() {
        assert_eq!(parse_replacement("a=b").unwrap(), ("a", "b"));
        assert_eq!(parse_replacement("a=").unwrap(), ("a", ""));
        assert_eq!(parse_replacement("a=b=c").unwrap(), ("a", "b=c"));
        assert!(parse_replacement("ab").is_err());
        assert!(parse_replacement("=b").is_err());
    }

    #[test]
    fn test_quick_flag_order() {
        let args = RuleArgs {
            replace: vec!["IMG=photo".to_string()],
            prefix: Some("2024_".to_string()),
            case: Some(CaseArg::Lower),
            set_ext: Some("jpg".to_string()),
            ..RuleArgs::default()
        };
        let rules = rule_set(&args).unwrap();
        let kinds: Vec<_> = rules.iter().map(|r| r.kind.name()).collect();
        assert_eq!(
            kinds,
            vec!["replace", "add_prefix", "case_change", "change_extension"]
        );
        assert!(matches!(
            &rules.get(0).unwrap().kind,
            RuleKind::Replace { case_sensitive: true, .. }
        ));
    }

    #[test]
    fn test_scan_options_merge_config() {
        let mut config = Config::default();
        config.defaults.recursive = true;
        config.defaults.show_hidden = false;

        let args = ScanArgs {
            extensions: vec!["JPG".to_string()],
            no_folders: true,
            size: Some(SizeArg::Small),
            ..ScanArgs::default()
        };
        let options = scan_options(&args, &config);
        assert!(options.recursive);
        assert_eq!(options.extension_filter, vec![".jpg".to_string()]);
        assert!(!options.filter.include_folders);
        assert!(!options.filter.show_hidden);
        assert_eq!(options.filter.size, SizeFilter::Under1M);
    }
}
