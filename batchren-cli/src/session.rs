//! Line-oriented interactive session around a [`Renamer`].

use anyhow::{anyhow, Context, Result};
use batchren_core::{
    conflicting_names, write_preview, ApplyResult, CaseMode, Config, DateSource, OutputFormatter, Preview, Renamer,
    Rule, RuleSet, UndoResult,
};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::confirm::confirm_with_input;
use crate::request::parse_replacement;

const HELP: &str = "\
Commands:
  preview [table|summary|json]   recompute and show proposed names
  summary                        show counts of the current preview
  rules                          list rules
  add <kind> <args...>           add a rule: prefix TEXT | suffix TEXT | replace FROM=TO [icase]
                                 | case upper|lower|title|sentence | ext EXT | index [START STEP PADDING]
                                 | delete START END | regex PATTERN REPLACEMENT | date [FORMAT] [modified]
  toggle N | remove N | move FROM TO
  clear                          remove all rules
  load FILE | save FILE          read or write rules as TOML or JSON
  generate TEMPLATE [START STEP PADDING]
  blank                          clear every name down to its extension
  apply                          rename on disk
  undo                           revert the last apply
  rescan | refresh               reload the directory or re-read metadata
  help | quit";

/// Settings the session needs besides the renamer itself
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub preview: Preview,
    pub use_color: bool,
    pub yes: bool,
    pub date_format: String,
    pub index_padding: usize,
}

impl SessionOptions {
    pub fn from_config(config: &Config, use_color: bool, yes: bool) -> Self {
        Self {
            preview: config
                .defaults
                .preview_format
                .parse()
                .unwrap_or(Preview::Table),
            use_color,
            yes,
            date_format: config.defaults.date_format.clone(),
            index_padding: config.defaults.index_padding,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Split a command line into words. Double quotes group words and may be
/// empty, so `add suffix ""` passes an empty argument.
pub fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            },
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            },
            c => {
                current.push(c);
                has_token = true;
            },
        }
    }
    if has_token {
        args.push(current);
    }
    args
}

fn parse_index(arg: Option<&String>, what: &str) -> Result<usize> {
    let raw = arg.ok_or_else(|| anyhow!("missing {}", what))?;
    let n: usize = raw
        .parse()
        .with_context(|| format!("invalid {} '{}'", what, raw))?;
    n.checked_sub(1)
        .ok_or_else(|| anyhow!("{} starts at 1", what))
}

fn parse_num<T: std::str::FromStr>(arg: Option<&String>, default: T, what: &str) -> Result<T> {
    match arg {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow!("invalid {} '{}'", what, raw)),
        None => Ok(default),
    }
}

/// Build a rule from `add` arguments
pub fn parse_rule(args: &[String], options: &SessionOptions) -> Result<Rule> {
    let kind = args.first().ok_or_else(|| anyhow!("missing rule kind"))?;
    let text = |i: usize| {
        args.get(i)
            .cloned()
            .ok_or_else(|| anyhow!("'{}' needs an argument", kind))
    };

    let rule = match kind.as_str() {
        "prefix" => Rule::add_prefix(&text(1)?),
        "suffix" => Rule::add_suffix(&text(1)?),
        "replace" => {
            let spec = text(1)?;
            let (from, to) = parse_replacement(&spec)?;
            let ignore_case = args.get(2).is_some_and(|a| a == "icase");
            Rule::replace(from, to, !ignore_case)
        },
        "case" => {
            let mode: CaseMode = text(1)?.parse().map_err(|e: String| anyhow!(e))?;
            Rule::case_change(mode)
        },
        "ext" => Rule::change_extension(&args.get(1).cloned().unwrap_or_default()),
        "index" => Rule::add_index(
            parse_num(args.get(1), 1, "start")?,
            parse_num(args.get(2), 1, "step")?,
            parse_num(args.get(3), options.index_padding, "padding")?,
            "",
        ),
        "delete" => Rule::delete_chars(
            parse_num(args.get(1), 0, "start")?,
            parse_num(args.get(2), 0, "end")?,
        ),
        "regex" => Rule::regex(&text(1)?, &args.get(2).cloned().unwrap_or_default()),
        "date" => {
            let format = args.get(1).cloned().unwrap_or_else(|| options.date_format.clone());
            let source = if args.get(2).is_some_and(|a| a == "modified") {
                DateSource::Modified
            } else {
                DateSource::Created
            };
            Rule::date_stamp(&format, source, "")
        },
        other => return Err(anyhow!("unknown rule kind '{}'", other)),
    };

    rule.kind
        .validate()
        .with_context(|| format!("invalid {} rule", kind))?;
    Ok(rule)
}

fn list_rules<W: Write>(rules: &RuleSet, out: &mut W) -> Result<()> {
    if rules.is_empty() {
        writeln!(out, "No rules")?;
    }
    for (i, rule) in rules.iter().enumerate() {
        let mark = if rule.enabled { "x" } else { " " };
        writeln!(out, "{:>3}. [{}] {}", i + 1, mark, rule.kind.describe())?;
    }
    Ok(())
}

fn write_counts<W: Write>(renamer: &Renamer, out: &mut W) -> Result<()> {
    let summary = renamer.summary();
    writeln!(
        out,
        "{} entries: {} to rename, {} conflicts, {} unchanged",
        summary.total, summary.will_rename, summary.conflicts, summary.unchanged
    )?;
    let names = conflicting_names(renamer.entries());
    if !names.is_empty() {
        writeln!(out, "Conflicting names: {}", names.join(", "))?;
    }
    Ok(())
}

/// Re-run the rules and report counts and rule warnings
fn repreview<W: Write>(renamer: &mut Renamer, out: &mut W) -> Result<()> {
    let report = renamer.preview()?;
    for warning in &report.warnings {
        writeln!(
            out,
            "Warning: rule {} ({}) skipped: {}",
            warning.index + 1,
            warning.kind,
            warning.message
        )?;
    }
    write_counts(renamer, out)
}

fn run_command<R: BufRead, W: Write>(
    renamer: &mut Renamer,
    args: &[String],
    options: &SessionOptions,
    input: &mut R,
    out: &mut W,
) -> Result<Flow> {
    let Some(command) = args.first() else {
        return Ok(Flow::Continue);
    };

    match command.as_str() {
        "quit" | "exit" | "q" => return Ok(Flow::Quit),
        "help" | "?" => writeln!(out, "{}", HELP)?,
        "preview" => {
            let format = match args.get(1) {
                Some(f) => f.parse().map_err(|e: String| anyhow!(e))?,
                None => options.preview,
            };
            let report = renamer.preview()?;
            write_preview(out, renamer.entries(), format, Some(options.use_color), false)?;
            for warning in &report.warnings {
                writeln!(
                    out,
                    "Warning: rule {} ({}) skipped: {}",
                    warning.index + 1,
                    warning.kind,
                    warning.message
                )?;
            }
        },
        "summary" => write_counts(renamer, out)?,
        "rules" => list_rules(renamer.rules(), out)?,
        "add" => {
            let rule = parse_rule(&args[1..], options)?;
            renamer.rules_mut().push(rule);
            repreview(renamer, out)?;
        },
        "toggle" => {
            let index = parse_index(args.get(1), "rule number")?;
            let enabled = renamer
                .rules_mut()
                .toggle(index)
                .ok_or_else(|| anyhow!("no rule {}", index + 1))?;
            writeln!(
                out,
                "Rule {} {}",
                index + 1,
                if enabled { "enabled" } else { "disabled" }
            )?;
            repreview(renamer, out)?;
        },
        "remove" => {
            let index = parse_index(args.get(1), "rule number")?;
            renamer
                .rules_mut()
                .remove(index)
                .ok_or_else(|| anyhow!("no rule {}", index + 1))?;
            repreview(renamer, out)?;
        },
        "move" => {
            let from = parse_index(args.get(1), "rule number")?;
            let to = parse_index(args.get(2), "target position")?;
            if !renamer.rules_mut().move_rule(from, to) {
                return Err(anyhow!("cannot move rule {} to {}", from + 1, to + 1));
            }
            repreview(renamer, out)?;
        },
        "clear" => {
            renamer.rules_mut().clear();
            repreview(renamer, out)?;
        },
        "load" => {
            let path = args.get(1).ok_or_else(|| anyhow!("missing file"))?;
            let rules = RuleSet::load(Path::new(path))?;
            writeln!(out, "Loaded {} rules", rules.len())?;
            renamer.set_rules(rules);
            repreview(renamer, out)?;
        },
        "save" => {
            let path = args.get(1).ok_or_else(|| anyhow!("missing file"))?;
            renamer.rules().save(Path::new(path))?;
            writeln!(out, "Saved {} rules to {}", renamer.rules().len(), path)?;
        },
        "generate" => {
            let template = args.get(1).ok_or_else(|| anyhow!("missing template"))?;
            renamer.generate(
                template,
                parse_num(args.get(2), 1, "start")?,
                parse_num(args.get(3), 1, "step")?,
                parse_num(args.get(4), options.index_padding, "padding")?,
            )?;
            write_counts(renamer, out)?;
        },
        "blank" => {
            renamer.clear_names()?;
            write_counts(renamer, out)?;
        },
        "apply" => {
            let summary = renamer.summary();
            if summary.will_rename == 0 && summary.conflicts == 0 {
                writeln!(out, "No entries need renaming")?;
                return Ok(Flow::Continue);
            }
            if !options.yes && !confirm_with_input(input, out, &summary)? {
                writeln!(out, "Cancelled, nothing was renamed")?;
                return Ok(Flow::Continue);
            }
            let directory = renamer
                .root()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            let report = renamer.execute()?;
            write!(out, "{}", ApplyResult::from_report(directory, report).format_summary())?;
        },
        "undo" => {
            let result = UndoResult::from(renamer.undo_last()?);
            write!(out, "{}", result.format_summary())?;
        },
        "rescan" => {
            let count = renamer.rescan()?;
            writeln!(out, "Loaded {} entries", count)?;
            repreview(renamer, out)?;
        },
        "refresh" => {
            renamer.refresh()?;
            write_counts(renamer, out)?;
        },
        other => return Err(anyhow!("unknown command '{}', try 'help'", other)),
    }

    Ok(Flow::Continue)
}

/// Read commands from `input` until `quit` or end of input. Command errors
/// are printed and the session continues.
pub fn run_session<R: BufRead, W: Write>(
    renamer: &mut Renamer,
    options: &SessionOptions,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    write_counts(renamer, out)?;
    loop {
        write!(out, "batchren> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let args = split_args(&line);
        match run_command(renamer, &args, options, input, out) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {},
            Err(e) => {
                tracing::debug!("Session command failed: {e:#}");
                writeln!(out, "Error: {e:#}")?;
            },
        }
    }
    Ok(())
}
