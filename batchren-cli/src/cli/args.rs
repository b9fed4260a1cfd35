use batchren_core::rules::MAX_PADDING;
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{AgeArg, CaseArg, OutputFormat, PresetArg, PreviewArg, SizeArg};

/// Rule-based batch renaming of files and folders
#[derive(Parser, Debug)]
#[command(name = "batchren")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "BATCHREN_YES")]
    pub yes: bool,
}

/// Which entries of the directory are collected
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Include all subdirectories
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Only files with these extensions (comma-separated, e.g. "jpg,png")
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Only files of a predefined type
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Leave directories out of the list
    #[arg(long)]
    pub no_folders: bool,

    /// Leave names starting with a dot out of the list
    #[arg(long)]
    pub no_hidden: bool,

    /// Only entries whose name contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub name: Option<String>,

    /// Only files in this size bucket
    #[arg(long, value_enum)]
    pub size: Option<SizeArg>,

    /// Only entries modified within this window
    #[arg(long, value_enum)]
    pub age: Option<AgeArg>,
}

/// Where the rename rules come from. Quick flags run after the rules file,
/// in the order replace, prefix, suffix, case, extension.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Load rules from a TOML or JSON file
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Replace text in names (FROM=TO, repeatable)
    #[arg(long, value_name = "FROM=TO")]
    pub replace: Vec<String>,

    /// Make --replace ignore case
    #[arg(long, requires = "replace")]
    pub ignore_case: bool,

    /// Add text before each name
    #[arg(long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Add text after each name, before the extension
    #[arg(long, value_name = "TEXT")]
    pub suffix: Option<String>,

    /// Change the case of each name
    #[arg(long = "case", value_enum)]
    pub case: Option<CaseArg>,

    /// Replace the extension of every file (empty removes it)
    #[arg(long = "set-ext", value_name = "EXT")]
    pub set_ext: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the names the rules would produce without renaming anything
    Preview {
        /// Directory to scan
        dir: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        rules: RuleArgs,

        /// Preview format (defaults to the config value, then table)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Use fixed column widths in table preview
        #[arg(long)]
        fixed_table_width: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Preview, confirm and rename
    Apply {
        /// Directory to scan
        dir: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        rules: RuleArgs,

        /// Preview format shown before confirming
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Use fixed column widths in table preview
        #[arg(long)]
        fixed_table_width: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Regenerate every name from a template with {n}, {ext}, {name} and {dir}
    Generate {
        /// Directory to scan
        dir: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Name template, e.g. "photo_{n}{ext}"
        #[arg(long, short = 't')]
        template: String,

        /// First counter value
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        start: i64,

        /// Counter increment per entry
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        step: i64,

        /// Counter width (defaults to the config value)
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_PADDING as u64))]
        padding: Option<usize>,

        /// Rename on disk after previewing
        #[arg(long)]
        apply: bool,

        /// Preview format
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Use fixed column widths in table preview
        #[arg(long)]
        fixed_table_width: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Validate a rules file
    Check {
        /// Rules file to validate
        #[arg(long, value_name = "FILE")]
        rules: PathBuf,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Interactive session with preview, apply and undo
    Session {
        /// Directory to load
        dir: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Rules file to start from
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },

    /// Print shell completions to stdout
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
