#![allow(unused)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod catalog;
pub mod config;
pub mod conflict;
pub mod entry;
pub mod error;
pub mod execute;
pub mod filter;
pub mod history;
pub mod operations;
pub mod output;
pub mod pipeline;
pub mod preview;
pub mod rules;
pub mod session;
pub mod template;
pub mod transform;

pub use catalog::{scan, Catalog, ScanOptions};
pub use config::Config;
pub use conflict::{conflicting_names, mark_conflicts};
pub use entry::{split_name, EntryStatus, FileEntry};
pub use error::{Error, Result};
pub use execute::{execute, undo_last, ExecuteReport, UndoReport};
pub use filter::{AgeFilter, EntryFilter, ExtensionPreset, SizeFilter};
pub use history::{Batch, RenameOperation, UndoLog};
pub use operations::{
    apply_operation, check_operation, generate_operation, preview_operation, GenerateRequest,
    RenameRequest,
};
pub use output::{
    ApplyResult, CheckResult, GenerateResult, OutputFormat, OutputFormatter, PreviewResult,
    UndoResult,
};
pub use pipeline::{PreviewReport, RuleWarning};
pub use preview::{render_preview, write_preview, Preview, PreviewSummary};
pub use rules::{CaseMode, DateSource, Rule, RuleError, RuleKind, RuleSet};
pub use session::Renamer;
pub use template::{clear_names, generate, Template, TemplateError};
