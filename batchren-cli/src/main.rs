use anyhow::{Context, Result};
use batchren_core::{Config, GenerateRequest, Preview, Renamer, RuleSet};
use clap::{CommandFactory, Parser};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

mod apply;
mod check;
mod cli;
mod confirm;
mod generate;
mod preview;
mod request;
mod session;

use cli::args::{RuleArgs, ScanArgs};
use cli::{Cli, Commands, PreviewArg};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    let config = load_config();
    let use_color = !cli.no_color
        && config
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal());

    let result = run(cli, &config, use_color);

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");

            let message = format!("{e:#}").to_lowercase();
            let exit_code = if message.contains("conflict") {
                1 // Conflicts
            } else if message.contains("invalid") || message.contains("not found") {
                2 // Invalid input
            } else {
                3 // Internal error
            };

            process::exit(exit_code);
        },
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Project config in the working directory first, then the user config
fn config_candidates(cwd: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![Config::project_path(cwd)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("batchren").join("config.toml"));
    }
    candidates
}

fn load_config() -> Config {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Config::load_first(config_candidates(&cwd)).unwrap_or_else(|e| {
        tracing::warn!("Ignoring config: {e:#}");
        Config::default()
    })
}

fn resolve_preview(arg: Option<PreviewArg>, config: &Config) -> Preview {
    arg.map(Preview::from).unwrap_or_else(|| {
        config
            .defaults
            .preview_format
            .parse()
            .unwrap_or(Preview::Table)
    })
}

fn build(dir: &Path, scan: &ScanArgs, rules: &RuleArgs, config: &Config) -> Result<batchren_core::RenameRequest> {
    let rules = request::rule_set(rules)?;
    Ok(request::build_request(dir, scan, rules, config))
}

fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    match cli.command {
        Commands::Preview {
            dir,
            scan,
            rules,
            preview,
            fixed_table_width,
            output,
        } => {
            let request = build(&dir, &scan, &rules, config)?;
            preview::handle_preview(
                &request,
                resolve_preview(preview, config),
                fixed_table_width,
                use_color,
                output,
            )
        },
        Commands::Apply {
            dir,
            scan,
            rules,
            preview,
            fixed_table_width,
            output,
        } => {
            let request = build(&dir, &scan, &rules, config)?;
            apply::handle_apply(
                &request,
                resolve_preview(preview, config),
                fixed_table_width,
                use_color,
                cli.yes,
                output,
            )
        },
        Commands::Generate {
            dir,
            scan,
            template,
            start,
            step,
            padding,
            apply,
            preview,
            fixed_table_width,
            output,
        } => {
            let request = request::build_request(&dir, &scan, RuleSet::new(), config);
            let generate = GenerateRequest {
                template,
                start,
                step,
                padding: padding.unwrap_or(config.defaults.index_padding),
                apply,
            };
            generate::handle_generate(
                &request,
                &generate,
                resolve_preview(preview, config),
                fixed_table_width,
                use_color,
                cli.yes,
                output,
            )
        },
        Commands::Check { rules, output } => check::handle_check(&rules, output),
        Commands::Session { dir, scan, rules } => {
            let rules = match rules {
                Some(path) => RuleSet::load(&path)
                    .with_context(|| format!("Failed to load rules from {}", path.display()))?,
                None => RuleSet::new(),
            };
            let mut renamer = Renamer::with_rules(rules);
            renamer
                .load_directory(&dir, request::scan_options(&scan, config))
                .with_context(|| format!("Failed to scan {}", dir.display()))?;
            renamer.preview()?;

            let options = session::SessionOptions::from_config(config, use_color, cli.yes);
            session::run_session(
                &mut renamer,
                &options,
                &mut io::stdin().lock(),
                &mut io::stdout(),
            )
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "batchren", &mut io::stdout());
            Ok(())
        },
    }
}
