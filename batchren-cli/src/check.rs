use anyhow::{anyhow, Result};
use batchren_core::{check_operation, OutputFormatter};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn handle_check(path: &Path, output: OutputFormat) -> Result<()> {
    let result = check_operation(path)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    if result.is_valid() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} invalid rules in {}",
            result.problems.len(),
            path.display()
        ))
    }
}
