use anyhow::{anyhow, Result};
use batchren_core::{apply_operation, render_preview, OutputFormatter, Preview, RenameRequest};

use crate::cli::OutputFormat;
use crate::confirm::confirm_apply;
use crate::preview::{check_fixed_width, print_rendered};

pub fn handle_apply(
    request: &RenameRequest,
    preview: Preview,
    fixed_table_width: bool,
    use_color: bool,
    yes: bool,
    output: OutputFormat,
) -> Result<()> {
    check_fixed_width(fixed_table_width, preview)?;

    let result = apply_operation(request, |entries, summary| {
        if output == OutputFormat::Summary {
            print_rendered(&render_preview(
                entries,
                preview,
                Some(use_color),
                fixed_table_width,
            ));
        }
        confirm_apply(yes, summary)
    })?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    if result.error_count > 0 {
        return Err(anyhow!(
            "{} of {} entries could not be renamed",
            result.error_count,
            result.error_count + result.success_count
        ));
    }
    Ok(())
}
