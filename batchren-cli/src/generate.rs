use anyhow::{anyhow, Result};
use batchren_core::{
    generate_operation, render_preview, GenerateRequest, OutputFormatter, Preview, RenameRequest,
};

use crate::cli::OutputFormat;
use crate::confirm::confirm_apply;
use crate::preview::{check_fixed_width, print_rendered};

#[allow(clippy::too_many_arguments)]
pub fn handle_generate(
    request: &RenameRequest,
    generate: &GenerateRequest,
    preview: Preview,
    fixed_table_width: bool,
    use_color: bool,
    yes: bool,
    output: OutputFormat,
) -> Result<()> {
    check_fixed_width(fixed_table_width, preview)?;
    let show_preview = output == OutputFormat::Summary;

    let result = generate_operation(request, generate, |entries, summary| {
        if show_preview {
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
        OutputFormat::Summary => {
            if !generate.apply {
                print_rendered(&render_preview(
                    &result.entries,
                    preview,
                    Some(use_color),
                    fixed_table_width,
                ));
            }
            print!("{}", result.format_summary());
        },
    }

    match &result.applied {
        Some(applied) if applied.error_count > 0 => Err(anyhow!(
            "{} entries could not be renamed",
            applied.error_count
        )),
        _ => Ok(()),
    }
}
