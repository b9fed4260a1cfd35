use anyhow::{anyhow, Result};
use batchren_core::{preview_operation, OutputFormatter, Preview, RenameRequest};

use crate::cli::OutputFormat;

pub fn check_fixed_width(fixed_table_width: bool, preview: Preview) -> Result<()> {
    if fixed_table_width && preview != Preview::Table {
        return Err(anyhow!(
            "--fixed-table-width can only be used with --preview table"
        ));
    }
    Ok(())
}

/// Print a rendered preview, making sure it ends with a newline
pub fn print_rendered(rendered: &str) {
    if rendered.is_empty() {
        return;
    }
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
}

pub fn handle_preview(
    request: &RenameRequest,
    preview: Preview,
    fixed_table_width: bool,
    use_color: bool,
    output: OutputFormat,
) -> Result<()> {
    check_fixed_width(fixed_table_width, preview)?;

    let format = if output == OutputFormat::Json {
        Preview::None
    } else {
        preview
    };
    let (result, rendered) = preview_operation(request, format, Some(use_color), fixed_table_width)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if let Some(rendered) = rendered {
                print_rendered(&rendered);
            }
            if preview != Preview::Json {
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
