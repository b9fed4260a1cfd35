use super::RenameRequest;
use crate::entry::FileEntry;
use crate::output::ApplyResult;
use crate::preview::PreviewSummary;
use crate::session::Renamer;
use anyhow::{Context, Result};

/// Apply operation - scan, preview, confirm, rename.
///
/// `confirm` sees the previewed entries and decides whether to go ahead. It
/// is not called when nothing would be renamed.
pub fn apply_operation<F>(request: &RenameRequest, confirm: F) -> Result<ApplyResult>
where
    F: FnOnce(&[FileEntry], &PreviewSummary) -> Result<bool>,
{
    request
        .rules
        .ensure_valid()
        .context("Refusing to apply an invalid rule list")?;

    let mut renamer = request.open()?;
    renamer.preview()?;
    commit(&mut renamer, request.display_dir(), confirm)
}

/// Execute the proposed names of an already previewed session
pub(crate) fn commit<F>(renamer: &mut Renamer, directory: String, confirm: F) -> Result<ApplyResult>
where
    F: FnOnce(&[FileEntry], &PreviewSummary) -> Result<bool>,
{
    let summary = renamer.summary();
    if summary.will_rename == 0 && summary.conflicts == 0 {
        return Ok(ApplyResult::nothing(directory, "No entries need renaming"));
    }
    if !confirm(renamer.entries(), &summary)? {
        return Ok(ApplyResult::nothing(directory, "Cancelled, nothing was renamed"));
    }

    let report = renamer.execute()?;
    Ok(ApplyResult::from_report(directory, report))
}
