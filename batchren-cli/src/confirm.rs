use anyhow::{anyhow, Result};
use batchren_core::PreviewSummary;
use std::io::{self, BufRead, IsTerminal, Write};

/// Ask whether to go ahead with a rename.
///
/// `--yes` skips the question. Without it the question needs an interactive
/// stdin; piped input is refused rather than read as an answer.
pub fn confirm_apply(yes: bool, summary: &PreviewSummary) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Refusing to rename without confirmation when stdin is not a terminal, pass --yes"
        ));
    }
    confirm_with_input(&mut io::stdin().lock(), &mut io::stderr(), summary)
}

pub fn confirm_with_input<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    summary: &PreviewSummary,
) -> Result<bool> {
    if summary.conflicts > 0 {
        writeln!(
            writer,
            "{} conflicting entries will be skipped.",
            summary.conflicts
        )?;
    }
    write!(writer, "Rename {} entries? [y/N]: ", summary.will_rename)?;
    writer.flush()?;

    let mut response = String::new();
    reader.read_line(&mut response)?;
    let answer = response.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PreviewSummary {
        PreviewSummary {
            total: 3,
            will_rename: 2,
            conflicts: 1,
            unchanged: 0,
        }
    }

    #[test]
    fn test_confirm_answers() {
        for (input, expected) in [("y\n", true), ("YES\n", true), ("\n", false), ("n\n", false)] {
            let mut out = Vec::new();
            let answer = confirm_with_input(&mut input.as_bytes(), &mut out, &summary()).unwrap();
            assert_eq!(answer, expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_confirm_prompt_mentions_conflicts() {
        let mut out = Vec::new();
        confirm_with_input(&mut "n\n".as_bytes(), &mut out, &summary()).unwrap();
        let prompt = String::from_utf8(out).unwrap();
        assert!(prompt.contains("1 conflicting entries will be skipped"));
        assert!(prompt.contains("Rename 2 entries? [y/N]"));
    }

    #[test]
    fn test_yes_skips_prompt() {
        assert!(confirm_apply(true, &summary()).unwrap());
    }
}
