use crate::entry::{EntryStatus, FileEntry};
use crate::preview::summary::PreviewSummary;
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

fn fixed_constraints() -> Vec<ColumnConstraint> {
    vec![
        ColumnConstraint::Absolute(Width::Fixed(40)), // Original
        ColumnConstraint::Absolute(Width::Fixed(40)), // New
        ColumnConstraint::Absolute(Width::Fixed(10)), // Size
        ColumnConstraint::Absolute(Width::Fixed(18)), // Modified
        ColumnConstraint::Absolute(Width::Fixed(10)), // Status
    ]
}

/// Human readable size, like the file manager's size column
pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if size < 1024 {
        return format!("{} B", size);
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = size as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

fn status_color(status: EntryStatus) -> Color {
    match status {
        EntryStatus::Ready => Color::Green,
        EntryStatus::Renamed => Color::Blue,
        EntryStatus::Error => Color::Red,
        EntryStatus::Skipped => Color::DarkGrey,
        EntryStatus::Conflict => Color::Yellow,
    }
}

/// Render entries as an Original / New / Size / Modified / Status table
pub fn render_table(entries: &[FileEntry], use_color: bool, fixed_table_width: bool) -> String {
    let mut table = Table::new();

    if fixed_table_width || !io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(fixed_constraints());
    } else {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    }

    if use_color {
        table.enforce_styling();
        table.set_header(
            ["Original", "New", "Size", "Modified", "Status"]
                .into_iter()
                .map(|h| Cell::new(h).fg(Color::Cyan)),
        );
    } else {
        table.set_header(vec!["Original", "New", "Size", "Modified", "Status"]);
    }

    for entry in entries {
        let original = if entry.is_dir {
            format!("{}/", entry.original_name)
        } else {
            entry.original_name.clone()
        };
        let new_name = if entry.is_changed() {
            format!("→ {}", entry.proposed_name)
        } else {
            String::new()
        };
        let size = if entry.is_dir {
            "-".to_string()
        } else {
            format_size(entry.size)
        };
        let modified = entry.modified.format("%Y-%m-%d %H:%M").to_string();

        if use_color {
            table.add_row(vec![
                Cell::new(original),
                Cell::new(new_name).fg(Color::Magenta),
                Cell::new(size),
                Cell::new(modified),
                Cell::new(entry.status.as_str()).fg(status_color(entry.status)),
            ]);
        } else {
            table.add_row(vec![
                original,
                new_name,
                size,
                modified,
                entry.status.as_str().to_string(),
            ]);
        }
    }

    let summary = PreviewSummary::from_entries(entries);
    let totals = vec![
        "TOTALS".to_string(),
        format!("{} to rename", summary.will_rename),
        format!("{} entries", summary.total),
        format!("{} unchanged", summary.unchanged),
        format!("{} conflicts", summary.conflicts),
    ];
    if use_color {
        table.add_row(vec![Cell::new("─────────").fg(Color::DarkGrey); 5]);
        table.add_row(totals.into_iter().map(|t| Cell::new(t).fg(Color::Cyan)));
    } else {
        table.add_row(vec!["─────────"; 5]);
        table.add_row(totals);
    }

    table.to_string()
}
