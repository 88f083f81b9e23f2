use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::compare::{Category, CategorySource, Comparison, ReportColumn, RowStatus, Section};

pub const EMPTY_STATE: &str = "No comparable settings found.";

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub placeholder: String,
    pub color: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            placeholder: "—".to_string(),
            color: true,
        }
    }
}

pub fn render_comparison_table(comparison: &Comparison, options: &TableOptions) -> String {
    if comparison.is_empty() {
        return EMPTY_STATE.to_string();
    }

    let mut out = String::new();
    for section in &comparison.sections {
        out.push_str(&format!(
            "{} ({} same, {} different)\n",
            section.title,
            section.same_count(),
            section.different_count()
        ));
        out.push_str(&render_section_table(section, &comparison.reports, options));
        out.push_str("\n\n");
    }
    let summary = &comparison.summary;
    out.push_str(&format!(
        "Reports: {}  Settings: {}  Same: {}  Different: {}",
        summary.reports, summary.rows, summary.same, summary.different
    ));
    out
}

pub fn render_section_table(
    section: &Section,
    columns: &[ReportColumn],
    options: &TableOptions,
) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Setting".to_string(), "Status".to_string()];
    header.extend(columns.iter().map(ReportColumn::heading));
    table.set_header(header);

    for row in &section.rows {
        let color = match row.status {
            RowStatus::Same => Color::Green,
            RowStatus::Different => Color::Yellow,
        };
        let marker = Cell::new(status_marker(row.status));
        let mut cells = vec![
            Cell::new(&row.label),
            if options.color { marker.fg(color) } else { marker },
        ];
        for value in &row.values {
            let cell = if value.trim().is_empty() {
                Cell::new(&options.placeholder).fg(Color::DarkGrey)
            } else {
                Cell::new(value)
            };
            cells.push(if options.color && !value.trim().is_empty() {
                cell.fg(color)
            } else {
                cell
            });
        }
        table.add_row(Row::from(cells));
    }
    if !options.color {
        table.force_no_tty();
    }
    table.to_string()
}

/// Status text shown in its own column, so rows stay distinguishable
/// without color.
pub fn status_marker(status: RowStatus) -> &'static str {
    match status {
        RowStatus::Same => "= same",
        RowStatus::Different => "≠ different",
    }
}

pub fn render_categories_table(categories: &[Category]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Section", "Title", "Kind", "Fields"]);
    for category in categories {
        let (kind, fields) = match &category.source {
            CategorySource::Fixed(fields) => (
                "fixed",
                fields
                    .iter()
                    .map(|f| f.label)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            CategorySource::Freeform { field } => ("freeform", format!("markdown in `{field}`")),
        };
        table.add_row(vec![
            category.id.clone(),
            category.title.clone(),
            kind.to_string(),
            fields,
        ]);
    }
    table.to_string()
}
