use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compare::fields::{
    FieldDescriptor, DEVICE_FIELDS, GAME_DISPLAY_FIELDS, PERFORMANCE_FIELDS, STEAMOS_FIELDS,
};
use crate::compare::rows::{build_fixed_rows, build_freeform_rows};
use crate::compare::{ComparisonRow, Section};
use crate::report::Report;

#[derive(Debug, Clone)]
pub enum CategorySource {
    Fixed(&'static [FieldDescriptor]),
    /// Markdown text stored under this data key.
    Freeform { field: String },
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub source: CategorySource,
}

impl Category {
    pub fn fixed(id: &str, title: &str, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            source: CategorySource::Fixed(fields),
        }
    }

    pub fn freeform(id: &str, title: &str, field: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            source: CategorySource::Freeform {
                field: field.to_string(),
            },
        }
    }

    pub fn rows(&self, reports: &[Report]) -> Vec<ComparisonRow> {
        match &self.source {
            CategorySource::Fixed(fields) => build_fixed_rows(reports, fields),
            CategorySource::Freeform { field } => build_freeform_rows(reports, field),
        }
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::fixed("device", "Device & Software", DEVICE_FIELDS),
        Category::fixed("steamos", "SteamOS Settings", STEAMOS_FIELDS),
        Category::fixed("game_display", "Game Display Settings", GAME_DISPLAY_FIELDS),
        Category::freeform("game_settings", "Game Settings", "game_settings"),
        Category::freeform("additional_settings", "Additional Settings", "additional_settings"),
        Category::fixed("performance", "Performance", PERFORMANCE_FIELDS),
    ]
}

#[derive(Debug, Error)]
#[error("unknown section id: {0}")]
pub struct CategoryParseError(pub String);

/// Keep only the categories named in `ids`, in their original order.
pub fn select_categories(
    categories: Vec<Category>,
    ids: &[String],
) -> Result<Vec<Category>, CategoryParseError> {
    let wanted: Vec<String> = ids.iter().map(|id| id.trim().to_ascii_lowercase()).collect();
    for id in &wanted {
        if !categories.iter().any(|c| c.id.eq_ignore_ascii_case(id)) {
            return Err(CategoryParseError(id.clone()));
        }
    }
    Ok(categories
        .into_iter()
        .filter(|c| wanted.iter().any(|id| c.id.eq_ignore_ascii_case(id)))
        .collect())
}

pub fn assemble_sections(reports: &[Report], categories: &[Category]) -> Vec<Section> {
    categories
        .iter()
        .filter_map(|category| {
            let rows = category.rows(reports);
            if rows.is_empty() {
                return None;
            }
            Some(Section {
                id: category.id.clone(),
                title: category.title.clone(),
                rows,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonSummary {
    pub reports: usize,
    pub sections: usize,
    pub rows: usize,
    pub same: usize,
    pub different: usize,
}

impl ComparisonSummary {
    pub fn from_sections(reports: usize, sections: &[Section]) -> Self {
        let different: usize = sections.iter().map(Section::different_count).sum();
        let rows: usize = sections.iter().map(|s| s.rows.len()).sum();
        Self {
            reports,
            sections: sections.len(),
            rows,
            same: rows - different,
            different,
        }
    }
}

/// Column metadata for one compared report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportColumn {
    pub id: String,
    pub label: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ReportColumn {
    pub fn from_report(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            label: report.label(),
            created_at: report.created_at,
        }
    }

    /// Label with the submission date underneath when known.
    pub fn heading(&self) -> String {
        match self.created_at {
            Some(at) => format!("{}\n{}", self.label, at.format("%Y-%m-%d")),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comparison {
    pub report_labels: Vec<String>,
    pub reports: Vec<ReportColumn>,
    pub sections: Vec<Section>,
    pub summary: ComparisonSummary,
}

impl Comparison {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

pub fn build_comparison(reports: &[Report], categories: &[Category]) -> Comparison {
    let sections = assemble_sections(reports, categories);
    Comparison {
        report_labels: reports.iter().map(Report::label).collect(),
        reports: reports.iter().map(ReportColumn::from_report).collect(),
        summary: ComparisonSummary::from_sections(reports.len(), &sections),
        sections,
    }
}

/// Drop agreeing rows, then any section left without rows.
pub fn only_different(comparison: Comparison) -> Comparison {
    let sections: Vec<Section> = comparison
        .sections
        .into_iter()
        .filter_map(|mut section| {
            section.rows.retain(|row| !row.status.is_same());
            (!section.rows.is_empty()).then_some(section)
        })
        .collect();
    Comparison {
        summary: ComparisonSummary::from_sections(comparison.summary.reports, &sections),
        report_labels: comparison.report_labels,
        reports: comparison.reports,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        assemble_sections, build_comparison, default_categories, only_different,
        select_categories, Category,
    };
    use chrono::{DateTime, Utc};

    use crate::compare::RowStatus;
    use crate::report::Report;

    fn sample_reports() -> Vec<Report> {
        vec![
            Report::new("a")
                .with_user("alice")
                .with_field("game_resolution", "1280x800")
                .with_field("vsync", "On")
                .with_field("game_settings", "FSR: On\nSharpness: 80"),
            Report::new("b")
                .with_device("Steam Deck LCD")
                .with_field("game_resolution", "1280x800")
                .with_field("vsync", "Off")
                .with_field("game_settings", "fsr: On"),
        ]
    }

    #[test]
    fn empty_sections_are_discarded() {
        let sections = assemble_sections(&sample_reports(), &default_categories());
        let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["game_display", "game_settings"]);
        assert!(sections.iter().all(|s| !s.rows.is_empty()));
    }

    #[test]
    fn no_reports_means_no_sections() {
        let comparison = build_comparison(&[], &default_categories());
        assert!(comparison.is_empty());
        assert_eq!(comparison.summary.rows, 0);
        assert!(comparison.report_labels.is_empty());
        assert!(comparison.reports.is_empty());
    }

    #[test]
    fn summary_counts_statuses() {
        let comparison = build_comparison(&sample_reports(), &default_categories());
        assert_eq!(comparison.summary.reports, 2);
        assert_eq!(comparison.summary.sections, 2);
        assert_eq!(comparison.summary.rows, 4);
        assert_eq!(comparison.summary.same, 2);
        assert_eq!(comparison.summary.different, 2);
        assert_eq!(comparison.report_labels, vec!["alice", "b (Steam Deck LCD)"]);
    }

    #[test]
    fn report_columns_carry_submission_dates() {
        let mut dated = Report::new("a").with_user("alice");
        dated.created_at = Some(
            "2024-03-05T18:30:00Z"
                .parse::<DateTime<Utc>>()
                .expect("timestamp"),
        );
        let reports = vec![dated, Report::new("b")];
        let comparison = build_comparison(&reports, &default_categories());
        assert_eq!(comparison.reports.len(), 2);
        assert_eq!(comparison.reports[0].heading(), "alice\n2024-03-05");
        assert_eq!(comparison.reports[1].heading(), "b");
        assert!(comparison.reports[1].created_at.is_none());

        let json = serde_json::to_value(&comparison).expect("serialize");
        assert_eq!(json["reports"][0]["created_at"], "2024-03-05T18:30:00Z");
    }

    #[test]
    fn only_different_drops_agreeing_rows_and_sections() {
        let reports = vec![
            Report::new("a")
                .with_field("game_resolution", "1280x800")
                .with_field("game_settings", "FSR: On"),
            Report::new("b")
                .with_field("game_resolution", "800x500")
                .with_field("game_settings", "FSR: on"),
        ];
        let filtered = only_different(build_comparison(&reports, &default_categories()));
        assert_eq!(filtered.sections.len(), 1);
        assert_eq!(filtered.sections[0].id, "game_display");
        assert!(filtered.sections[0]
            .rows
            .iter()
            .all(|r| r.status == RowStatus::Different));
        assert_eq!(filtered.summary.same, 0);
        assert_eq!(filtered.summary.different, 1);
    }

    #[test]
    fn select_keeps_declaration_order() {
        let ids = vec!["performance".to_string(), " STEAMOS ".to_string()];
        let selected = select_categories(default_categories(), &ids).expect("known ids");
        let got: Vec<_> = selected.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(got, vec!["steamos", "performance"]);
    }

    #[test]
    fn select_rejects_unknown_ids() {
        let err = select_categories(default_categories(), &["graphics".to_string()])
            .expect_err("unknown id");
        assert_eq!(err.to_string(), "unknown section id: graphics");
    }

    #[test]
    fn custom_freeform_category() {
        let reports = vec![
            Report::new("a").with_field("proton_notes", "DXVK_ASYNC = 1"),
            Report::new("b").with_field("proton_notes", "dxvk_async=1"),
        ];
        let categories = vec![Category::freeform("proton", "Proton Notes", "proton_notes")];
        let sections = assemble_sections(&reports, &categories);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].rows[0].label, "DXVK_ASYNC");
        assert_eq!(sections[0].rows[0].status, RowStatus::Same);
    }
}
