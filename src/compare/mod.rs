pub mod comparator;
pub mod fields;
pub mod rows;
pub mod sections;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use comparator::compare_values;
pub use fields::{
    FieldDescriptor, DEVICE_FIELDS, GAME_DISPLAY_FIELDS, PERFORMANCE_FIELDS, STEAMOS_FIELDS,
};
pub use rows::{build_fixed_rows, build_freeform_rows};
pub use sections::{
    assemble_sections, build_comparison, default_categories, only_different, select_categories,
    Category, CategoryParseError, CategorySource, Comparison, ComparisonSummary, ReportColumn,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Same,
    Different,
}

impl RowStatus {
    pub fn is_same(self) -> bool {
        matches!(self, Self::Same)
    }
}

impl Display for RowStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Same => write!(f, "same"),
            Self::Different => write!(f, "different"),
        }
    }
}

/// One setting lined up across every compared report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonRow {
    pub id: String,
    pub label: String,
    /// One entry per report, in report order. Missing values are `""`.
    pub values: Vec<String>,
    pub status: RowStatus,
}

impl ComparisonRow {
    pub fn new(id: impl Into<String>, label: impl Into<String>, values: Vec<String>) -> Self {
        let status = compare_values(values.as_slice());
        Self {
            id: id.into(),
            label: label.into(),
            values,
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub rows: Vec<ComparisonRow>,
}

impl Section {
    pub fn different_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.status == RowStatus::Different)
            .count()
    }

    pub fn same_count(&self) -> usize {
        self.rows.len().saturating_sub(self.different_count())
    }
}
