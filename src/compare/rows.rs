use std::collections::BTreeMap;

use crate::compare::fields::FieldDescriptor;
use crate::compare::ComparisonRow;
use crate::markdown::{parse_key_values, ParsedEntry};
use crate::report::sanitize::{is_blank, sanitize_text};
use crate::report::Report;

/// One row per descriptor, in declaration order, skipping descriptors with
/// no value in any report.
pub fn build_fixed_rows(reports: &[Report], descriptors: &[FieldDescriptor]) -> Vec<ComparisonRow> {
    descriptors
        .iter()
        .filter_map(|descriptor| {
            let values: Vec<String> = reports
                .iter()
                .map(|report| sanitize_text(Some((descriptor.extract)(&report.data).as_str())))
                .collect();
            if values.iter().all(|v| is_blank(v)) {
                return None;
            }
            Some(ComparisonRow::new(descriptor.id, descriptor.label, values))
        })
        .collect()
}

/// Rows for a freeform markdown field, keyed by normalized key.
///
/// Keys appear in first-seen order: every key of the first report, then keys
/// only the second report has, and so on. The label comes from the first
/// report that uses the key.
pub fn build_freeform_rows(reports: &[Report], field_name: &str) -> Vec<ComparisonRow> {
    let parsed: Vec<Vec<ParsedEntry>> = reports
        .iter()
        .map(|report| {
            let text = report.field(field_name);
            parse_key_values(Some(text.as_str()))
        })
        .collect();

    let mut order: Vec<(String, String)> = Vec::new();
    let mut lookups: Vec<BTreeMap<&str, &str>> = Vec::with_capacity(parsed.len());
    for entries in &parsed {
        let mut lookup = BTreeMap::new();
        for entry in entries {
            if !order.iter().any(|(key, _)| key == &entry.key) {
                order.push((entry.key.clone(), entry.raw_key.clone()));
            }
            lookup.insert(entry.key.as_str(), entry.value.as_str());
        }
        lookups.push(lookup);
    }

    order
        .into_iter()
        .filter_map(|(key, label)| {
            let values: Vec<String> = lookups
                .iter()
                .map(|lookup| sanitize_text(lookup.get(key.as_str()).copied()))
                .collect();
            if values.iter().all(|v| is_blank(v)) {
                return None;
            }
            Some(ComparisonRow::new(key, label, values))
        })
        .collect()
}
