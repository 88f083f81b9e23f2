use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::report::Report;

/// Accepted file shapes: a `{"reports": [...]}` envelope, a bare array, or a
/// single report object. The shape is decided before deserializing so a bad
/// record inside an envelope or array is an error rather than a fallback.
pub fn parse_reports(json: &str) -> Result<Vec<Report>> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Object(mut map) if map.contains_key("reports") => {
            let reports = map.remove("reports").unwrap_or(Value::Null);
            serde_json::from_value(reports).context("invalid `reports` envelope")
        }
        Value::Array(items) => {
            serde_json::from_value(Value::Array(items)).context("invalid report array")
        }
        Value::Object(map) => {
            let report: Report =
                serde_json::from_value(Value::Object(map)).context("invalid report")?;
            Ok(vec![report])
        }
        other => bail!("expected a report object or array, found {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load reports from every file in order. Reports without an id get a
/// positional `report-{n}` id (1-based across all files).
pub fn load_reports<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Report>> {
    let mut out = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading report file: {}", path.display()))?;
        let reports = parse_reports(&data)
            .with_context(|| format!("failed parsing report JSON: {}", path.display()))?;
        debug!("loaded {} report(s) from {}", reports.len(), path.display());
        out.extend(reports);
    }
    assign_positional_ids(&mut out);
    info!("loaded {} report(s) from {} file(s)", out.len(), paths.len());
    Ok(out)
}

pub fn assign_positional_ids(reports: &mut [Report]) {
    for (idx, report) in reports.iter_mut().enumerate() {
        if report.id.trim().is_empty() {
            report.id = format!("report-{}", idx + 1);
        }
    }
}
