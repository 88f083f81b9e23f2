use crate::compare::RowStatus;

/// Classify a row's values (one per report).
///
/// A row is `Same` only when every report has a non-empty value and all of
/// them match the first one case-insensitively. Any missing value makes the
/// row `Different`.
pub fn compare_values<S: AsRef<str>>(values: &[S]) -> RowStatus {
    let present: Vec<&str> = values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .collect();

    if present.len() != values.len() {
        return RowStatus::Different;
    }
    let Some((first, rest)) = present.split_first() else {
        return RowStatus::Different;
    };

    let first = first.to_lowercase();
    if rest.iter().all(|v| v.to_lowercase() == first) {
        RowStatus::Same
    } else {
        RowStatus::Different
    }
}
