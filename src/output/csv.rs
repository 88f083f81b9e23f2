use anyhow::Result;

use crate::compare::Comparison;
use crate::markdown::ParsedEntry;

pub fn comparison_to_csv(comparison: &Comparison) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    let mut header = vec![
        "section".to_string(),
        "setting".to_string(),
        "status".to_string(),
    ];
    header.extend(comparison.report_labels.iter().cloned());
    writer.write_record(&header)?;

    for section in &comparison.sections {
        for row in &section.rows {
            let mut record = vec![section.id.clone(), row.label.clone(), row.status.to_string()];
            record.extend(row.values.iter().cloned());
            writer.write_record(&record)?;
        }
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn entries_to_csv(entries: &[ParsedEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["key", "raw_key", "value"])?;
    for entry in entries {
        writer.write_record([&entry.key, &entry.raw_key, &entry.value])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::{comparison_to_csv, entries_to_csv};
    use crate::compare::{build_comparison, default_categories};
    use crate::markdown::parse_key_values;
    use crate::report::Report;

    #[test]
    fn writes_one_record_per_row() {
        let reports = vec![
            Report::new("a").with_field("game_resolution", "1280x800"),
            Report::new("b").with_field("game_resolution", "1280x800"),
        ];
        let csv = comparison_to_csv(&build_comparison(&reports, &default_categories()))
            .expect("csv");
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "section,setting,status,a,b");
        assert_eq!(lines[1], "game_display,Resolution,same,1280x800,1280x800");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn missing_values_stay_empty() {
        let reports = vec![
            Report::new("a").with_field("vsync", "On"),
            Report::new("b"),
        ];
        let csv = comparison_to_csv(&build_comparison(&reports, &default_categories()))
            .expect("csv");
        assert!(csv.contains("game_display,VSync,different,On,\n"));
    }

    #[test]
    fn writes_parsed_entries() {
        let entries = parse_key_values(Some("FSR: On"));
        let csv = entries_to_csv(&entries).expect("csv");
        assert_eq!(csv, "key,raw_key,value\nfsr,FSR,On\n");
    }
}
