//! CSV Export
//!
//! Builds the spreadsheet document downloaded from the dashboard. The
//! layout is a compatibility contract: UTF-8 with a BOM so spreadsheet
//! tools pick the encoding, an unquoted header row, and every data field
//! double-quoted.

use chrono::NaiveDate;

use crate::models::AnomalyRecord;

/// Byte-order mark expected by spreadsheet imports
const BOM: &str = "\u{feff}";

pub const CSV_HEADER: &str = "Type,Confidence%,Latitude,Longitude,Date,Description,Severity";

/// Render the given (already filtered) records as a CSV document.
/// Rows are joined with `\n` and there is no trailing newline.
pub fn to_csv(records: &[AnomalyRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for record in records {
        let fields = [
            record.anomaly_type.label().to_string(),
            format!("{}", (record.confidence * 100.0).round() as i64),
            format!("{:.6}", record.latitude),
            format!("{:.6}", record.longitude),
            record.detected_at.format("%Y-%m-%d").to_string(),
            record.description.clone(),
            record.severity.label().to_string(),
        ];
        let row: Vec<String> = fields.iter().map(|f| quote(f)).collect();
        lines.push(row.join(","));
    }

    format!("{}{}", BOM, lines.join("\n"))
}

/// Embedded quotes are doubled so a quoted field always round-trips
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Download name carrying the export date, e.g. `anomalies_2024-01-15.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("anomalies_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::severity_for;
    use crate::models::{AnomalyType, Region};

    fn record(anomaly_type: AnomalyType, confidence: f64, description: &str) -> AnomalyRecord {
        AnomalyRecord {
            id: "e".to_string(),
            anomaly_type,
            confidence,
            latitude: 55.755812,
            longitude: 37.617305,
            detected_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
                .and_utc(),
            description: description.to_string(),
            severity: severity_for(confidence),
            region: Some(Region::Russia),
            area: "10 ha".to_string(),
        }
    }

    #[test]
    fn document_has_bom_header_and_one_line_per_record() {
        let records = vec![
            record(AnomalyType::Fire, 0.9, "first"),
            record(AnomalyType::Flood, 0.65, "second"),
        ];
        let csv = to_csv(&records);

        assert!(csv.starts_with('\u{feff}'));
        let body = csv.trim_start_matches('\u{feff}');
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn empty_set_exports_header_only() {
        let csv = to_csv(&[]);
        assert_eq!(csv, format!("\u{feff}{}", CSV_HEADER));
    }

    #[test]
    fn row_fields_round_trip_through_the_quoting() {
        let records = vec![record(AnomalyType::Fire, 0.87, "wildfire near the river")];
        let csv = to_csv(&records);
        let body = csv.trim_start_matches('\u{feff}');
        let row = body.split('\n').nth(1).unwrap();

        assert!(row.starts_with('"') && row.ends_with('"'));
        let fields: Vec<&str> = row[1..row.len() - 1].split("\",\"").collect();
        assert_eq!(
            fields,
            vec![
                "Fire",
                "87",
                "55.755812",
                "37.617305",
                "2024-01-15",
                "wildfire near the river",
                "High",
            ]
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let records = vec![record(AnomalyType::Dump, 0.7, r#"dump at "Severny" site"#)];
        let csv = to_csv(&records);
        assert!(csv.contains(r#""dump at ""Severny"" site""#));
    }

    #[test]
    fn confidence_exports_as_rounded_percent() {
        let records = vec![record(AnomalyType::Construction, 0.666, "site")];
        let csv = to_csv(&records);
        assert!(csv.contains("\"67\""));
    }

    #[test]
    fn filename_carries_the_export_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(export_filename(date), "anomalies_2024-01-15.csv");
    }
}
