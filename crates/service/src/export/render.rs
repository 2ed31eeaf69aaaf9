use chrono::{DateTime, Local, SecondsFormat};
use models::animal;

use super::ExportFormat;
use crate::errors::ServiceError;

const SEPARATOR_WIDTH: usize = 50;
pub const CSV_HEADER: &str = "ID,Name,Species,Age,CreatedAt";

pub fn render(format: ExportFormat, animals: &[animal::Model], generated_at: DateTime<Local>) -> Result<Vec<u8>, ServiceError> {
    match format {
        ExportFormat::Json => render_json(animals),
        ExportFormat::Csv => Ok(render_csv(animals).into_bytes()),
        ExportFormat::Txt => Ok(render_txt(animals, generated_at).into_bytes()),
    }
}

/// Pretty-printed JSON array carrying every column.
pub fn render_json(animals: &[animal::Model]) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec_pretty(animals).map_err(|e| ServiceError::Io(e.to_string()))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn render_csv(animals: &[animal::Model]) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for a in animals {
        let created = a
            .created_at
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "null".to_string());
        csv.push_str(&format!("{},{},{},{},{}\n", a.id, quote(&a.name), quote(&a.species), a.age, created));
    }
    csv
}

/// Human-readable report; entry lines look like `1. Leo (Lion) - 5 лет`.
pub fn render_txt(animals: &[animal::Model], generated_at: DateTime<Local>) -> String {
    let sep = "=".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();
    out.push_str("СПИСОК ЖИВОТНЫХ В ЗООПАРКЕ\n");
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!("Всего животных: {}\n", animals.len()));
    out.push_str(&sep);
    out.push_str("\n\n");
    for (i, a) in animals.iter().enumerate() {
        out.push_str(&format!("{}. {} ({}) - {} лет\n", i + 1, a.name, a.species, a.age));
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!("Дата выгрузки: {}\n", generated_at.format("%d.%m.%Y %H:%M:%S")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn sample() -> Vec<animal::Model> {
        let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        vec![
            animal::Model { id: 1, name: "Leo".into(), species: "Lion".into(), age: 5, created_at: Some(ts), updated_at: Some(ts), name_lc: String::new(), species_lc: String::new() },
            animal::Model { id: 2, name: "Big \"Ed\"".into(), species: "Elephant".into(), age: 40, created_at: None, updated_at: None, name_lc: String::new(), species_lc: String::new() },
        ]
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let csv = render_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "1,\"Leo\",\"Lion\",5,2024-03-01T09:30:00Z");
        assert_eq!(lines[2], "2,\"Big \"\"Ed\"\"\",\"Elephant\",40,null");
    }

    #[test]
    fn txt_report_layout() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 10, 0, 5).unwrap();
        let txt = render_txt(&sample(), at);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "СПИСОК ЖИВОТНЫХ В ЗООПАРКЕ");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "Всего животных: 2");
        assert_eq!(lines[3], "=".repeat(50));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "1. Leo (Lion) - 5 лет");
        assert_eq!(lines[6], "2. Big \"Ed\" (Elephant) - 40 лет");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "=".repeat(50));
        assert_eq!(lines[9], "Дата выгрузки: 01.03.2024 10:00:05");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn empty_txt_report_still_has_frame() {
        let txt = render_txt(&[], Local::now());
        assert!(txt.contains("Всего животных: 0"));
        assert_eq!(txt.matches(&"=".repeat(50)).count(), 3);
    }

    #[test]
    fn json_is_pretty_array_with_all_fields() {
        let bytes = render_json(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n'));
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        for key in ["id", "name", "species", "age", "created_at", "updated_at"] {
            assert!(parsed[0].get(key).is_some(), "missing {key}");
        }
        assert!(parsed[1]["created_at"].is_null());
        assert!(parsed[0].get("name_lc").is_none());
    }
}
