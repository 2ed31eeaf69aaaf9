//! File export of the full animal record set.
//!
//! `render` turns records into bytes for one of the [`ExportFormat`]s;
//! `file_storage` writes them under the configured directory and serves
//! previously generated files back by name.

use std::str::FromStr;

use crate::errors::ServiceError;

pub mod render;
pub mod file_storage;

pub use file_storage::{ExportedFile, FileStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Txt];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" => Ok(ExportFormat::Txt),
            other => Err(ServiceError::NotFound(format!("export format '{}' not supported", other))),
        }
    }
}

/// Content type served for a stored file, chosen by its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".json") {
        "application/json"
    } else if filename.ends_with(".csv") {
        "text/csv"
    } else if filename.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats_case_insensitively() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("Txt".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert!(matches!("xml".parse::<ExportFormat>(), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type_for("animals_20240101_120000.json"), "application/json");
        assert_eq!(content_type_for("a.csv"), "text/csv");
        assert_eq!(content_type_for("a.txt"), "text/plain");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
        assert_eq!(content_type_for("json"), "application/octet-stream");
    }
}
