//! Vehicle history from JSON files
//!
//! A history file holds an array of service records:
//!
//! ```json
//! [
//!   {
//!     "record_id": "MR-1021",
//!     "vehicle_id": "BKT5521",
//!     "raw_odometer": "655000",
//!     "recorded_at": "2024-07-01 09:30:00",
//!     "description": "Tukar minyak enjin",
//!     "response_text": null,
//!     "service_type_code": 3
//!   }
//! ]
//! ```
//!
//! Odometer and service type may be strings or numbers. Timestamps may be
//! RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` (UTC assumed); anything
//! else leaves the record undated. A directory is read recursively and every
//! `.json` file in it is loaded in path order. Records without a `record_id`
//! are named after their file and position, `<file>#<index>`, where `<file>`
//! is the path below the scanned directory.

use crate::app::models::{RawReading, ServiceType};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Text or number in the source JSON
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    record_id: Option<TextOrNumber>,
    vehicle_id: String,
    #[serde(alias = "odometer")]
    raw_odometer: Option<TextOrNumber>,
    recorded_at: Option<String>,
    description: Option<String>,
    response_text: Option<String>,
    #[serde(alias = "mr_type")]
    service_type_code: Option<TextOrNumber>,
}

impl HistoryRecord {
    fn into_reading(self, fallback_id: String) -> RawReading {
        let recorded_at = match self.recorded_at.as_deref().map(parse_recorded_at) {
            Some(Ok(at)) => at,
            Some(Err(e)) => {
                warn!("Record {}: {}, treating as undated", fallback_id, e);
                None
            }
            None => None,
        };

        RawReading {
            vehicle_id: self.vehicle_id.trim().to_string(),
            raw_value: self
                .raw_odometer
                .map(TextOrNumber::into_text)
                .unwrap_or_default(),
            recorded_at,
            record_id: self
                .record_id
                .map(TextOrNumber::into_text)
                .unwrap_or(fallback_id),
            description: self.description.unwrap_or_default(),
            response_text: self.response_text.unwrap_or_default(),
            service_type: self
                .service_type_code
                .map(|code| ServiceType::from_code(&code.into_text()))
                .unwrap_or(ServiceType::Unknown),
        }
    }
}

/// Parse a source timestamp; blank means undated
///
/// # Errors
///
/// `DateTimeParsing` when the value matches none of the accepted formats
pub fn parse_recorded_at(value: &str) -> Result<Option<DateTime<Utc>>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT) {
        return Ok(Some(at.and_utc()));
    }

    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => Ok(date.and_hms_opt(0, 0, 0).map(|at| at.and_utc())),
        Err(e) => Err(Error::datetime_parsing(
            format!("Unrecognised timestamp '{}'", trimmed),
            e,
        )),
    }
}

/// Load every record from one history file
///
/// Records without a `record_id` get `<file stem>#<index>`.
pub fn load_history_file(path: &Path) -> Result<Vec<RawReading>> {
    let source = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "history".to_string());
    load_records(path, &source)
}

/// Load one file, labelling id-less records as `<source>#<index>`
fn load_records(path: &Path, source: &str) -> Result<Vec<RawReading>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read history file {}", path.display()), e))?;
    let records: Vec<HistoryRecord> = serde_json::from_str(&contents).map_err(|e| {
        Error::json(format!("Failed to parse history file {}", path.display()), e)
    })?;

    let readings: Vec<RawReading> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_reading(format!("{}#{}", source, index)))
        .collect();

    debug!("Loaded {} records from {}", readings.len(), path.display());
    Ok(readings)
}

/// Path of `file` below `root` without its extension, `/`-separated
///
/// Unique per file within one scan.
pub fn source_label(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file).with_extension("");
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// All `.json` files under `dir`, sorted by path
pub fn discover_history_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to scan {}", dir.display()), e)
        })?;
        let is_json = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Load a history file, or every history file under a directory
pub fn load_history(path: &Path) -> Result<Vec<RawReading>> {
    if !path.exists() {
        return Err(Error::data_validation(format!(
            "History path does not exist: {}",
            path.display()
        )));
    }

    if !path.is_dir() {
        return load_history_file(path);
    }

    let files = discover_history_files(path)?;
    let mut readings = Vec::new();
    for file in &files {
        readings.extend(load_records(file, &source_label(path, file))?);
    }

    info!(
        "Loaded {} records from {} history file(s) under {}",
        readings.len(),
        files.len(),
        path.display()
    );
    Ok(readings)
}

/// Split records by vehicle, keeping input order within each vehicle
pub fn group_by_vehicle(readings: Vec<RawReading>) -> BTreeMap<String, Vec<RawReading>> {
    let mut fleet: BTreeMap<String, Vec<RawReading>> = BTreeMap::new();
    for reading in readings {
        fleet
            .entry(reading.vehicle_id.clone())
            .or_default()
            .push(reading);
    }
    fleet
}

/// Records belonging to one vehicle; vehicle ids compare case-insensitively
pub fn history_for_vehicle(readings: Vec<RawReading>, vehicle_id: &str) -> Vec<RawReading> {
    readings
        .into_iter()
        .filter(|reading| reading.vehicle_id.eq_ignore_ascii_case(vehicle_id.trim()))
        .collect()
}
