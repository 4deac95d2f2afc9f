pub mod document;
pub mod spreadsheet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_xlsxwriter::XlsxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ExportError {
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] XlsxError),

    #[error("pdf error: {0}")]
    Pdf(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("invalid raster image: {0}")]
    InvalidImage(String),

    #[error("no application selected")]
    NothingSelected,
}

/// A generated file, ready to be offered as a download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

const DATE_TIME_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

/// `Jan 5, 2024` style date. Missing values give `N/A`, unparseable ones `Invalid Date`.
pub fn format_date(value: Option<&str>) -> String {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return "N/A".into(),
    };
    match parse_date(value) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "Invalid Date".into(),
    }
}
