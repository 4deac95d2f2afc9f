use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

use super::{format_date, ExportError, ExportFile};
use crate::models::application::ApplicationRecord;

pub const SHEET_NAME: &str = "Applications";

pub const COLUMNS: [&str; 15] = [
    "Application ID",
    "First Name",
    "Last Name",
    "Phone Number",
    "Email",
    "Gender",
    "Nationality",
    "Residential Address",
    "Street Address",
    "Country",
    "Course Name",
    "Highest Education",
    "Status",
    "Application Date",
    "Admin Notes",
];

/// One spreadsheet row. Built from an [`ApplicationRecord`] with these precedences, where an
/// empty string counts as missing:
///
/// - first name: `user_first_name`, then `first_name`
/// - last name: `user_last_name`, then `last_name`
/// - email: `user_email`, then `email`
/// - course name: `course_name`, then `course`
///
/// Any other missing field becomes an empty cell; a missing application date becomes `N/A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub gender: String,
    pub nationality: String,
    pub residential_address: String,
    pub street_address: String,
    pub country: String,
    pub course_name: String,
    pub highest_education: String,
    pub status: String,
    pub application_date: String,
    pub admin_notes: String,
}

fn prefer(primary: &Option<String>, fallback: &Option<String>) -> String {
    [primary, fallback]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .cloned()
        .unwrap_or_default()
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl From<&ApplicationRecord> for ExportRow {
    fn from(app: &ApplicationRecord) -> Self {
        Self {
            id: app.id,
            first_name: prefer(&app.user_first_name, &app.first_name),
            last_name: prefer(&app.user_last_name, &app.last_name),
            phone_number: or_empty(&app.phone_number),
            email: prefer(&app.user_email, &app.email),
            gender: or_empty(&app.gender),
            nationality: or_empty(&app.nationality),
            residential_address: or_empty(&app.residential_address),
            street_address: or_empty(&app.street_address),
            country: or_empty(&app.country),
            course_name: prefer(&app.course_name, &app.course),
            highest_education: or_empty(&app.highest_education),
            status: or_empty(&app.status),
            application_date: format_date(app.application_date.as_deref()),
            admin_notes: or_empty(&app.admin_notes),
        }
    }
}

impl ExportRow {
    /// The text cells after the id, in [`COLUMNS`] order.
    pub fn text_cells(&self) -> [&str; 14] {
        [
            &self.first_name,
            &self.last_name,
            &self.phone_number,
            &self.email,
            &self.gender,
            &self.nationality,
            &self.residential_address,
            &self.street_address,
            &self.country,
            &self.course_name,
            &self.highest_education,
            &self.status,
            &self.application_date,
            &self.admin_notes,
        ]
    }
}

pub fn file_name(date: NaiveDate) -> String {
    format!("applications_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Writes the rows, in order, below a header row.
pub fn write_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        worksheet.write_number(r, 0, row.id)?;
        for (col, cell) in row.text_cells().iter().enumerate() {
            worksheet.write_string(r, col as u16 + 1, *cell)?;
        }
    }
    worksheet.autofit();
    Ok(workbook.save_to_buffer()?)
}

/// Exports the given applications as they are ordered, one row each.
pub fn export(applications: &[ApplicationRecord], today: NaiveDate) -> Result<ExportFile, ExportError> {
    let rows: Vec<ExportRow> = applications.iter().map(ExportRow::from).collect();
    Ok(ExportFile {
        file_name: file_name(today),
        bytes: write_workbook(&rows)?,
    })
}
