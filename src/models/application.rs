use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(Error::BusinessError(format!("invalid application status({})", s))),
        }
    }
}

/// Status filter of the listing: `all` or a single status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Approved => "approved",
            StatusFilter::Rejected => "rejected",
        }
    }

    pub fn status(&self) -> Option<ApplicationStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(ApplicationStatus::Pending),
            StatusFilter::Approved => Some(ApplicationStatus::Approved),
            StatusFilter::Rejected => Some(ApplicationStatus::Rejected),
        }
    }
}

/// A row of `applications`, joined with the matching user and course when they exist.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Application {
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub gender: String,
    pub nationality: Option<String>,
    pub residential_address: String,
    pub street_address: String,
    pub street_address_line_2: String,
    pub city_state_province: String,
    pub country: String,
    pub course: String,
    pub institution_name: String,
    pub highest_education: String,
    pub date_of_birth: NaiveDate,
    pub reason_for_course: String,
    pub how_hear: String,
    pub declaration: bool,
    pub status: Option<String>,
    pub application_date: Option<NaiveDateTime>,
    pub review_date: Option<NaiveDateTime>,
    pub admin_notes: Option<String>,
    pub user_first_name: Option<String>,
    pub user_last_name: Option<String>,
    pub user_email: Option<String>,
    pub course_name: Option<String>,
}

/// An application as the admin client sees it on the wire. Every field except the id may be
/// missing, and both the joined ("user_*", "course_name") and the plain column names can appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationRecord {
    pub id: i32,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub user_first_name: Option<String>,
    pub user_last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub user_email: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub residential_address: Option<String>,
    pub street_address: Option<String>,
    pub street_address_line_2: Option<String>,
    pub city_state_province: Option<String>,
    pub country: Option<String>,
    pub course: Option<String>,
    pub course_name: Option<String>,
    pub institution_name: Option<String>,
    pub highest_education: Option<String>,
    pub date_of_birth: Option<String>,
    pub reason_for_course: Option<String>,
    pub how_hear: Option<String>,
    pub declaration: Option<bool>,
    pub status: Option<String>,
    pub application_date: Option<String>,
    pub review_date: Option<String>,
    pub admin_notes: Option<String>,
}

impl From<Application> for ApplicationRecord {
    fn from(app: Application) -> Self {
        Self {
            id: app.id,
            first_name: Some(app.first_name),
            middle_name: app.middle_name,
            last_name: Some(app.last_name),
            user_first_name: app.user_first_name,
            user_last_name: app.user_last_name,
            phone_number: app.phone_number,
            email: Some(app.email),
            user_email: app.user_email,
            gender: Some(app.gender),
            nationality: app.nationality,
            residential_address: Some(app.residential_address),
            street_address: Some(app.street_address),
            street_address_line_2: Some(app.street_address_line_2),
            city_state_province: Some(app.city_state_province),
            country: Some(app.country),
            course: Some(app.course),
            course_name: app.course_name,
            institution_name: Some(app.institution_name),
            highest_education: Some(app.highest_education),
            date_of_birth: Some(app.date_of_birth.format("%Y-%m-%d").to_string()),
            reason_for_course: Some(app.reason_for_course),
            how_hear: Some(app.how_hear),
            declaration: Some(app.declaration),
            status: app.status,
            application_date: app.application_date.map(|d| d.format(TIMESTAMP_FORMAT).to_string()),
            review_date: app.review_date.map(|d| d.format(TIMESTAMP_FORMAT).to_string()),
            admin_notes: app.admin_notes,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Query {
    pub search: Option<String>,
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub status: ApplicationStatus,
    pub admin_notes: String,
}
