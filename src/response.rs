use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::application::{Application, ApplicationRecord, ApplicationStatus};

#[derive(Debug, Serialize)]
pub struct ApplicationList {
    pub applications: Vec<Application>,
}

/// The listing body as the admin client reads it.
#[derive(Debug, Deserialize)]
pub struct ApplicationRecords {
    pub applications: Vec<ApplicationRecord>,
}

#[derive(Debug, Serialize)]
pub struct Reviewed {
    pub id: i32,
    pub status: ApplicationStatus,
    pub admin_notes: String,
    pub review_date: NaiveDateTime,
}
