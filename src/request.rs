use serde::{Deserialize, Serialize};

use crate::models::application::{ApplicationStatus, StatusFilter};

/// Query string of the listing and export endpoints: `?search=<text>&status=<filter>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
}

/// Body of `PUT /api/applications/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
}
