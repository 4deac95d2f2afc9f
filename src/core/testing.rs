use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::core::ports::repository::{ApplicationCommon, UserCommon};
use crate::error::Error;
use crate::models::{
    application::{Application, Query, Review},
    user::Insert as UserInsert,
};

/// In-memory store used by the service tests.
#[derive(Default)]
pub struct MemoryStore {
    applications: Vec<Application>,
    users: Vec<(i32, UserInsert)>,
    queries: Vec<Query>,
}

impl MemoryStore {
    pub fn with_applications(applications: Vec<Application>) -> Self {
        Self {
            applications,
            ..Default::default()
        }
    }

    pub fn application(id: i32, first_name: &str, last_name: &str, status: &str) -> Application {
        Application {
            id,
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            phone_number: Some("0244000000".into()),
            email: format!("{}.{}@example.com", first_name, last_name).to_lowercase(),
            gender: "Female".into(),
            nationality: Some("Ghanaian".into()),
            residential_address: "12 Ring Road".into(),
            street_address: "Ring Road".into(),
            street_address_line_2: "".into(),
            city_state_province: "Accra".into(),
            country: "Ghana".into(),
            course: "CS101".into(),
            institution_name: "Accra High".into(),
            highest_education: "WASSCE".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2004, 3, 1).unwrap(),
            reason_for_course: "Interest".into(),
            how_hear: "Radio".into(),
            declaration: true,
            status: Some(status.into()),
            application_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(9, 30, 0),
            review_date: None,
            admin_notes: None,
            user_first_name: None,
            user_last_name: None,
            user_email: None,
            course_name: None,
        }
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn users(&self) -> &[(i32, UserInsert)] {
        &self.users
    }
}

fn matches_search(app: &Application, search: &str) -> bool {
    let needle = search.to_lowercase();
    [
        Some(&app.first_name),
        app.middle_name.as_ref(),
        Some(&app.last_name),
        Some(&app.email),
        app.phone_number.as_ref(),
        Some(&app.course),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

impl ApplicationCommon for MemoryStore {
    async fn query(&mut self, query: &Query) -> Result<Vec<Application>, Error> {
        self.queries.push(query.clone());
        Ok(self
            .applications
            .iter()
            .filter(|app| query.search.as_deref().map_or(true, |s| matches_search(app, s)))
            .filter(|app| query.status.map_or(true, |s| app.status.as_deref() == Some(s.as_str())))
            .cloned()
            .collect())
    }

    async fn get(&mut self, id: i32) -> Result<Option<Application>, Error> {
        Ok(self.applications.iter().find(|app| app.id == id).cloned())
    }

    async fn review(&mut self, id: i32, review: &Review) -> Result<Option<NaiveDateTime>, Error> {
        let now = Utc::now().naive_utc();
        Ok(self.applications.iter_mut().find(|app| app.id == id).map(|app| {
            app.status = Some(review.status.as_str().into());
            app.admin_notes = Some(review.admin_notes.clone());
            app.review_date = Some(now);
            now
        }))
    }
}

impl UserCommon for MemoryStore {
    async fn exists_by_email(&mut self, email: &str) -> Result<bool, Error> {
        Ok(self.users.iter().any(|(_, u)| u.email == email))
    }

    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error> {
        if self.users.iter().any(|(_, u)| u.email == user.email) {
            return Err(Error::BusinessError(format!("duplicate email({})", user.email)));
        }
        let id = self.users.len() as i32 + 1;
        self.users.push((id, user));
        Ok(id)
    }

    async fn has_role(&mut self, id: i32, role: &str) -> Result<bool, Error> {
        Ok(self.users.iter().any(|(uid, u)| *uid == id && u.role == role))
    }
}

