use itertools::Itertools;
use std::fmt::{self, Display};

use crate::export::format_date;
use crate::models::application::ApplicationRecord;

/// The fields of the application detail panel, labeled and in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    fields: Vec<(&'static str, String)>,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "Yes" } else { "No" };
    answer.to_string()
}

impl From<&ApplicationRecord> for DetailView {
    fn from(app: &ApplicationRecord) -> Self {
        let name = [&app.first_name, &app.middle_name, &app.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .join(" ");
        let course = [&app.course_name, &app.course].into_iter().flatten().find(|c| !c.is_empty()).cloned().unwrap_or_default();
        let admin_notes = app.admin_notes.clone().filter(|n| !n.is_empty()).unwrap_or_else(|| "No notes".into());
        Self {
            fields: vec![
                ("ID", app.id.to_string()),
                ("Name", name),
                ("Phone Number", text(&app.phone_number)),
                ("Email", text(&app.email)),
                ("Gender", text(&app.gender)),
                ("Nationality", text(&app.nationality)),
                ("Residential Address", text(&app.residential_address)),
                ("Street Address", text(&app.street_address)),
                ("Street Address Line 2", text(&app.street_address_line_2)),
                ("City/State/Province", text(&app.city_state_province)),
                ("Country", text(&app.country)),
                ("Course", course),
                ("Institution Name", text(&app.institution_name)),
                ("Highest Education", text(&app.highest_education)),
                ("Date of Birth", text(&app.date_of_birth)),
                ("Reason For Course", text(&app.reason_for_course)),
                ("How Heard", text(&app.how_hear)),
                ("Declaration", yes_no(app.declaration.unwrap_or(false))),
                ("Status", text(&app.status)),
                ("Application Date", format_date(app.application_date.as_deref())),
                ("Admin Notes", admin_notes),
            ],
        }
    }
}

impl DetailView {
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.iter().find(|(l, _)| *l == label).map(|(_, v)| v.as_str())
    }
}

impl Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.fields {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_full_record() {
        let app = ApplicationRecord {
            id: 42,
            first_name: Some("Ama".into()),
            middle_name: Some("Serwaa".into()),
            last_name: Some("Owusu".into()),
            course: Some("CS101".into()),
            course_name: Some("Computer Science".into()),
            declaration: Some(true),
            date_of_birth: Some("2004-03-01".into()),
            status: Some("approved".into()),
            application_date: Some("2024-01-05T09:30:00".into()),
            admin_notes: Some("strong transcript".into()),
            ..Default::default()
        };
        let view = DetailView::from(&app);
        assert_eq!(view.fields().len(), 21);
        assert_eq!(view.get("ID"), Some("42"));
        assert_eq!(view.get("Name"), Some("Ama Serwaa Owusu"));
        assert_eq!(view.get("Course"), Some("Computer Science"));
        assert_eq!(view.get("Declaration"), Some("Yes"));
        assert_eq!(view.get("Date of Birth"), Some("2004-03-01"));
        assert_eq!(view.get("Application Date"), Some("Jan 5, 2024"));
        assert_eq!(view.get("Admin Notes"), Some("strong transcript"));
    }

    #[test]
    fn test_sparse_record_renders_blanks() {
        let view = DetailView::from(&ApplicationRecord {
            id: 7,
            first_name: Some("Kofi".into()),
            course: Some("CS101".into()),
            ..Default::default()
        });
        assert_eq!(view.get("Name"), Some("Kofi"));
        assert_eq!(view.get("Course"), Some("CS101"));
        assert_eq!(view.get("Email"), Some(""));
        assert_eq!(view.get("Declaration"), Some("No"));
        assert_eq!(view.get("Application Date"), Some("N/A"));
        assert_eq!(view.get("Admin Notes"), Some("No notes"));
        assert!(view.to_string().starts_with("ID: 7\nName: Kofi\n"));
    }
}
