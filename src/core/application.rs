use crate::core::ports::repository::ApplicationCommon;
use crate::error::Error;
use crate::models::application::{Application, ApplicationStatus, Query, Review, StatusFilter};
use crate::response::Reviewed;

pub async fn list_applications<D>(db: &mut D, search: Option<String>, filter: StatusFilter) -> Result<Vec<Application>, Error>
where
    D: ApplicationCommon,
{
    let search = search.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
    let query = Query {
        search,
        status: filter.status(),
    };
    ApplicationCommon::query(db, &query).await
}

pub async fn application_detail<D>(db: &mut D, id: i32) -> Result<Application, Error>
where
    D: ApplicationCommon,
{
    ApplicationCommon::get(db, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("application(id: {})", id)))
}

pub async fn review_application<D>(db: &mut D, id: i32, status: ApplicationStatus, admin_notes: Option<String>) -> Result<Reviewed, Error>
where
    D: ApplicationCommon,
{
    // pending is only ever the initial state
    if status == ApplicationStatus::Pending {
        return Err(Error::BusinessError("an application cannot be moved back to pending".into()));
    }
    let review = Review {
        status,
        admin_notes: admin_notes.unwrap_or_default(),
    };
    let review_date = ApplicationCommon::review(db, id, &review)
        .await?
        .ok_or_else(|| Error::NotFound(format!("application(id: {})", id)))?;
    log::info!("application {} reviewed as {}", id, status);
    Ok(Reviewed {
        id,
        status,
        admin_notes: review.admin_notes,
        review_date,
    })
}
