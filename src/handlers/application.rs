use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType, CONTENT_TYPE},
    web::{Data, Json, Path, Query},
    HttpResponse,
};
use chrono::Utc;

use crate::{
    core::application::{application_detail, list_applications, review_application},
    database::sqlx::PgSqlxManager,
    error::Error,
    export::spreadsheet,
    models::application::{Application, ApplicationRecord},
    request::{ListParams, StatusUpdate},
    response::{ApplicationList, Reviewed},
};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn list(Query(ListParams { search, status }): Query<ListParams>, db: Data<PgSqlxManager>) -> Result<Json<ApplicationList>, Error> {
    let mut db = db.acquire().await?;
    let applications = list_applications(&mut db, search, status).await?;
    Ok(Json(ApplicationList { applications }))
}

pub async fn detail(id: Path<(i32,)>, db: Data<PgSqlxManager>) -> Result<Json<Application>, Error> {
    let mut db = db.acquire().await?;
    Ok(Json(application_detail(&mut db, id.into_inner().0).await?))
}

pub async fn update_status(id: Path<(i32,)>, Json(StatusUpdate { status, admin_notes }): Json<StatusUpdate>, db: Data<PgSqlxManager>) -> Result<Json<Reviewed>, Error> {
    let mut db = db.acquire().await?;
    Ok(Json(review_application(&mut db, id.into_inner().0, status, admin_notes).await?))
}

pub async fn export(Query(ListParams { search, status }): Query<ListParams>, db: Data<PgSqlxManager>) -> Result<HttpResponse, Error> {
    let mut db = db.acquire().await?;
    let records: Vec<ApplicationRecord> = list_applications(&mut db, search, status).await?.into_iter().map(ApplicationRecord::from).collect();
    let file = spreadsheet::export(&records, Utc::now().date_naive())?;
    log::info!("exported {} applications to {}", records.len(), file.file_name);
    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, XLSX_CONTENT_TYPE))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.file_name)],
        })
        .body(file.bytes))
}
