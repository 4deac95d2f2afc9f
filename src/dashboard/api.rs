use actix_web::http::header::AUTHORIZATION;
use awc::Client;
use thiserror::Error as ThisError;

use crate::models::application::ApplicationRecord;
use crate::request::{ListParams, StatusUpdate};
use crate::response::ApplicationRecords;

pub const FETCH_FAILED: &str = "Failed to fetch applications";
pub const UPDATE_FAILED: &str = "Failed to update application status";

const BODY_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: u16, message: &'static str },

    #[error("{0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

/// The two calls the admin dashboard makes against the admissions server.
pub trait ApplicationsApi {
    async fn list(&self, params: &ListParams) -> Result<Vec<ApplicationRecord>, ApiError>;
    async fn update_status(&self, id: i32, update: &StatusUpdate) -> Result<(), ApiError>;
}

pub struct HttpApplicationsApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpApplicationsApi {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: Client::default(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl ApplicationsApi for HttpApplicationsApi {
    async fn list(&self, params: &ListParams) -> Result<Vec<ApplicationRecord>, ApiError> {
        let query = [("search", params.search.as_deref().unwrap_or("")), ("status", params.status.as_str())];
        let mut res = self
            .client
            .get(format!("{}/api/applications", self.base_url))
            .insert_header((AUTHORIZATION, self.bearer()))
            .query(&query)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !res.status().is_success() {
            return Err(ApiError::Status {
                status: res.status().as_u16(),
                message: FETCH_FAILED,
            });
        }
        let body = res.json::<ApplicationRecords>().limit(BODY_LIMIT).await.map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.applications)
    }

    async fn update_status(&self, id: i32, update: &StatusUpdate) -> Result<(), ApiError> {
        let res = self
            .client
            .put(format!("{}/api/applications/{}/status", self.base_url, id))
            .insert_header((AUTHORIZATION, self.bearer()))
            .send_json(update)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !res.status().is_success() {
            return Err(ApiError::Status {
                status: res.status().as_u16(),
                message: UPDATE_FAILED,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Shows the user a blocking notice.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<F> Notifier for F
where
    F: Fn(Notice),
{
    fn notify(&self, notice: Notice) {
        self(notice)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::application::{ApplicationStatus, StatusFilter};
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::json;
    use std::sync::Mutex;

    type Seen = Mutex<Vec<String>>;

    async fn listing(req: HttpRequest, seen: web::Data<Seen>) -> HttpResponse {
        let auth = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()).unwrap_or_default();
        seen.lock().unwrap().push(format!("{} {}", auth, req.query_string()));
        HttpResponse::Ok().json(json!({ "applications": [{ "id": 42, "first_name": "John", "status": "pending" }] }))
    }

    async fn failing_update(path: web::Path<(i32,)>, body: web::Json<StatusUpdate>, seen: web::Data<Seen>) -> HttpResponse {
        seen.lock().unwrap().push(format!("{} {} {:?}", path.into_inner().0, body.status, body.admin_notes));
        HttpResponse::InternalServerError().finish()
    }

    #[actix_web::test]
    async fn test_requests_against_server() {
        let seen = web::Data::new(Seen::default());
        let server_seen = seen.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_seen.clone())
                .route("/api/applications", web::get().to(listing))
                .route("/api/applications/{id}/status", web::put().to(failing_update))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let api = HttpApplicationsApi::new(&format!("http://{}/", addr), "tok");
        let params = ListParams {
            search: Some("smith & co".into()),
            status: StatusFilter::Approved,
        };
        let apps = api.list(&params).await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].id, 42);
        assert_eq!(apps[0].first_name.as_deref(), Some("John"));

        let update = StatusUpdate {
            status: ApplicationStatus::Rejected,
            admin_notes: Some("incomplete docs".into()),
        };
        let err = api.update_status(42, &update).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                message: UPDATE_FAILED,
            }
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "Bearer tok search=smith+%26+co&status=approved".to_string(),
                "42 rejected Some(\"incomplete docs\")".to_string(),
            ]
        );
        handle.stop(true).await;
    }

    #[test]
    fn test_status_error_shows_user_message() {
        let err = ApiError::Status {
            status: 500,
            message: FETCH_FAILED,
        };
        assert_eq!(err.to_string(), "Failed to fetch applications");
    }

    #[actix_web::test]
    async fn test_base_url_is_normalized() {
        let api = HttpApplicationsApi::new("https://admissions.example/", "t0k3n");
        assert_eq!(api.base_url, "https://admissions.example");
        assert_eq!(api.bearer(), "Bearer t0k3n");
    }
}
