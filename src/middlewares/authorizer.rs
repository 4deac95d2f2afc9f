use actix_web::dev::{Service, ServiceRequest, Transform};
use actix_web::HttpMessage;
use sqlx::PgPool;
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::rc::Rc;
use std::task::Poll;

use crate::context::UserInfo;
use crate::core::ports::repository::UserCommon;
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;

/// Lets a request through only when the authenticated user holds `role`.
/// Must be mounted inside the JWT middleware.
pub struct Author {
    db: PgPool,
    role: &'static str,
}

impl Author {
    pub fn new(db: PgPool, role: &'static str) -> Self {
        Self { db, role }
    }
}

impl<S> Transform<S, ServiceRequest> for Author
where
    S: Service<ServiceRequest, Error = actix_web::Error> + 'static,
    S::Future: 'static,
{
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type Response = S::Response;
    type Error = S::Error;
    type InitError = ();
    type Transform = AuthorMiddleware<S>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorMiddleware {
            manager: PgSqlxManager::new(self.db.clone()),
            role: self.role,
            service: Rc::new(service),
        }))
    }
}

pub struct AuthorMiddleware<S> {
    manager: PgSqlxManager,
    role: &'static str,
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthorMiddleware<S>
where
    S: Service<ServiceRequest, Error = actix_web::Error> + 'static,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }
    fn call(&self, req: ServiceRequest) -> Self::Future {
        let uid = match req.extensions().get::<UserInfo>() {
            Some(user_info) => user_info.id,
            None => return Box::pin(async move { Err(Error::Unauthorized.into()) }),
        };
        let manager = self.manager.clone();
        let role = self.role;
        let service = self.service.clone();
        Box::pin(async move {
            let mut db = manager.acquire().await?;
            if !UserCommon::has_role(&mut db, uid, role).await? {
                log::warn!("user {} lacks role {} for {}", uid, role, req.path());
                return Err(Error::Forbidden.into());
            }
            service.call(req).await
        })
    }
}
