use actix_web::dev::{Service, ServiceRequest, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpMessage;
use serde::{Deserialize, Serialize};
use std::future::{ready, Future, Ready};
use std::pin::Pin;

use crate::context::UserInfo;
use crate::core::tokener::{Payload, Tokener};
use crate::error::Error;
use crate::impls::tokener::jwt::JWT;

#[derive(Debug, Deserialize, Serialize)]
pub struct Claim {
    pub user: String,
    pub exp: i64,
}

impl Payload for Claim {
    fn user(&self) -> &str {
        &self.user
    }
}

/// Extracts the token of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

pub struct JWTMiddleware {
    secret: Vec<u8>,
}

impl JWTMiddleware {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S> Transform<S, ServiceRequest> for JWTMiddleware
where
    S: Service<ServiceRequest, Error = actix_web::Error> + 'static,
    S::Future: 'static,
{
    type Error = actix_web::Error;
    type Response = S::Response;
    type Transform = JWTService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JWTService {
            tokener: JWT::new(self.secret.clone()),
            next_service: service,
        }))
    }
}

pub struct JWTService<S> {
    tokener: JWT,
    next_service: S,
}

impl<S> JWTService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<i32, Error> {
        let header = req.headers().get(AUTHORIZATION).ok_or(Error::Unauthorized)?;
        let token = bearer_token(header.to_str()?).ok_or(Error::Unauthorized)?;
        let claim = <JWT as Tokener<Claim>>::verify_token(&self.tokener, token)?;
        claim.user().parse::<i32>().map_err(|_| Error::Unauthorized)
    }
}

impl<S> Service<ServiceRequest> for JWTService<S>
where
    S: Service<ServiceRequest, Error = actix_web::Error>,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authenticate(&req) {
            Ok(id) => {
                req.extensions_mut().insert(UserInfo { id });
            }
            Err(e) => {
                log::debug!("rejected request to {}: {}", req.path(), e);
                return Box::pin(async move { Err(e.into()) });
            }
        }
        let res_fut = self.next_service.call(req);
        Box::pin(res_fut)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    const SECRET: &[u8] = b"admissions-secret";

    async fn whoami(user: UserInfo) -> String {
        user.id.to_string()
    }

    fn token(user: &str, ttl: Duration) -> String {
        let claim = Claim {
            user: user.into(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claim, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    #[actix_web::test]
    async fn test_rejects_missing_or_bad_token() {
        let app = actix_test::init_service(App::new().wrap(JWTMiddleware::new(SECRET.to_vec())).route("/whoami", web::get().to(whoami))).await;
        let cases = vec![
            actix_test::TestRequest::get().uri("/whoami").to_request(),
            actix_test::TestRequest::get().uri("/whoami").insert_header((AUTHORIZATION, "Bearer not-a-jwt")).to_request(),
            actix_test::TestRequest::get().uri("/whoami").insert_header((AUTHORIZATION, format!("Bearer {}", token("7", Duration::hours(-2))))).to_request(),
            actix_test::TestRequest::get().uri("/whoami").insert_header((AUTHORIZATION, format!("Basic {}", token("7", Duration::hours(1))))).to_request(),
            actix_test::TestRequest::get().uri("/whoami").insert_header((AUTHORIZATION, format!("Bearer {}", token("admin", Duration::hours(1))))).to_request(),
        ];
        for req in cases {
            let err = actix_test::try_call_service(&app, req).await.err().unwrap();
            assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn test_passes_user_to_handler() {
        let app = actix_test::init_service(App::new().wrap(JWTMiddleware::new(SECRET.to_vec())).route("/whoami", web::get().to(whoami))).await;
        let req = actix_test::TestRequest::get().uri("/whoami").insert_header((AUTHORIZATION, format!("Bearer {}", token("7", Duration::hours(1))))).to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        assert_eq!(body, "7");
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer   abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
