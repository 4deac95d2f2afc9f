use actix_web::web::{get, put, scope, Data};
use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use env_logger::Env;

use admissions::config::Config;
use admissions::database::{self, bootstrap, sqlx::PgSqlxManager};
use admissions::handlers;
use admissions::middlewares::{authorizer::Author, jwt::JWTMiddleware};
use admissions::models::user::ROLE_ADMIN;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("admissions=info,actix_web=info")).init();
    let config = Config::from_env()?;
    let pool = database::connect(&config).await.context("failed to connect to database")?;
    bootstrap::run(&pool, &config.admin).await;

    let server_pool = pool.clone();
    let jwt_secret = config.jwt_secret.clone();
    log::info!("listening on {}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(Data::new(PgSqlxManager::new(server_pool.clone())))
            .service(
                scope("/api/applications")
                    .wrap(Author::new(server_pool.clone(), ROLE_ADMIN))
                    .wrap(JWTMiddleware::new(jwt_secret.clone()))
                    .route("", get().to(handlers::application::list))
                    .route("/export", get().to(handlers::application::export))
                    .route("/{id}", get().to(handlers::application::detail))
                    .route("/{id}/status", put().to(handlers::application::update_status)),
            )
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await?;

    pool.close().await;
    log::info!("database pool closed");
    Ok(())
}
