pub mod config;
pub mod context;
pub mod core;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod export;
pub mod handlers;
pub mod impls;
pub mod middlewares;
pub mod models;
pub mod request;
pub mod response;
pub mod security;
