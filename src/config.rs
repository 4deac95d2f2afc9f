use crate::core::user::{AdminSeed, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};
use crate::error::Error;

pub static DATABASE_URL: &str = "DATABASE_URL";
pub static JWT_SECRET: &str = "JWT_SECRET";
pub static BIND_ADDR: &str = "BIND_ADDR";
pub static DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub static ADMIN_EMAIL: &str = "ADMIN_EMAIL";
pub static ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: Vec<u8>,
    pub bind_addr: String,
    pub max_connections: u32,
    pub admin: AdminSeed,
}

impl Config {
    /// Reads the configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).filter(|v| !v.is_empty()).ok_or_else(|| Error::Config(format!("environment variable {} not been set", key)));
        let max_connections = match lookup(DB_MAX_CONNECTIONS) {
            Some(v) => v.parse::<u32>().map_err(|e| Error::Config(format!("invalid {}({}): {}", DB_MAX_CONNECTIONS, v, e)))?,
            None => 5,
        };
        Ok(Self {
            database_url: required(DATABASE_URL)?,
            jwt_secret: required(JWT_SECRET)?.into_bytes(),
            bind_addr: lookup(BIND_ADDR).unwrap_or_else(|| "0.0.0.0:8000".into()),
            max_connections,
            admin: AdminSeed {
                email: lookup(ADMIN_EMAIL).unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.into()),
                password: lookup(ADMIN_PASSWORD).unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into()),
            },
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[(DATABASE_URL, "postgres://localhost/admissions"), (JWT_SECRET, "s3cret")])).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/admissions");
        assert_eq!(config.jwt_secret, b"s3cret".to_vec());
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.admin.email, "admin@eston.edu.gh");
        assert_eq!(config.admin.password, "admin123");
    }

    #[test]
    fn test_missing_required() {
        let res = Config::from_lookup(lookup(&[(DATABASE_URL, "postgres://localhost/admissions")]));
        assert!(matches!(res, Err(Error::Config(msg)) if msg.contains(JWT_SECRET)));
        let res = Config::from_lookup(lookup(&[(DATABASE_URL, ""), (JWT_SECRET, "s3cret")]));
        assert!(matches!(res, Err(Error::Config(msg)) if msg.contains(DATABASE_URL)));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (DATABASE_URL, "postgres://db/admissions"),
            (JWT_SECRET, "s3cret"),
            (BIND_ADDR, "127.0.0.1:9000"),
            (DB_MAX_CONNECTIONS, "12"),
            (ADMIN_EMAIL, "registrar@eston.edu.gh"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.admin.email, "registrar@eston.edu.gh");
        assert!(Config::from_lookup(lookup(&[(DATABASE_URL, "x"), (JWT_SECRET, "y"), (DB_MAX_CONNECTIONS, "many")])).is_err());
    }
}
