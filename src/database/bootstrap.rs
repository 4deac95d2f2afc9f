use sqlx::{query, PgPool};

use crate::core::user::{seed_admin, AdminSeed};
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;

pub const CREATE_USERS: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email VARCHAR(255) UNIQUE NOT NULL,
        password VARCHAR(255) NOT NULL,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        phone VARCHAR(20),
        role VARCHAR(20) DEFAULT 'student',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

pub const CREATE_COURSES: &str = "
    CREATE TABLE IF NOT EXISTS courses (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        code VARCHAR(50) UNIQUE NOT NULL,
        description TEXT,
        duration VARCHAR(100),
        requirements TEXT,
        fee DECIMAL(10,2),
        is_active BOOLEAN DEFAULT true,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

pub const CREATE_APPLICATIONS: &str = "
    CREATE TABLE IF NOT EXISTS applications (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(255) NOT NULL,
        middle_name VARCHAR(255),
        last_name VARCHAR(255) NOT NULL,
        phone_number VARCHAR(20),
        email VARCHAR(255) UNIQUE NOT NULL,
        gender VARCHAR(50) NOT NULL,
        nationality VARCHAR(100),
        residential_address VARCHAR(255) NOT NULL,
        street_address VARCHAR(255) NOT NULL,
        street_address_line_2 VARCHAR(255) NOT NULL,
        city_state_province VARCHAR(255) NOT NULL,
        country VARCHAR(100) NOT NULL,
        course VARCHAR(255) NOT NULL,
        institution_name VARCHAR(255) NOT NULL,
        highest_education VARCHAR(255) NOT NULL,
        date_of_birth DATE NOT NULL,
        reason_for_course TEXT NOT NULL,
        how_hear VARCHAR(255) NOT NULL,
        declaration BOOLEAN NOT NULL,
        status VARCHAR(50) DEFAULT 'pending',
        application_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        review_date TIMESTAMP,
        admin_notes TEXT
    )";

// tables created before nationality was tracked
pub const ADD_NATIONALITY: &str = "ALTER TABLE applications ADD COLUMN IF NOT EXISTS nationality VARCHAR(100)";

pub const STATEMENTS: [&str; 4] = [CREATE_USERS, CREATE_COURSES, CREATE_APPLICATIONS, ADD_NATIONALITY];

/// Creates the tables and seeds the administrator. Every statement is idempotent, so a
/// partial run can simply be repeated.
pub async fn create_tables(pool: &PgPool, seed: &AdminSeed) -> Result<(), Error> {
    for stmt in STATEMENTS {
        query(stmt).execute(pool).await?;
    }
    let mut db = PgSqlxManager::new(pool.clone()).acquire().await?;
    seed_admin(&mut db, seed).await?;
    Ok(())
}

/// Runs [`create_tables`], logging instead of failing.
pub async fn run(pool: &PgPool, seed: &AdminSeed) {
    match create_tables(pool, seed).await {
        Ok(()) => log::info!("database tables created or already exist"),
        Err(e) => log::error!("error creating tables: {}", e),
    }
}
