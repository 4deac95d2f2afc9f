use chrono::NaiveDateTime;
use sqlx::pool::PoolConnection;
use sqlx::{query_as, query_scalar, Executor, PgPool, Postgres, QueryBuilder};

use crate::core::ports::repository::{ApplicationCommon, UserCommon};
use crate::error::Error;
use crate::models::{
    application::{Application, Query, Review},
    user::Insert as UserInsert,
};

const SELECT_APPLICATIONS: &str = "
    SELECT
        a.*,
        u.first_name AS user_first_name,
        u.last_name AS user_last_name,
        u.email AS user_email,
        c.name AS course_name
    FROM applications AS a
    LEFT JOIN users AS u ON u.email = a.email
    LEFT JOIN courses AS c ON c.code = a.course";

/// Escapes LIKE wildcards so the search text matches literally.
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> ApplicationCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn query(&mut self, query: &Query) -> Result<Vec<Application>, Error> {
        let mut stmt = QueryBuilder::<Postgres>::new(SELECT_APPLICATIONS);
        stmt.push(" WHERE 1 = 1");
        if let Some(search) = &query.search {
            stmt.push(" AND CONCAT_WS(' ', a.first_name, a.middle_name, a.last_name, a.email, a.phone_number, a.course) ILIKE ")
                .push_bind(like_pattern(search));
        }
        if let Some(status) = query.status {
            stmt.push(" AND a.status = ").push_bind(status.as_str());
        }
        stmt.push(" ORDER BY a.application_date DESC NULLS LAST, a.id DESC");
        let applications = stmt.build_query_as::<Application>().fetch_all(&mut self.executor).await?;
        Ok(applications)
    }

    async fn get(&mut self, id: i32) -> Result<Option<Application>, Error> {
        let application = query_as::<_, Application>(&format!("{} WHERE a.id = $1", SELECT_APPLICATIONS))
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(application)
    }

    async fn review(&mut self, id: i32, review: &Review) -> Result<Option<NaiveDateTime>, Error> {
        let review_date = query_scalar("UPDATE applications SET status = $1, admin_notes = $2, review_date = CURRENT_TIMESTAMP WHERE id = $3 RETURNING review_date")
            .bind(review.status.as_str())
            .bind(&review.admin_notes)
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(review_date)
    }
}

impl<E> UserCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn exists_by_email(&mut self, email: &str) -> Result<bool, Error> {
        let exists = query_scalar("SELECT EXISTS(SELECT id FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(exists)
    }

    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO users (email, password, first_name, last_name, role) VALUES ($1, $2, $3, $4, $5) RETURNING id")
            .bind(user.email)
            .bind(user.password)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.role)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn has_role(&mut self, id: i32, role: &str) -> Result<bool, Error> {
        let res = query_scalar("SELECT EXISTS(SELECT id FROM users WHERE id = $1 AND role = $2)")
            .bind(id)
            .bind(role)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(res)
    }
}

#[derive(Clone)]
pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn acquire(&self) -> Result<PgSqlx<PoolConnection<Postgres>>, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx { executor: conn })
    }
}
