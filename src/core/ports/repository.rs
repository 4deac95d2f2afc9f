use chrono::NaiveDateTime;

use crate::error::Error;
use crate::models::{
    application::{Application, Query as ApplicationQuery, Review},
    user::Insert as UserInsert,
};

pub trait ApplicationCommon {
    async fn query(&mut self, query: &ApplicationQuery) -> Result<Vec<Application>, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<Application>, Error>;
    /// Returns the stored review date, or `None` when no application has this id.
    async fn review(&mut self, id: i32, review: &Review) -> Result<Option<NaiveDateTime>, Error>;
}

pub trait UserCommon {
    async fn exists_by_email(&mut self, email: &str) -> Result<bool, Error>;
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error>;
    async fn has_role(&mut self, id: i32, role: &str) -> Result<bool, Error>;
}
