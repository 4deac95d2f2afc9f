use crate::core::ports::repository::UserCommon;
use crate::error::Error;
use crate::models::user::{Insert as UserInsert, ROLE_ADMIN};
use crate::security::hash_password;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@eston.edu.gh";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.into(),
            password: DEFAULT_ADMIN_PASSWORD.into(),
        }
    }
}

/// Inserts the administrator unless a user with its email already exists.
/// Returns whether a row was inserted.
pub async fn seed_admin<D>(db: &mut D, seed: &AdminSeed) -> Result<bool, Error>
where
    D: UserCommon,
{
    if UserCommon::exists_by_email(db, &seed.email).await? {
        return Ok(false);
    }
    UserCommon::insert(
        db,
        UserInsert {
            email: seed.email.clone(),
            password: hash_password(&seed.password)?,
            first_name: "Admin".into(),
            last_name: "User".into(),
            role: ROLE_ADMIN.into(),
        },
    )
    .await?;
    log::info!("default admin user created");
    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::testing::MemoryStore;
    use crate::security::verify_password;

    #[tokio::test]
    async fn test_seed_admin_once() {
        let mut store = MemoryStore::default();
        assert!(seed_admin(&mut store, &AdminSeed::default()).await.unwrap());
        assert!(!seed_admin(&mut store, &AdminSeed::default()).await.unwrap());
        let users = store.users();
        assert_eq!(users.len(), 1);
        let (_, admin) = &users[0];
        assert_eq!(admin.email, "admin@eston.edu.gh");
        assert_eq!(admin.role, "admin");
        assert_eq!(admin.first_name, "Admin");
        assert_eq!(admin.last_name, "User");
        assert!(verify_password(&admin.password, "admin123"));
    }

    #[tokio::test]
    async fn test_seeded_admin_has_admin_role() {
        let mut store = MemoryStore::default();
        seed_admin(&mut store, &AdminSeed::default()).await.unwrap();
        assert!(UserCommon::has_role(&mut store, 1, ROLE_ADMIN).await.unwrap());
        assert!(!UserCommon::has_role(&mut store, 1, "student").await.unwrap());
    }
}
