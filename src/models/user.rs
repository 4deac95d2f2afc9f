pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone)]
pub struct Insert {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}
