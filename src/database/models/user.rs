use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub mail: String,
    /// Argon2 PHC hash; never leaves the server
    #[serde(skip_serializing)]
    pub password: String,
}
