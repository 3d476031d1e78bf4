use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Join-table record; its existence is the sole source of truth for
/// event membership. Unique per (user_id, event_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participation {
    pub user_id: i32,
    pub event_id: i32,
}
