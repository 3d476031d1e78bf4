use std::collections::HashMap;

use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Sport;

/// Exact-name lookup used when resolving an activity's sport at creation
pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Sport>, DatabaseError> {
    let sport = sqlx::query_as::<_, Sport>("SELECT id, name FROM sports WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(sport)
}

/// Full id -> name map for display enrichment; sports are a small, static
/// reference table so one query covers a whole page of activities.
pub async fn name_map(pool: &PgPool) -> Result<HashMap<i32, String>, DatabaseError> {
    let sports = sqlx::query_as::<_, Sport>("SELECT id, name FROM sports")
        .fetch_all(pool)
        .await?;
    Ok(sports.into_iter().map(|s| (s.id, s.name)).collect())
}
