use sqlx::{PgPool, Postgres, Transaction};

use crate::database::manager::DatabaseError;
use crate::database::models::Event;

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Event>, DatabaseError> {
    let event = sqlx::query_as::<_, Event>(
        "SELECT id, name, status, start_date, end_date FROM events WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(event)
}

pub async fn is_participating(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i32,
    event_id: i32,
) -> Result<bool, DatabaseError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM participation WHERE user_id = $1 AND event_id = $2)",
    )
    .bind(user_id)
    .bind(event_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(exists)
}

/// The unique (user_id, event_id) constraint is the safety net for
/// concurrent joins racing past the existence check.
pub async fn add_participation(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i32,
    event_id: i32,
) -> Result<(), DatabaseError> {
    sqlx::query("INSERT INTO participation (user_id, event_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(event_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn remove_participation(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i32,
    event_id: i32,
) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM participation WHERE user_id = $1 AND event_id = $2")
        .bind(user_id)
        .bind(event_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
