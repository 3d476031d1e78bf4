use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Activity;

pub async fn insert(
    pool: &PgPool,
    user_id: i32,
    activity_type_id: i32,
    date: NaiveDate,
    distance: f64,
    time_seconds: i32,
) -> Result<Activity, DatabaseError> {
    let activity = sqlx::query_as::<_, Activity>(
        "INSERT INTO activities (user_id, activity_type_id, date, distance, time) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, user_id, activity_type_id, date, distance, time",
    )
    .bind(user_id)
    .bind(activity_type_id)
    .bind(date)
    .bind(distance)
    .bind(time_seconds)
    .fetch_one(pool)
    .await?;
    Ok(activity)
}

/// Delete scoped to the owner; a foreign activity id deletes nothing.
/// Returns whether a row was removed.
pub async fn delete_owned(pool: &PgPool, id: i32, user_id: i32) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM activities WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
