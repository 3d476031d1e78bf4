// Activity handlers: list own activities, list sport types, create, delete.

use axum::extract::{Extension, Path, Query};
use serde_json::{json, Value};

use crate::api::envelope::{ApiResponse, ApiResult};
use crate::api::json::Json;
use crate::api::payload::Payload;
use crate::database::manager::DatabaseManager;
use crate::database::models::{Activity, Sport};
use crate::database::{activities, sports};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::shape::{Shape, ShapeParams};

/// GET /api/v1/activities - The caller's own activities, shaped.
/// The user scope is pinned server-side before any request filter applies.
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Value>> {
    let params = ShapeParams::parse::<Activity>(&query)?;
    let pool = DatabaseManager::pool().await?;

    let (items, pagination) = Shape::<Activity>::new(params)
        .scope("activities.user_id", auth.user_id as i64)
        .fetch(pool, "/api/v1/activities")
        .await?;

    let sport_names = sports::name_map(pool).await?;
    let data = items
        .iter()
        .map(|activity| activity_json(activity, sport_names.get(&activity.activity_type_id)))
        .collect();

    Ok(ApiResponse::list(data, pagination))
}

/// GET /api/v1/activities/types - All known sports, shaped
pub async fn list_types(
    Query(query): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Sport>> {
    let params = ShapeParams::parse::<Sport>(&query)?;
    let pool = DatabaseManager::pool().await?;

    let (items, pagination) = Shape::<Sport>::new(params)
        .fetch(pool, "/api/v1/activities/types")
        .await?;

    Ok(ApiResponse::list(items, pagination))
}

/// POST /api/v1/activities - Create an activity for the caller
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    let payload = Payload::new(&body);
    payload.require(&["activity_name", "date", "distance", "time"])?;
    let activity_name = payload.string("activity_name")?;
    let date = payload.date("date")?;
    let distance = payload.number("distance")?;
    let time_raw = payload.string("time")?;

    // An unparseable time records zero seconds; clients depend on this
    let time_seconds = parse_elapsed(time_raw).unwrap_or(0);

    let pool = DatabaseManager::pool().await?;
    let sport = sports::find_by_name(pool, activity_name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Sport {} not found", activity_name)))?;

    let activity =
        activities::insert(pool, auth.user_id, sport.id, date, distance, time_seconds).await?;

    tracing::info!(user_id = auth.user_id, activity_id = activity.id, "created activity");
    Ok(ApiResponse::created(activity_json(
        &activity,
        Some(&sport.name),
    )))
}

/// DELETE /api/v1/activities/:id - Delete one of the caller's activities.
/// The lookup is scoped to the owner, so someone else's activity id looks
/// exactly like a missing one.
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(activity_id): Path<i32>,
) -> ApiResult<String> {
    let pool = DatabaseManager::pool().await?;
    let deleted = activities::delete_owned(pool, activity_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!(
            "Activity with id {} not found",
            activity_id
        )));
    }

    Ok(ApiResponse::success(format!(
        "Activity with id {} has been deleted",
        activity_id
    )))
}

/// Wire representation of an activity: elapsed seconds rendered as a clock
/// string, sport id resolved to its display name
fn activity_json(activity: &Activity, activity_name: Option<&String>) -> Value {
    json!({
        "id": activity.id,
        "user_id": activity.user_id,
        "activity_type_id": activity.activity_type_id,
        "date": activity.date,
        "distance": activity.distance,
        "time": format_elapsed(activity.time),
        "activity_name": activity_name,
    })
}

/// `HH:MM:SS` -> total seconds
fn parse_elapsed(raw: &str) -> Option<i32> {
    let mut parts = raw.split(':');
    let hours: i32 = parts.next()?.parse().ok()?;
    let minutes: i32 = parts.next()?.parse().ok()?;
    let seconds: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Total seconds -> `H:MM:SS` with unpadded hours
fn format_elapsed(total_seconds: i32) -> String {
    let total = total_seconds.max(0);
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
