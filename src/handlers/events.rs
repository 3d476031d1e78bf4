// Event handlers: list joined events, list all events, join, leave.

use axum::extract::{Extension, Path, Query};

use crate::api::envelope::{ApiResponse, ApiResult};
use crate::database::events;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Event;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::shape::{Shape, ShapeParams};

const PARTICIPATION_JOIN: &str =
    "INNER JOIN \"participation\" ON \"participation\".\"event_id\" = \"events\".\"id\"";

/// GET /api/v1/events - Events the caller participates in, shaped
pub async fn list_mine(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Event>> {
    let params = ShapeParams::parse::<Event>(&query)?;
    let pool = DatabaseManager::pool().await?;

    let (items, pagination) = Shape::<Event>::new(params)
        .join(PARTICIPATION_JOIN)
        .scope("participation.user_id", auth.user_id as i64)
        .fetch(pool, "/api/v1/events")
        .await?;

    Ok(ApiResponse::list(items, pagination))
}

/// GET /api/v1/all_events - Every event, shaped
pub async fn list_all(Query(query): Query<Vec<(String, String)>>) -> ApiResult<Vec<Event>> {
    let params = ShapeParams::parse::<Event>(&query)?;
    let pool = DatabaseManager::pool().await?;

    let (items, pagination) = Shape::<Event>::new(params)
        .fetch(pool, "/api/v1/all_events")
        .await?;

    Ok(ApiResponse::list(items, pagination))
}

/// GET /api/v1/join_event/:id - Sign the caller up for an open event.
/// The existence check and insert share one transaction; the unique
/// participation constraint backs the remaining race window.
pub async fn join(
    Extension(auth): Extension<AuthUser>,
    Path(event_id): Path<i32>,
) -> ApiResult<String> {
    let pool = DatabaseManager::pool().await?;
    let event = find_event(pool, event_id).await?;

    if !event.is_registration_open() {
        return Err(ApiError::forbidden(format!(
            "Joining for this event ({}) is currently unavailable.",
            event.name
        )));
    }

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;
    if events::is_participating(&mut tx, auth.user_id, event_id).await? {
        return Err(ApiError::conflict(format!(
            "You are already signed up for this event ({}).",
            event.name
        )));
    }
    events::add_participation(&mut tx, auth.user_id, event_id).await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    tracing::info!(user_id = auth.user_id, event_id, "joined event");
    Ok(ApiResponse::success(format!(
        "Congratulations. You signed up for event: {}",
        event.name
    )))
}

/// GET /api/v1/leave_event/:id - Sign the caller out of an event.
/// Not participating wins over a closed status: the caller learns they were
/// never signed up before they learn the event is closed.
pub async fn leave(
    Extension(auth): Extension<AuthUser>,
    Path(event_id): Path<i32>,
) -> ApiResult<String> {
    let pool = DatabaseManager::pool().await?;
    let event = find_event(pool, event_id).await?;

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;
    if !events::is_participating(&mut tx, auth.user_id, event_id).await? {
        return Err(ApiError::conflict(format!(
            "You are not participating in this event ({}).",
            event.name
        )));
    }
    if !event.is_registration_open() {
        return Err(ApiError::forbidden(format!(
            "It is no longer possible to leave an event ({}) at this time.",
            event.name
        )));
    }
    events::remove_participation(&mut tx, auth.user_id, event_id).await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    tracing::info!(user_id = auth.user_id, event_id, "left event");
    Ok(ApiResponse::success(format!(
        "You have been signed out of the event ({})",
        event.name
    )))
}

async fn find_event(pool: &sqlx::PgPool, event_id: i32) -> Result<Event, ApiError> {
    events::find_by_id(pool, event_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Event with id {} not found", event_id)))
}
