// User account and credential handlers: register, login, profile, password.

use axum::{extract::Extension, http::StatusCode};
use serde_json::{json, Value};

use crate::api::envelope::{ApiResponse, ApiResult};
use crate::api::json::Json;
use crate::api::payload::Payload;
use crate::auth::{generate_jwt, password, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::users;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// POST /api/v1/users - Register a new user and issue a token
pub async fn register(
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = Payload::new(&body);
    payload.require(&["name", "last_name", "mail", "password"])?;
    let name = payload.string("name")?;
    let last_name = payload.string("last_name")?;
    let mail = payload.string("mail")?;
    let plaintext = payload.string("password")?;

    let pool = DatabaseManager::pool().await?;
    if users::find_by_mail(pool, mail).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "User with mail {} already exists",
            mail
        )));
    }

    let hash = password::hash_password(plaintext)?;
    let user = users::insert(pool, name, last_name, mail, &hash).await?;
    let token = generate_jwt(Claims::new(user.id))?;

    tracing::info!(user_id = user.id, "registered new user");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "token": token })),
    ))
}

/// POST /api/v1/login - Authenticate and issue a token.
/// Unknown mail and wrong password yield the identical response so the
/// failure does not reveal which was wrong.
pub async fn login(Json(body): Json<Value>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = Payload::new(&body);
    payload.require(&["mail", "password"])?;
    let mail = payload.string("mail")?;
    let plaintext = payload.string("password")?;

    let pool = DatabaseManager::pool().await?;
    let user = users::find_by_mail(pool, mail)
        .await?
        .ok_or_else(invalid_credentials)?;
    if !password::verify_password(plaintext, &user.password)? {
        return Err(invalid_credentials());
    }

    let token = generate_jwt(Claims::new(user.id))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "token": token })),
    ))
}

/// GET /api/v1/me - Profile of the authenticated user, flat fields
pub async fn me(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = users::find_by_id(pool, auth.user_id)
        .await?
        .ok_or_else(invalid_credentials)?;

    Ok(Json(json!({
        "success": true,
        "name": user.name,
        "last_name": user.last_name,
        "mail": user.mail,
    })))
}

/// PUT /api/v1/update/password - Re-hash and store a new password after
/// verifying the current one
pub async fn update_password(
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    let payload = Payload::new(&body);
    payload.require(&["current_password", "new_password"])?;
    let current = payload.string("current_password")?;
    let new = payload.string("new_password")?;

    let pool = DatabaseManager::pool().await?;
    let user = users::find_by_id(pool, auth.user_id)
        .await?
        .ok_or_else(invalid_credentials)?;
    if !password::verify_password(current, &user.password)? {
        return Err(invalid_credentials());
    }

    let hash = password::hash_password(new)?;
    users::update_password(pool, user.id, &hash).await?;

    Ok(ApiResponse::success(json!({
        "name": user.name,
        "last_name": user.last_name,
        "mail": user.mail,
    })))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials")
}
