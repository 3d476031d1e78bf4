use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

pub async fn find_by_mail(pool: &PgPool, mail: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, last_name, mail, password FROM users WHERE mail = $1",
    )
    .bind(mail)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, last_name, mail, password FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn insert(
    pool: &PgPool,
    name: &str,
    last_name: &str,
    mail: &str,
    password_hash: &str,
) -> Result<User, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, last_name, mail, password) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, name, last_name, mail, password",
    )
    .bind(name)
    .bind(last_name)
    .bind(mail)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

pub async fn update_password(
    pool: &PgPool,
    id: i32,
    password_hash: &str,
) -> Result<(), DatabaseError> {
    sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
