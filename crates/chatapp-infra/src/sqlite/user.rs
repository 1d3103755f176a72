//! SQLite user repository implementation.

use chatapp_core::repository::user::UserRepository;
use chatapp_types::error::RepositoryError;
use chatapp_types::user::{NewUser, User, UserCredentials};
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let map = |e: sqlx::Error| RepositoryError::Query(e.to_string());
    let created_at: String = row.try_get("created_at").map_err(map)?;
    Ok(User {
        id: row.try_get("id").map_err(map)?,
        username: row.try_get("username").map_err(map)?,
        email: row.try_get("email").map_err(map)?,
        is_active: row.try_get("is_active").map_err(map)?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, email, is_active, created_at) VALUES (?, ?, ?, 1, ?)",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(User {
                id: done.last_insert_rowid(),
                username: user.username.clone(),
                email: user.email.clone(),
                is_active: true,
                created_at,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("username '{}' already exists", user.username)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let password_hash: String = row
                    .try_get("password_hash")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(UserCredentials {
                    user: user_from_row(&row)?,
                    password_hash,
                }))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, username, email, is_active, created_at FROM users ORDER BY username ASC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(user_from_row).collect()
    }
}
