//! SQLite adapter for the `lrb-core` UserStore port (sqlx).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, SqlitePool,
};

use lrb_core::{
    domain::UserId,
    errors::Error,
    store::{Registration, UserStore, DEFAULT_MODEL},
    Result,
};

/// One row of the `users` table.
#[derive(Clone, Debug, FromRow)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub model_name: String,
    pub registration_date: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Open (creating if missing) the database and ensure the schema exists.
    ///
    /// Called once at startup; an unreachable database is a fatal error.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = database_url
            .parse::<SqliteConnectOptions>()
            .map_err(|e| Error::Storage(format!("invalid database url: {e}")))?
            .create_if_missing(true);

        // Single long-lived connection; per-user writes are serialized by
        // the caller.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("connect failed: {e}")))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                user_id           INTEGER PRIMARY KEY,
                username          TEXT,
                model_name        TEXT NOT NULL DEFAULT 'chatgpt-4o-latest',
                registration_date TEXT NOT NULL,
                last_active       TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(())
    }

    /// Fetch the full record for a user, if any.
    pub async fn fetch(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn register(&self, user_id: UserId, username: Option<&str>) -> Result<Registration> {
        let now = Utc::now();

        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO users
                 (user_id, username, model_name, registration_date, last_active)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id.0)
        .bind(username)
        .bind(DEFAULT_MODEL)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        if inserted.rows_affected() == 1 {
            return Ok(Registration::Fresh);
        }

        // Existing record: refresh only the activity timestamp and the
        // username snapshot. model_name and registration_date stay put.
        sqlx::query("UPDATE users SET username = ?, last_active = ? WHERE user_id = ?")
            .bind(username)
            .bind(now)
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(Registration::Returning)
    }

    async fn get_model(&self, user_id: UserId) -> String {
        let row = sqlx::query_as::<_, (String,)>("SELECT model_name FROM users WHERE user_id = ?")
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await;

        match row {
            Ok(Some((model,))) => model,
            Ok(None) => DEFAULT_MODEL.to_string(),
            Err(e) => {
                tracing::warn!(user_id = user_id.0, error = %e, "model lookup failed; using default");
                DEFAULT_MODEL.to_string()
            }
        }
    }
}

fn storage_err(e: sqlx::Error) -> Error {
    Error::Storage(e.to_string())
}
