use crate::repositories::{parse_id, parse_timestamp};
use crate::{DbError, Result as DbErrorResult};

use mt_core::{ErrorLocation, Identity};

use std::panic::Location;

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

const TABLE: &str = "mt_accounts";

/// Stored credentials for one identity.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub identity: Identity,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an account. A duplicate email yields [`DbError::EmailInUse`].
    pub async fn create(&self, account: &AccountRecord) -> DbErrorResult<()> {
        let result = sqlx::query(
            r#"
                INSERT INTO mt_accounts (id, email, password_hash, created_at)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(account.identity.id.to_string())
        .bind(&account.identity.email)
        .bind(&account.password_hash)
        .bind(account.created_at.timestamp_millis())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::EmailInUse {
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<AccountRecord>> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, created_at
                FROM mt_accounts
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| -> DbErrorResult<AccountRecord> {
            let id: String = r.try_get("id")?;
            Ok(AccountRecord {
                identity: Identity {
                    id: parse_id(TABLE, "id", &id)?,
                    email: r.try_get("email")?,
                },
                password_hash: r.try_get("password_hash")?,
                created_at: parse_timestamp(TABLE, "created_at", r.try_get("created_at")?)?,
            })
        })
        .transpose()
    }
}
