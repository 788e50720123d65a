use crate::repositories::{parse_id, parse_timestamp};
use crate::Result as DbErrorResult;

use mt_core::UserProfile;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "mt_profiles";

pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert, or replace every field of an existing profile with the same id.
    pub async fn upsert(&self, profile: &UserProfile) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO mt_profiles (
                    identity_id, email, car_identifier, is_recovered, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT (identity_id) DO UPDATE SET
                    email = excluded.email,
                    car_identifier = excluded.car_identifier,
                    is_recovered = excluded.is_recovered,
                    created_at = excluded.created_at,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(profile.identity_id.to_string())
        .bind(&profile.email)
        .bind(&profile.car_identifier)
        .bind(profile.is_recovered)
        .bind(profile.created_at.timestamp_millis())
        .bind(profile.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_identity(&self, identity_id: Uuid) -> DbErrorResult<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
                SELECT identity_id, email, car_identifier, is_recovered, created_at, updated_at
                FROM mt_profiles
                WHERE identity_id = ?
            "#,
        )
        .bind(identity_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_profile).transpose()
    }

    /// Returns false when no profile has this id.
    pub async fn update_car_identifier(
        &self,
        identity_id: Uuid,
        car_identifier: &str,
        updated_at: DateTime<Utc>,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE mt_profiles
                SET car_identifier = ?, updated_at = ?
                WHERE identity_id = ?
            "#,
        )
        .bind(car_identifier)
        .bind(updated_at.timestamp_millis())
        .bind(identity_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_profile(r: &SqliteRow) -> DbErrorResult<UserProfile> {
    let identity_id: String = r.try_get("identity_id")?;
    Ok(UserProfile {
        identity_id: parse_id(TABLE, "identity_id", &identity_id)?,
        email: r.try_get("email")?,
        car_identifier: r.try_get("car_identifier")?,
        is_recovered: r.try_get("is_recovered")?,
        created_at: parse_timestamp(TABLE, "created_at", r.try_get("created_at")?)?,
        updated_at: parse_timestamp(TABLE, "updated_at", r.try_get("updated_at")?)?,
    })
}
