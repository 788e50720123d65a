use crate::repositories::{parse_id, parse_timestamp};
use crate::{DbError, RecordScope, Result as DbErrorResult};

use mt_core::{MaintenanceRecord, RecordStatus};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "mt_maintenance_records";

const SELECT_COLUMNS: &str = r#"
    SELECT id, car_identifier, date, record_type, description, status,
           admin_email, created_at, updated_at
    FROM mt_maintenance_records
"#;

// rowid breaks ties between records created in the same millisecond
const ORDER_NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";

pub struct RecordRepository {
    pool: SqlitePool,
}

impl RecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &MaintenanceRecord) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO mt_maintenance_records (
                    id, car_identifier, date, record_type, description, status,
                    admin_email, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.car_identifier)
        .bind(&record.date)
        .bind(&record.record_type)
        .bind(&record.description)
        .bind(record.status.as_str())
        .bind(&record.admin_email)
        .bind(record.created_at.timestamp_millis())
        .bind(record.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<MaintenanceRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_record).transpose()
    }

    /// Records in `scope`, newest first.
    pub async fn find_by_scope(&self, scope: &RecordScope) -> DbErrorResult<Vec<MaintenanceRecord>> {
        let rows = match scope {
            RecordScope::CreatedBy(admin_email) => {
                let sql = format!("{SELECT_COLUMNS} WHERE admin_email = ? {ORDER_NEWEST_FIRST}");
                sqlx::query(&sql)
                    .bind(admin_email)
                    .fetch_all(&self.pool)
                    .await?
            }
            RecordScope::Car(car_identifier) => {
                let sql = format!("{SELECT_COLUMNS} WHERE car_identifier = ? {ORDER_NEWEST_FIRST}");
                sqlx::query(&sql)
                    .bind(car_identifier)
                    .fetch_all(&self.pool)
                    .await?
            }
            RecordScope::All => {
                let sql = format!("{SELECT_COLUMNS} {ORDER_NEWEST_FIRST}");
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };

        rows.iter().map(map_record).collect()
    }

    /// Returns false when no record has this id.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RecordStatus,
        updated_at: DateTime<Utc>,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE mt_maintenance_records
                SET status = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(updated_at.timestamp_millis())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_record(r: &SqliteRow) -> DbErrorResult<MaintenanceRecord> {
    let id: String = r.try_get("id")?;
    let status: String = r.try_get("status")?;
    Ok(MaintenanceRecord {
        id: parse_id(TABLE, "id", &id)?,
        car_identifier: r.try_get("car_identifier")?,
        date: r.try_get("date")?,
        record_type: r.try_get("record_type")?,
        description: r.try_get("description")?,
        status: RecordStatus::from_str(&status).map_err(|e| {
            DbError::corrupt(TABLE, format!("Invalid RecordStatus in status: {}", e))
        })?,
        admin_email: r.try_get("admin_email")?,
        created_at: parse_timestamp(TABLE, "created_at", r.try_get("created_at")?)?,
        updated_at: parse_timestamp(TABLE, "updated_at", r.try_get("updated_at")?)?,
    })
}
