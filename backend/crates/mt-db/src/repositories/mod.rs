pub mod account_repository;
pub mod profile_repository;
pub mod record_repository;

use crate::{DbError, Result as DbErrorResult};

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub(crate) fn parse_timestamp(
    table: &'static str,
    column: &str,
    millis: i64,
) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| DbError::corrupt(table, format!("Invalid timestamp in {column}")))
}

pub(crate) fn parse_id(table: &'static str, column: &str, value: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| DbError::corrupt(table, format!("Invalid UUID in {column}: {e}")))
}
