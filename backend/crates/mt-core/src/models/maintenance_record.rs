//! Maintenance record document.

use crate::RecordStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A maintenance entry attached to one car identifier.
///
/// `admin_email` and `car_identifier` are fixed at creation; only `status`
/// and `updated_at` change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub car_identifier: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub record_type: String,
    pub description: String,
    pub status: RecordStatus,
    /// Administrator that created the record
    pub admin_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    /// Fields searched by the dashboard filter, in display order.
    pub fn searchable_fields(&self) -> [&str; 4] {
        [
            &self.record_type,
            &self.description,
            &self.car_identifier,
            &self.date,
        ]
    }
}
