#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use mt_core::{MaintenanceRecord, RecordStatus, UserProfile};
use uuid::Uuid;

/// Creates a pending record with sensible defaults
pub fn create_test_record(car_identifier: &str, admin_email: &str) -> MaintenanceRecord {
    let now = Utc::now();
    MaintenanceRecord {
        id: Uuid::new_v4(),
        car_identifier: car_identifier.to_string(),
        date: "2024-01-10".to_string(),
        record_type: "엔진오일교체".to_string(),
        description: "Test description".to_string(),
        status: RecordStatus::Pending,
        admin_email: admin_email.to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Same as [`create_test_record`] but created `minutes_ago` before `base`
pub fn create_test_record_at(
    car_identifier: &str,
    admin_email: &str,
    base: DateTime<Utc>,
    minutes_ago: i64,
) -> MaintenanceRecord {
    let mut record = create_test_record(car_identifier, admin_email);
    record.created_at = base - Duration::minutes(minutes_ago);
    record.updated_at = record.created_at;
    record
}

pub fn create_test_profile(email: &str, car_identifier: &str) -> UserProfile {
    UserProfile::new(
        Uuid::new_v4(),
        email.to_string(),
        car_identifier.to_string(),
    )
}
