use crate::RecordStatus;

use std::str::FromStr;

#[test]
fn test_record_status_as_str() {
    assert_eq!(RecordStatus::Pending.as_str(), "pending");
    assert_eq!(RecordStatus::InProgress.as_str(), "in-progress");
    assert_eq!(RecordStatus::Approved.as_str(), "approved");
    assert_eq!(RecordStatus::Rejected.as_str(), "rejected");
    assert_eq!(RecordStatus::Completed.as_str(), "completed");
}

#[test]
fn test_record_status_from_str_accepts_every_stored_value() {
    for status in RecordStatus::ALL {
        assert_eq!(RecordStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(RecordStatus::from_str("in_progress").is_err());
    assert!(RecordStatus::from_str("Approved").is_err());
}

#[test]
fn test_record_status_default_is_pending() {
    assert_eq!(RecordStatus::default(), RecordStatus::Pending);
    assert!(RecordStatus::default().is_pending());
    assert!(!RecordStatus::Approved.is_pending());
}

#[test]
fn test_record_status_display_matches_stored_value() {
    assert_eq!(RecordStatus::InProgress.to_string(), "in-progress");
}
