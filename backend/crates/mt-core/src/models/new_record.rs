use crate::{CoreError, CoreResult, normalize_car_identifier};

use std::panic::Location;

use chrono::NaiveDate;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields an administrator supplies when creating a record.
///
/// Identity, status and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub car_identifier: String,
    pub date: String,
    pub record_type: String,
    pub description: String,
}

impl NewRecord {
    /// Normalize and validate raw form input.
    ///
    /// Car identifier, date and type are required; description may be empty.
    #[track_caller]
    pub fn parse(
        car_identifier: &str,
        date: &str,
        record_type: &str,
        description: &str,
    ) -> CoreResult<Self> {
        let car_identifier = normalize_car_identifier(car_identifier);
        let date = date.trim();
        let record_type = record_type.trim();

        for (field, value) in [
            ("car_identifier", car_identifier.as_str()),
            ("date", date),
            ("record_type", record_type),
        ] {
            if value.is_empty() {
                return Err(CoreError::Validation {
                    message: format!("{field} is required"),
                    field: Some(field.to_string()),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            return Err(CoreError::InvalidDate {
                value: date.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            car_identifier,
            date: date.to_string(),
            record_type: record_type.to_string(),
            description: description.trim().to_string(),
        })
    }
}
