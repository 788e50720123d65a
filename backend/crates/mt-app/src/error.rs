use crate::messages;

use mt_core::{CoreError, ErrorLocation};
use mt_db::DbError;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Empty or malformed input, caught before any directory call
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Any failure reported by the directory
    #[error("Directory error: {source}")]
    Remote {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    /// Authenticated identity without a usable profile
    #[error("Session state inconsistent: {message} {location}")]
    StateInconsistency {
        message: String,
        location: ErrorLocation,
    },

    #[error("Controller has stopped {location}")]
    ControllerStopped { location: ErrorLocation },
}

impl AppError {
    #[track_caller]
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(String::from),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Human-readable reason suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Remote { source, .. } => messages::remote_failure_reason(source).to_string(),
            Self::StateInconsistency { .. } => messages::PROFILE_LOAD_FAILED.to_string(),
            Self::ControllerStopped { .. } => messages::CONTROLLER_STOPPED.to_string(),
        }
    }
}

impl From<DbError> for AppError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Remote {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for AppError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation { field, .. } => Self::Validation {
                message: messages::field_required(field.as_deref()),
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            CoreError::InvalidDate { .. } => Self::Validation {
                message: messages::INVALID_DATE.to_string(),
                field: Some("date".to_string()),
                location: ErrorLocation::from(Location::caller()),
            },
            CoreError::InvalidRecordStatus { value, .. } => Self::Validation {
                message: format!("{}: {}", messages::INVALID_STATUS, value),
                field: Some("status".to_string()),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
