use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Config error: {0}")]
    Config(#[from] mt_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] mt_db::DbError),

    #[error("Application error: {0}")]
    App(#[from] mt_app::AppError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line the user typed could not be understood
    #[error("{message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },
}

impl ConsoleError {
    #[track_caller]
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
