pub mod admin;
pub mod command;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod messages;
pub mod notifier;
pub mod records;
pub mod render;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;

pub use admin::AdminAllowList;
pub use command::Command;
pub use controller::{Controller, ControllerConfig, ControllerHandle};
pub use debounce::Debouncer;
pub use error::{AppError, Result};
pub use notifier::{Notification, Notifier, Severity};
pub use records::RecordService;
pub use session::{CurrentProfile, SessionManager, SessionState};
pub use view::{AuthMode, AuthView, CardAction, DashboardView, RecordCard, StatusBadge, View};
