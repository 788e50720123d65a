use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the user can ask the controller to do.
///
/// Rendered record cards carry these values for their actions, so a front
/// end dispatches exactly what was rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Switch between the login and registration forms
    ToggleAuthMode,
    Register {
        email: String,
        password: String,
        car_identifier: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    /// A keystroke in the search box; `text` is the full box content
    SearchInput { text: String },
    CreateRecord {
        car_identifier: String,
        date: String,
        record_type: String,
        description: String,
    },
    Approve { record_id: Uuid },
    Reject { record_id: Uuid },
    ChangeCarIdentifier { car_identifier: String },
    /// Reload the list immediately
    Refresh,
    Shutdown,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleAuthMode => "toggle_auth_mode",
            Self::Register { .. } => "register",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::SearchInput { .. } => "search_input",
            Self::CreateRecord { .. } => "create_record",
            Self::Approve { .. } => "approve",
            Self::Reject { .. } => "reject",
            Self::ChangeCarIdentifier { .. } => "change_car_identifier",
            Self::Refresh => "refresh",
            Self::Shutdown => "shutdown",
        }
    }
}
