//! Snapshot of what the user sees, rebuilt after every state change.

use crate::Command;

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Auth(AuthView),
    Dashboard(DashboardView),
}

impl View {
    pub fn as_dashboard(&self) -> Option<&DashboardView> {
        match self {
            Self::Dashboard(dashboard) => Some(dashboard),
            Self::Auth(_) => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl Default for View {
    fn default() -> Self {
        Self::Auth(AuthView::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuthView {
    pub mode: AuthMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub email: String,
    pub car_identifier: String,
    pub is_admin: bool,
    pub search_text: String,
    /// Only administrators may add records
    pub show_add_button: bool,
    /// A list load is in flight
    pub loading: bool,
    pub cards: Vec<RecordCard>,
    /// Shown instead of cards when the list is empty
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordCard {
    pub id: Uuid,
    pub type_icon: String,
    pub title: String,
    pub description: String,
    pub status: StatusBadge,
    pub date: String,
    pub car_identifier: String,
    /// Creator, shown to administrators only
    pub admin_email: Option<String>,
    pub actions: Vec<CardAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub icon: String,
    pub label: String,
    pub status: mt_core::RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardAction {
    pub label: String,
    pub command: Command,
}
