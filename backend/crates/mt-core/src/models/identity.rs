use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated account in the directory.
///
/// Distinct from [`crate::UserProfile`], which is the application document
/// keyed by the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}
