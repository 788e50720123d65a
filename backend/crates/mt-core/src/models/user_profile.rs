//! User profile document - links an identity to a car identifier.

use crate::{Identity, placeholder_car_identifier};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Same id as the owning [`Identity`]
    pub identity_id: Uuid,
    pub email: String,
    pub car_identifier: String,
    /// Set when the profile was regenerated for a session that had none
    pub is_recovered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Profile written by the registration flow. Inputs must already be normalized.
    pub fn new(identity_id: Uuid, email: String, car_identifier: String) -> Self {
        let now = Utc::now();
        Self {
            identity_id,
            email,
            car_identifier,
            is_recovered: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replacement profile for an authenticated identity whose document is
    /// missing. The car identifier is a placeholder taken from the email.
    pub fn recovered(identity: &Identity) -> Self {
        let mut profile = Self::new(
            identity.id,
            identity.email.clone(),
            placeholder_car_identifier(&identity.email),
        );
        profile.is_recovered = true;
        profile
    }
}
