//! Session handling: registration, login, logout and resolving the
//! signed-in identity to a profile.
//!
//! [`SessionState`] is owned by the controller task and written only by
//! [`SessionManager::on_auth_change`].

use crate::{AdminAllowList, AppError, Notifier, Result as AppErrorResult, messages};

use mt_core::{ErrorLocation, Identity, UserProfile, normalize_car_identifier, normalize_email};
use mt_db::Directory;

use std::panic::Location;
use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::Serialize;
use uuid::Uuid;

/// The resolved profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentProfile {
    pub identity_id: Uuid,
    pub email: String,
    pub car_identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub profile: Option<CurrentProfile>,
    pub is_admin: bool,
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        self.profile.is_some()
    }

    pub fn clear(&mut self) {
        self.profile = None;
        self.is_admin = false;
    }
}

/// What a session change resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn,
    SignedOut,
    /// Profile could not be resolved; a sign-out was requested
    ForcedSignOut,
}

pub struct SessionManager {
    directory: Arc<dyn Directory>,
    admins: AdminAllowList,
    notifier: Notifier,
}

impl SessionManager {
    pub fn new(directory: Arc<dyn Directory>, admins: AdminAllowList, notifier: Notifier) -> Self {
        Self {
            directory,
            admins,
            notifier,
        }
    }

    /// Apply a session change reported by the directory.
    pub async fn on_auth_change(
        &self,
        state: &mut SessionState,
        identity: Option<Identity>,
    ) -> AuthOutcome {
        let Some(identity) = identity else {
            if state.is_signed_in() {
                info!("Session ended");
            }
            state.clear();
            return AuthOutcome::SignedOut;
        };

        match self.resolve_profile(&identity).await {
            Ok(profile) => {
                state.is_admin = self.admins.is_admin(&profile.email);
                info!(
                    "Session resolved for {} (admin: {})",
                    profile.identity_id, state.is_admin
                );
                state.profile = Some(CurrentProfile {
                    identity_id: profile.identity_id,
                    email: profile.email,
                    car_identifier: profile.car_identifier,
                });
                AuthOutcome::SignedIn
            }
            Err(e) => {
                error!("Failed to resolve profile for {}: {}", identity.id, e);
                state.clear();
                self.notifier.error(messages::PROFILE_LOAD_FAILED);
                if let Err(e) = self.directory.sign_out().await {
                    error!("Forced sign-out failed: {}", e);
                }
                AuthOutcome::ForcedSignOut
            }
        }
    }

    /// Look up the identity's profile, recreating it when missing.
    async fn resolve_profile(&self, identity: &Identity) -> AppErrorResult<UserProfile> {
        if let Some(profile) = self.directory.get_profile(identity.id).await? {
            return Ok(profile);
        }

        warn!(
            "Profile missing for authenticated identity {}, recreating",
            identity.id
        );
        let recovered = UserProfile::recovered(identity);
        self.directory.set_profile(&recovered).await?;
        self.notifier.warning(messages::PROFILE_RECOVERED);

        self.directory
            .get_profile(identity.id)
            .await?
            .ok_or_else(|| AppError::StateInconsistency {
                message: format!("profile {} still missing after recovery", identity.id),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Create an account and its profile, then sign in.
    ///
    /// Empty fields are rejected before the directory is contacted.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        car_identifier: &str,
    ) -> AppErrorResult<Identity> {
        let email = normalize_email(email);
        let car_identifier = normalize_car_identifier(car_identifier);

        if email.is_empty() || password.is_empty() || car_identifier.is_empty() {
            self.notifier.warning(messages::REGISTER_FIELDS_REQUIRED);
            return Err(AppError::validation(messages::REGISTER_FIELDS_REQUIRED, None));
        }

        let result = self.register_remote(&email, password, car_identifier).await;
        match &result {
            Ok(identity) => {
                info!("Registered {}", identity.id);
                self.notifier.success(messages::REGISTER_SUCCESS);
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                self.notifier.error(messages::failure(
                    messages::REGISTER_FAILED,
                    &e.user_message(),
                ));
            }
        }
        result
    }

    async fn register_remote(
        &self,
        email: &str,
        password: &str,
        car_identifier: String,
    ) -> AppErrorResult<Identity> {
        let identity = self.directory.create_account(email, password).await?;

        let profile = UserProfile::new(identity.id, identity.email.clone(), car_identifier);
        self.directory.set_profile(&profile).await?;
        debug!("Profile written for {}", identity.id);

        Ok(self.directory.sign_in(email, password).await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> AppErrorResult<Identity> {
        let email = normalize_email(email);

        if email.is_empty() || password.is_empty() {
            self.notifier.warning(messages::LOGIN_FIELDS_REQUIRED);
            return Err(AppError::validation(messages::LOGIN_FIELDS_REQUIRED, None));
        }

        match self.directory.sign_in(&email, password).await {
            Ok(identity) => {
                self.notifier.success(messages::LOGIN_SUCCESS);
                Ok(identity)
            }
            Err(e) => {
                let error = AppError::from(e);
                warn!("Login failed: {}", error);
                self.notifier.error(messages::failure(
                    messages::LOGIN_FAILED,
                    &error.user_message(),
                ));
                Err(error)
            }
        }
    }

    /// Request sign-out. State is reset when the directory reports the change.
    pub async fn logout(&self) -> AppErrorResult<()> {
        self.directory.sign_out().await.map_err(|e| {
            let error = AppError::from(e);
            self.notifier.error(messages::failure(
                messages::LOGOUT_FAILED,
                &error.user_message(),
            ));
            error
        })
    }
}
