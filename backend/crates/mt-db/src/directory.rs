//! The directory service seen by the application: identity plus the
//! profile and maintenance-record collections.

use crate::Result as DbErrorResult;

use mt_core::{Identity, MaintenanceRecord, NewRecord, RecordStatus, UserProfile};

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

/// Which records a query returns. Every scope is ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordScope {
    /// Records created by this administrator email
    CreatedBy(String),
    /// Records attached to this car identifier
    Car(String),
    /// No filter; only reachable before sign-in
    All,
}

#[async_trait]
pub trait Directory: Send + Sync {
    /// Register a new identity. Does not start a session.
    async fn create_account(&self, email: &str, password: &str) -> DbErrorResult<Identity>;

    /// Start a session; subscribers of [`Directory::session`] observe the identity.
    async fn sign_in(&self, email: &str, password: &str) -> DbErrorResult<Identity>;

    /// End the session; subscribers observe `None`.
    async fn sign_out(&self) -> DbErrorResult<()>;

    /// Current identity, updated on every sign-in and sign-out.
    fn session(&self) -> watch::Receiver<Option<Identity>>;

    async fn get_profile(&self, identity_id: Uuid) -> DbErrorResult<Option<UserProfile>>;

    /// Create or replace the profile document.
    async fn set_profile(&self, profile: &UserProfile) -> DbErrorResult<()>;

    async fn update_profile_car_identifier(
        &self,
        identity_id: Uuid,
        car_identifier: &str,
    ) -> DbErrorResult<()>;

    /// Store a new record; id, status and timestamps are assigned here.
    async fn add_record(
        &self,
        record: &NewRecord,
        admin_email: &str,
    ) -> DbErrorResult<MaintenanceRecord>;

    /// Set status and refresh `updated_at`. No transition rules apply.
    async fn update_record_status(&self, record_id: Uuid, status: RecordStatus)
    -> DbErrorResult<()>;

    /// Records in `scope`, `created_at` descending.
    async fn query_records(&self, scope: &RecordScope) -> DbErrorResult<Vec<MaintenanceRecord>>;
}
