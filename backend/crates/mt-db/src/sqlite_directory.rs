//! SQLite-backed [`Directory`].
//!
//! One instance models one client: it holds a single session whose changes
//! are published on a `watch` channel.

use crate::password::{hash_password, verify_password};
use crate::repositories::account_repository::AccountRecord;
use crate::{
    AccountRepository, DbError, Directory, MIN_PASSWORD_LENGTH, ProfileRepository, RecordScope,
    RecordRepository, Result as DbErrorResult, open_in_memory_pool, open_pool,
};

use mt_core::{ErrorLocation, Identity, MaintenanceRecord, NewRecord, RecordStatus, UserProfile};

use std::panic::Location;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sqlx::SqlitePool;
use tokio::sync::watch;
use uuid::Uuid;

pub struct SqliteDirectory {
    accounts: AccountRepository,
    profiles: ProfileRepository,
    records: RecordRepository,
    session_tx: watch::Sender<Option<Identity>>,
}

impl SqliteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            accounts: AccountRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool.clone()),
            records: RecordRepository::new(pool),
            session_tx,
        }
    }

    pub async fn open(db_path: &Path) -> DbErrorResult<Self> {
        Ok(Self::new(open_pool(db_path).await?))
    }

    pub async fn in_memory() -> DbErrorResult<Self> {
        Ok(Self::new(open_in_memory_pool().await?))
    }

    /// Identity of the current session, if any.
    pub fn current_identity(&self) -> Option<Identity> {
        self.session_tx.borrow().clone()
    }
}

#[async_trait]
impl Directory for SqliteDirectory {
    async fn create_account(&self, email: &str, password: &str) -> DbErrorResult<Identity> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DbError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(DbError::EmailInUse {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let account = AccountRecord {
            identity: Identity {
                id: Uuid::new_v4(),
                email: email.to_string(),
            },
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        self.accounts.create(&account).await?;

        info!("Account created: {}", account.identity.id);
        Ok(account.identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> DbErrorResult<Identity> {
        // Unknown email and wrong password are reported identically
        let account =
            self.accounts
                .find_by_email(email)
                .await?
                .ok_or_else(|| DbError::InvalidCredentials {
                    location: ErrorLocation::from(Location::caller()),
                })?;

        verify_password(password, &account.password_hash)?;

        info!("Signed in: {}", account.identity.id);
        self.session_tx.send_replace(Some(account.identity.clone()));
        Ok(account.identity)
    }

    async fn sign_out(&self) -> DbErrorResult<()> {
        if let Some(identity) = self.session_tx.send_replace(None) {
            info!("Signed out: {}", identity.id);
        }
        Ok(())
    }

    fn session(&self) -> watch::Receiver<Option<Identity>> {
        self.session_tx.subscribe()
    }

    async fn get_profile(&self, identity_id: Uuid) -> DbErrorResult<Option<UserProfile>> {
        self.profiles.find_by_identity(identity_id).await
    }

    async fn set_profile(&self, profile: &UserProfile) -> DbErrorResult<()> {
        debug!(
            "Writing profile {} (recovered: {})",
            profile.identity_id, profile.is_recovered
        );
        self.profiles.upsert(profile).await
    }

    async fn update_profile_car_identifier(
        &self,
        identity_id: Uuid,
        car_identifier: &str,
    ) -> DbErrorResult<()> {
        let updated = self
            .profiles
            .update_car_identifier(identity_id, car_identifier, Utc::now())
            .await?;

        if !updated {
            return Err(DbError::not_found("Profile", identity_id));
        }
        Ok(())
    }

    async fn add_record(
        &self,
        record: &NewRecord,
        admin_email: &str,
    ) -> DbErrorResult<MaintenanceRecord> {
        let now = Utc::now();
        let stored = MaintenanceRecord {
            id: Uuid::new_v4(),
            car_identifier: record.car_identifier.clone(),
            date: record.date.clone(),
            record_type: record.record_type.clone(),
            description: record.description.clone(),
            status: RecordStatus::Pending,
            admin_email: admin_email.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.records.create(&stored).await?;

        debug!("Record {} created for {}", stored.id, stored.car_identifier);
        Ok(stored)
    }

    async fn update_record_status(
        &self,
        record_id: Uuid,
        status: RecordStatus,
    ) -> DbErrorResult<()> {
        let updated = self
            .records
            .update_status(record_id, status, Utc::now())
            .await?;

        if !updated {
            return Err(DbError::not_found("Maintenance record", record_id));
        }
        Ok(())
    }

    async fn query_records(&self, scope: &RecordScope) -> DbErrorResult<Vec<MaintenanceRecord>> {
        self.records.find_by_scope(scope).await
    }
}
