use crate::{AppError, Result as AppErrorResult, SessionState, messages};

use mt_core::{MaintenanceRecord, NewRecord, RecordStatus, SearchQuery, normalize_car_identifier};
use mt_db::{Directory, RecordScope};

use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

/// Maintenance-record operations on top of the directory.
///
/// Callers decide who may create records; this service does not check.
#[derive(Clone)]
pub struct RecordService {
    directory: Arc<dyn Directory>,
}

impl RecordService {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Which records the session may see.
    pub fn scope_for(session: &SessionState) -> RecordScope {
        match &session.profile {
            Some(profile) if session.is_admin => RecordScope::CreatedBy(profile.email.clone()),
            Some(profile) => RecordScope::Car(profile.car_identifier.clone()),
            None => RecordScope::All,
        }
    }

    /// Store a pending record created by `creator_email`.
    pub async fn create(
        &self,
        record: &NewRecord,
        creator_email: &str,
    ) -> AppErrorResult<MaintenanceRecord> {
        let stored = self.directory.add_record(record, creator_email).await?;
        info!("Record {} created by admin", stored.id);
        Ok(stored)
    }

    /// Scoped records, newest first, narrowed by `search_text`.
    pub async fn list(
        &self,
        scope: &RecordScope,
        search_text: &str,
    ) -> AppErrorResult<Vec<MaintenanceRecord>> {
        let records = self.directory.query_records(scope).await?;
        let query = SearchQuery::parse(search_text);
        let fetched = records.len();
        let records = query.filter(records);

        debug!(
            "Listed {} of {} record(s) for {:?} (terms: {:?})",
            records.len(),
            fetched,
            scope,
            query.terms()
        );
        Ok(records)
    }

    /// Set any status; transitions are not validated.
    pub async fn update_status(&self, record_id: Uuid, status: RecordStatus) -> AppErrorResult<()> {
        self.directory
            .update_record_status(record_id, status)
            .await?;
        info!("Record {} status set to {}", record_id, status);
        Ok(())
    }

    /// Persist a new car identifier for the profile and return it normalized.
    ///
    /// Existing records keep the identifier they were created with.
    pub async fn update_owner_car_identifier(
        &self,
        identity_id: Uuid,
        new_car_identifier: &str,
    ) -> AppErrorResult<String> {
        let car_identifier = normalize_car_identifier(new_car_identifier);
        if car_identifier.is_empty() {
            return Err(AppError::validation(
                messages::CAR_IDENTIFIER_REQUIRED,
                Some("car_identifier"),
            ));
        }

        self.directory
            .update_profile_car_identifier(identity_id, &car_identifier)
            .await?;
        info!("Profile {} car identifier updated", identity_id);
        Ok(car_identifier)
    }
}
