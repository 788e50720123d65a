//! In-memory directory and helpers shared by the unit tests.

use crate::{ControllerHandle, Notification, View};

use mt_core::{Identity, MaintenanceRecord, NewRecord, RecordStatus, UserProfile};
use mt_db::{DbError, Directory, RecordScope, Result as DbErrorResult};

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use tokio::sync::watch;
use uuid::Uuid;

pub const OWNER_EMAIL: &str = "owner@example.com";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "secret123";

#[derive(Default)]
struct Store {
    accounts: HashMap<String, (Identity, String)>,
    profiles: HashMap<Uuid, UserProfile>,
    records: Vec<MaintenanceRecord>,
}

/// A [`Directory`] kept in memory that counts calls and can be told to fail.
pub struct FakeDirectory {
    store: Mutex<Store>,
    session_tx: watch::Sender<Option<Identity>>,
    create_account_calls: AtomicUsize,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
    profile_writes: AtomicUsize,
    query_calls: AtomicUsize,
    fail_get_profile: AtomicBool,
    fail_queries: AtomicBool,
    query_delays: Mutex<VecDeque<Duration>>,
}

impl FakeDirectory {
    pub fn new() -> Arc<Self> {
        let (session_tx, _) = watch::channel(None);
        Arc::new(Self {
            store: Mutex::new(Store::default()),
            session_tx,
            create_account_calls: AtomicUsize::new(0),
            sign_in_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            profile_writes: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
            fail_get_profile: AtomicBool::new(false),
            fail_queries: AtomicBool::new(false),
            query_delays: Mutex::new(VecDeque::new()),
        })
    }

    /// Account without a profile document.
    pub fn seed_account(&self, email: &str, password: &str) -> Identity {
        let identity = Identity {
            id: Uuid::new_v4(),
            email: email.to_string(),
        };
        self.store.lock().unwrap().accounts.insert(
            email.to_string(),
            (identity.clone(), password.to_string()),
        );
        identity
    }

    /// Account plus profile, not signed in.
    pub fn seed_user(&self, email: &str, car_identifier: &str) -> Identity {
        let identity = self.seed_account(email, PASSWORD);
        let profile = UserProfile::new(
            identity.id,
            email.to_string(),
            car_identifier.to_string(),
        );
        self.store
            .lock()
            .unwrap()
            .profiles
            .insert(identity.id, profile);
        identity
    }

    /// Pending record created `minutes_ago` minutes in the past.
    pub fn seed_record(
        &self,
        car_identifier: &str,
        record_type: &str,
        date: &str,
        minutes_ago: i64,
    ) -> MaintenanceRecord {
        let created_at = Utc::now() - ChronoDuration::minutes(minutes_ago);
        let record = MaintenanceRecord {
            id: Uuid::new_v4(),
            car_identifier: car_identifier.to_string(),
            date: date.to_string(),
            record_type: record_type.to_string(),
            description: String::new(),
            status: RecordStatus::Pending,
            admin_email: ADMIN_EMAIL.to_string(),
            created_at,
            updated_at: created_at,
        };
        self.store.lock().unwrap().records.push(record.clone());
        record
    }

    pub fn publish_session(&self, identity: Option<Identity>) {
        self.session_tx.send_replace(identity);
    }

    pub fn profile(&self, identity_id: Uuid) -> Option<UserProfile> {
        self.store
            .lock()
            .unwrap()
            .profiles
            .get(&identity_id)
            .cloned()
    }

    pub fn record(&self, record_id: Uuid) -> Option<MaintenanceRecord> {
        self.store
            .lock()
            .unwrap()
            .records
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
    }

    pub fn record_count(&self) -> usize {
        self.store.lock().unwrap().records.len()
    }

    pub fn create_account_calls(&self) -> usize {
        self.create_account_calls.load(Ordering::SeqCst)
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub fn profile_writes(&self) -> usize {
        self.profile_writes.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn fail_get_profile(&self, fail: bool) {
        self.fail_get_profile.store(fail, Ordering::SeqCst);
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Delay applied to the next query that starts.
    pub fn delay_next_query(&self, delay: Duration) {
        self.query_delays.lock().unwrap().push_back(delay);
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn create_account(&self, email: &str, password: &str) -> DbErrorResult<Identity> {
        self.create_account_calls.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        if store.accounts.contains_key(email) {
            return Err(DbError::EmailInUse {
                location: mt_core::ErrorLocation::from(std::panic::Location::caller()),
            });
        }
        let identity = Identity {
            id: Uuid::new_v4(),
            email: email.to_string(),
        };
        store.accounts.insert(
            email.to_string(),
            (identity.clone(), password.to_string()),
        );
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> DbErrorResult<Identity> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        let identity = {
            let store = self.store.lock().unwrap();
            match store.accounts.get(email) {
                Some((identity, stored)) if stored == password => identity.clone(),
                _ => {
                    return Err(DbError::InvalidCredentials {
                        location: mt_core::ErrorLocation::from(std::panic::Location::caller()),
                    });
                }
            }
        };
        self.session_tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> DbErrorResult<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.session_tx.send_replace(None);
        Ok(())
    }

    fn session(&self) -> watch::Receiver<Option<Identity>> {
        self.session_tx.subscribe()
    }

    async fn get_profile(&self, identity_id: Uuid) -> DbErrorResult<Option<UserProfile>> {
        if self.fail_get_profile.load(Ordering::SeqCst) {
            return Err(DbError::unavailable("profile store offline"));
        }
        Ok(self.profile(identity_id))
    }

    async fn set_profile(&self, profile: &UserProfile) -> DbErrorResult<()> {
        self.profile_writes.fetch_add(1, Ordering::SeqCst);
        self.store
            .lock()
            .unwrap()
            .profiles
            .insert(profile.identity_id, profile.clone());
        Ok(())
    }

    async fn update_profile_car_identifier(
        &self,
        identity_id: Uuid,
        car_identifier: &str,
    ) -> DbErrorResult<()> {
        let mut store = self.store.lock().unwrap();
        let profile = store
            .profiles
            .get_mut(&identity_id)
            .ok_or_else(|| DbError::not_found("profile", identity_id))?;
        profile.car_identifier = car_identifier.to_string();
        profile.updated_at = Utc::now();
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
        self.store.lock().unwrap().records.push(stored.clone());
        Ok(stored)
    }

    async fn update_record_status(
        &self,
        record_id: Uuid,
        status: RecordStatus,
    ) -> DbErrorResult<()> {
        let mut store = self.store.lock().unwrap();
        let record = store
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| DbError::not_found("maintenance record", record_id))?;
        record.status = status;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn query_records(&self, scope: &RecordScope) -> DbErrorResult<Vec<MaintenanceRecord>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.query_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(DbError::unavailable("record store offline"));
        }

        let store = self.store.lock().unwrap();
        let mut records: Vec<MaintenanceRecord> = store
            .records
            .iter()
            .rev()
            .filter(|r| match scope {
                RecordScope::CreatedBy(email) => &r.admin_email == email,
                RecordScope::Car(car) => &r.car_identifier == car,
                RecordScope::All => true,
            })
            .cloned()
            .collect();
        // Stable sort on the reversed list keeps later inserts first on ties
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

/// Wait until the controller publishes a view matching `predicate`.
pub async fn wait_for_view(
    handle: &ControllerHandle,
    predicate: impl Fn(&View) -> bool,
) -> View {
    let mut views = handle.views();
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            {
                let view = views.borrow_and_update();
                if predicate(&view) {
                    return view.clone();
                }
            }
            views.changed().await.expect("controller stopped");
        }
    })
    .await
    .expect("timed out waiting for view")
}

/// Wait until a notification matching `predicate` is visible.
pub async fn wait_for_notification(
    handle: &ControllerHandle,
    predicate: impl Fn(&Notification) -> bool,
) -> Notification {
    let mut notifications = handle.notifications();
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            {
                let current = notifications.borrow_and_update();
                if let Some(notification) = current.as_ref()
                    && predicate(notification)
                {
                    return notification.clone();
                }
            }
            notifications
                .changed()
                .await
                .expect("notifier dropped");
        }
    })
    .await
    .expect("timed out waiting for notification")
}

/// Dashboard with no list load in flight.
pub fn is_settled_dashboard(view: &View) -> bool {
    view.as_dashboard().is_some_and(|d| !d.loading)
}
