//! The view controller.
//!
//! A single task owns all UI and session state. Front ends send
//! [`Command`]s and watch [`View`] snapshots; directory session changes and
//! completed list loads arrive on the same loop, so state has one writer.
//!
//! List loads run as separate tasks tagged with a generation number. Only
//! the result of the most recent request is applied; anything older is
//! dropped when it arrives.

use crate::render::{RenderContext, render};
use crate::session::AuthOutcome;
use crate::{
    AdminAllowList, AppError, AuthMode, Command, Debouncer, Notification, Notifier,
    RecordService, Result as AppErrorResult, SessionManager, SessionState, View, messages,
};

use mt_config::{Config, DEFAULT_NOTIFICATION_TIMEOUT_MS, DEFAULT_SEARCH_DEBOUNCE_MS};
use mt_core::{ErrorLocation, Identity, MaintenanceRecord, NewRecord, RecordStatus};
use mt_db::Directory;

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

const COMMAND_BUFFER: usize = 64;

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub admins: AdminAllowList,
    pub search_debounce: Duration,
    pub notification_timeout: Duration,
}

impl ControllerConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            admins: AdminAllowList::from_config(&config.admin),
            search_debounce: config.ui.search_debounce(),
            notification_timeout: config.ui.notification_timeout(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            admins: AdminAllowList::default(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            notification_timeout: Duration::from_millis(DEFAULT_NOTIFICATION_TIMEOUT_MS),
        }
    }
}

/// Front-end side of a running controller.
pub struct ControllerHandle {
    commands: mpsc::Sender<Command>,
    views: watch::Receiver<View>,
    notifications: watch::Receiver<Option<Notification>>,
    task: JoinHandle<()>,
}

impl ControllerHandle {
    pub async fn send(&self, command: Command) -> AppErrorResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::ControllerStopped {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub fn views(&self) -> watch::Receiver<View> {
        self.views.clone()
    }

    pub fn current_view(&self) -> View {
        self.views.borrow().clone()
    }

    pub fn notifications(&self) -> watch::Receiver<Option<Notification>> {
        self.notifications.clone()
    }

    pub fn current_notification(&self) -> Option<Notification> {
        self.notifications.borrow().clone()
    }

    /// Stop the controller and wait for its task to finish.
    pub async fn shutdown(self) {
        if self.commands.send(Command::Shutdown).await.is_err() {
            debug!("Controller already stopped");
        }
        if let Err(e) = self.task.await {
            error!("Controller task failed: {}", e);
        }
    }
}

enum Event {
    SearchSettled,
    ListLoaded {
        generation: u64,
        result: AppErrorResult<Vec<MaintenanceRecord>>,
    },
}

pub struct Controller {
    session_manager: SessionManager,
    records: RecordService,
    notifier: Notifier,
    session: SessionState,
    auth_mode: AuthMode,
    search_text: String,
    listed: Vec<MaintenanceRecord>,
    list_generation: u64,
    loading: bool,
    debouncer: Debouncer,
    events_tx: mpsc::UnboundedSender<Event>,
    view_tx: watch::Sender<View>,
}

impl Controller {
    /// Start the controller task. Must be called within a tokio runtime.
    pub fn spawn(directory: Arc<dyn Directory>, config: ControllerConfig) -> ControllerHandle {
        let notifier = Notifier::new(config.notification_timeout);
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, views) = watch::channel(View::default());
        let session_rx = directory.session();
        let notifications = notifier.subscribe();

        let controller = Controller {
            session_manager: SessionManager::new(
                Arc::clone(&directory),
                config.admins,
                notifier.clone(),
            ),
            records: RecordService::new(directory),
            notifier,
            session: SessionState::default(),
            auth_mode: AuthMode::default(),
            search_text: String::new(),
            listed: Vec::new(),
            list_generation: 0,
            loading: false,
            debouncer: Debouncer::new(config.search_debounce),
            events_tx,
            view_tx,
        };

        let task = tokio::spawn(controller.run(commands_rx, events_rx, session_rx));

        ControllerHandle {
            commands: commands_tx,
            views,
            notifications,
            task,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut events: mpsc::UnboundedReceiver<Event>,
        mut session_rx: watch::Receiver<Option<Identity>>,
    ) {
        info!("Controller started");

        // A session may already exist before the controller starts
        let initial = session_rx.borrow_and_update().clone();
        if initial.is_some() {
            self.handle_auth_change(initial).await;
        }
        self.publish();

        let mut session_open = true;
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command).await,
                },
                changed = session_rx.changed(), if session_open => {
                    if changed.is_err() {
                        warn!("Directory session channel closed");
                        session_open = false;
                        continue;
                    }
                    let identity = session_rx.borrow_and_update().clone();
                    self.handle_auth_change(identity).await;
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
            self.publish();
        }

        self.debouncer.cancel();
        info!("Controller stopped");
    }

    async fn handle_auth_change(&mut self, identity: Option<Identity>) {
        let outcome = self
            .session_manager
            .on_auth_change(&mut self.session, identity)
            .await;

        match outcome {
            AuthOutcome::SignedIn => {
                self.search_text.clear();
                self.request_list();
            }
            AuthOutcome::SignedOut | AuthOutcome::ForcedSignOut => self.reset_dashboard(),
        }
    }

    fn reset_dashboard(&mut self) {
        self.debouncer.cancel();
        self.search_text.clear();
        self.listed.clear();
        self.loading = false;
        self.auth_mode = AuthMode::Login;
        // Results of loads started before sign-out must not reappear
        self.list_generation += 1;
    }

    async fn handle_command(&mut self, command: Command) {
        debug!("Command: {}", command.name());

        match command {
            Command::ToggleAuthMode => {
                if !self.session.is_signed_in() {
                    self.auth_mode = self.auth_mode.toggled();
                }
            }
            Command::Register {
                email,
                password,
                car_identifier,
            } => {
                if let Err(e) = self
                    .session_manager
                    .register(&email, &password, &car_identifier)
                    .await
                {
                    debug!("Register rejected: {}", e);
                }
            }
            Command::Login { email, password } => {
                if let Err(e) = self.session_manager.login(&email, &password).await {
                    debug!("Login rejected: {}", e);
                }
            }
            Command::Logout => {
                if let Err(e) = self.session_manager.logout().await {
                    debug!("Logout failed: {}", e);
                }
            }
            Command::SearchInput { text } => self.on_search_input(text),
            Command::CreateRecord {
                car_identifier,
                date,
                record_type,
                description,
            } => {
                self.create_record(&car_identifier, &date, &record_type, &description)
                    .await
            }
            Command::Approve { record_id } => self.decide(record_id, RecordStatus::Approved).await,
            Command::Reject { record_id } => self.decide(record_id, RecordStatus::Rejected).await,
            Command::ChangeCarIdentifier { car_identifier } => {
                self.change_car_identifier(&car_identifier).await
            }
            Command::Refresh => self.request_list(),
            Command::Shutdown => {}
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::SearchSettled => self.request_list(),
            Event::ListLoaded { generation, result } => {
                if generation != self.list_generation {
                    debug!(
                        "Dropping stale list result #{} (latest #{})",
                        generation, self.list_generation
                    );
                    return;
                }

                self.loading = false;
                match result {
                    Ok(records) => self.listed = records,
                    Err(e) => {
                        error!("List load failed: {}", e);
                        self.listed.clear();
                        self.notifier.error(messages::failure(
                            messages::LIST_LOAD_FAILED,
                            &e.user_message(),
                        ));
                    }
                }
            }
        }
    }

    fn on_search_input(&mut self, text: String) {
        if !self.session.is_signed_in() {
            return;
        }

        self.search_text = text;
        let events_tx = self.events_tx.clone();
        self.debouncer.schedule(async move {
            // Controller gone means nothing left to refresh
            let _ = events_tx.send(Event::SearchSettled);
        });
    }

    /// Start a list load for the current scope and search text.
    fn request_list(&mut self) {
        if !self.session.is_signed_in() {
            return;
        }

        self.list_generation += 1;
        self.loading = true;

        let generation = self.list_generation;
        let scope = RecordService::scope_for(&self.session);
        let search_text = self.search_text.clone();
        let records = self.records.clone();
        let events_tx = self.events_tx.clone();

        debug!("List load #{} for {:?}", generation, scope);
        tokio::spawn(async move {
            let result = records.list(&scope, &search_text).await;
            let _ = events_tx.send(Event::ListLoaded { generation, result });
        });
    }

    async fn create_record(
        &mut self,
        car_identifier: &str,
        date: &str,
        record_type: &str,
        description: &str,
    ) {
        let Some(profile) = &self.session.profile else {
            self.notifier.warning(messages::NOT_SIGNED_IN);
            return;
        };
        if !self.session.is_admin {
            self.notifier.warning(messages::ADMIN_ONLY);
            return;
        }

        let draft = match NewRecord::parse(car_identifier, date, record_type, description) {
            Ok(draft) => draft,
            Err(e) => {
                self.notifier.warning(AppError::from(e).user_message());
                return;
            }
        };

        let creator = profile.email.clone();
        match self.records.create(&draft, &creator).await {
            Ok(_) => {
                self.notifier.success(messages::RECORD_CREATED);
                self.request_list();
            }
            Err(e) => {
                error!("Record creation failed: {}", e);
                self.notifier.error(messages::failure(
                    messages::RECORD_CREATE_FAILED,
                    &e.user_message(),
                ));
            }
        }
    }

    /// Owner approves or rejects a record.
    async fn decide(&mut self, record_id: Uuid, status: RecordStatus) {
        if !self.session.is_signed_in() {
            self.notifier.warning(messages::NOT_SIGNED_IN);
            return;
        }
        if self.session.is_admin {
            self.notifier.warning(messages::OWNER_ONLY);
            return;
        }

        match self.records.update_status(record_id, status).await {
            Ok(()) => {
                let message = if status == RecordStatus::Approved {
                    messages::RECORD_APPROVED
                } else {
                    messages::RECORD_REJECTED
                };
                self.notifier.success(message);
                self.request_list();
            }
            Err(e) => {
                error!("Status update for {} failed: {}", record_id, e);
                self.notifier.error(messages::failure(
                    messages::STATUS_UPDATE_FAILED,
                    &e.user_message(),
                ));
            }
        }
    }

    async fn change_car_identifier(&mut self, raw: &str) {
        let Some(identity_id) = self.session.profile.as_ref().map(|p| p.identity_id) else {
            self.notifier.warning(messages::NOT_SIGNED_IN);
            return;
        };

        match self
            .records
            .update_owner_car_identifier(identity_id, raw)
            .await
        {
            Ok(car_identifier) => {
                if let Some(profile) = self.session.profile.as_mut() {
                    profile.car_identifier = car_identifier;
                }
                self.notifier.success(messages::CAR_IDENTIFIER_UPDATED);
                self.request_list();
            }
            Err(e) if e.is_validation() => {
                self.notifier.warning(e.user_message());
            }
            Err(e) => {
                error!("Car identifier update failed: {}", e);
                self.notifier.error(messages::failure(
                    messages::CAR_IDENTIFIER_UPDATE_FAILED,
                    &e.user_message(),
                ));
            }
        }
    }

    fn publish(&self) {
        let next = render(&RenderContext {
            session: &self.session,
            auth_mode: self.auth_mode,
            search_text: &self.search_text,
            records: &self.listed,
            loading: self.loading,
        });

        self.view_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
