use mt_app::{
    AdminAllowList, Controller, ControllerConfig, ControllerHandle, Notification, View,
};
use mt_db::SqliteDirectory;

use std::sync::Arc;
use std::time::Duration;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const OWNER_EMAIL: &str = "owner@example.com";
pub const PASSWORD: &str = "secret123";

const WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Controller over a fresh in-memory SQLite directory with one configured admin.
pub async fn start_controller() -> (Arc<SqliteDirectory>, ControllerHandle) {
    let directory = Arc::new(
        SqliteDirectory::in_memory()
            .await
            .expect("Failed to open in-memory directory"),
    );
    let config = ControllerConfig {
        admins: AdminAllowList::new([ADMIN_EMAIL]),
        search_debounce: Duration::from_millis(50),
        ..ControllerConfig::default()
    };
    let handle = Controller::spawn(directory.clone(), config);
    (directory, handle)
}

pub async fn wait_for_view(handle: &ControllerHandle, predicate: impl Fn(&View) -> bool) -> View {
    let mut views = handle.views();
    tokio::time::timeout(WAIT_TIMEOUT, async {
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

pub async fn wait_for_notification(
    handle: &ControllerHandle,
    predicate: impl Fn(&Notification) -> bool,
) -> Notification {
    let mut notifications = handle.notifications();
    tokio::time::timeout(WAIT_TIMEOUT, async {
        loop {
            {
                let current = notifications.borrow_and_update();
                if let Some(notification) = current.as_ref()
                    && predicate(notification)
                {
                    return notification.clone();
                }
            }
            notifications.changed().await.expect("notifier dropped");
        }
    })
    .await
    .expect("timed out waiting for notification")
}

pub fn is_settled_dashboard(view: &View) -> bool {
    view.as_dashboard().is_some_and(|d| !d.loading)
}
