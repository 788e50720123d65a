//! Transient notifications.
//!
//! At most one notification is visible. A new one replaces the current one
//! immediately, and each carries its own dismiss timer that only clears the
//! notification it was started for.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, error, info, warn};
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone)]
pub struct Notifier {
    current_tx: Arc<watch::Sender<Option<Notification>>>,
    next_id: Arc<AtomicU64>,
    timeout: Duration,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        let (current_tx, _) = watch::channel(None);
        Self {
            current_tx: Arc::new(current_tx),
            next_id: Arc::new(AtomicU64::new(1)),
            timeout,
        }
    }

    /// Show `message`, replacing whatever is visible, and schedule its dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message = message.into();

        match severity {
            Severity::Error => error!("Notify #{id}: {message}"),
            Severity::Warning => warn!("Notify #{id}: {message}"),
            Severity::Info | Severity::Success => info!("Notify #{id}: {message}"),
        }

        self.current_tx.send_replace(Some(Notification {
            id,
            message,
            severity,
        }));

        let current_tx = Arc::clone(&self.current_tx);
        let timeout = self.timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            current_tx.send_if_modified(|current| match current {
                Some(shown) if shown.id == id => {
                    debug!("Dismissing notification #{id}");
                    *current = None;
                    true
                }
                _ => false,
            });
        });

        id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Success)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Warning)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Error)
    }

    /// The notification currently visible, if any.
    pub fn current(&self) -> Option<Notification> {
        self.current_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.current_tx.subscribe()
    }
}
