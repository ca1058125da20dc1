//! Notification side-channel with per-message auto-dismiss.
//!
//! Every emitted message gets its own one-shot dismiss task. These tasks are a
//! separate timer source from the sweep loop and stop as soon as the session's
//! shutdown flag is raised.

use std::sync::Arc;
use std::time::Duration;

use lapse_core::{Clock, Notification, NotificationCenter};
use tokio::sync::{watch, Mutex};

#[derive(Clone)]
pub struct Notifier {
    center: Arc<Mutex<NotificationCenter>>,
    clock: Arc<dyn Clock>,
    dismiss_after: Duration,
    shutdown: watch::Receiver<bool>,
}

impl Notifier {
    pub fn new(clock: Arc<dyn Clock>, dismiss_after: Duration, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            center: Arc::new(Mutex::new(NotificationCenter::new())),
            clock,
            dismiss_after,
            shutdown,
        }
    }

    /// Record `message` and schedule its removal after the dismiss delay.
    pub async fn emit(&self, message: impl Into<String>) -> Notification {
        let notification = self.center.lock().await.push(message, self.clock.now());
        tracing::debug!("Notification {}: {}", notification.id, notification.message);

        let center = self.center.clone();
        let mut shutdown = self.shutdown.clone();
        let id = notification.id;
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    center.lock().await.dismiss(id);
                }
                // wait_for returns at once if shutdown was raised before this task ran
                _ = async { let _ = shutdown.wait_for(|stop| *stop).await; } => {}
            }
        });

        notification
    }

    /// Outstanding notifications, newest first.
    pub async fn outstanding(&self) -> Vec<Notification> {
        self.center.lock().await.outstanding().to_vec()
    }

    pub async fn clear(&self) {
        self.center.lock().await.clear();
    }
}
