//! A signed-in session: the note store plus the timers that act on it.
//!
//! All mutations go through one async mutex, so add/update/delete/toggle and
//! the sweep never interleave. The lock is never held across an await.

use std::sync::Arc;

use lapse_core::notify::messages;
use lapse_core::{
    filter_and_search, sort_notes, Clock, Filter, LapseConfig, Note, NoteId, NoteInput, NoteStore,
    Notification, SortBy, StoreError, SweepReport, User,
};
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::subsystems::notifier::Notifier;
use crate::subsystems::sweep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub saved: usize,
    /// As published by the most recent sweep.
    pub active: usize,
}

pub struct Session {
    user: User,
    store: Arc<Mutex<NoteStore>>,
    clock: Arc<dyn Clock>,
    notifier: Notifier,
    active_tx: Arc<watch::Sender<usize>>,
    shutdown_tx: watch::Sender<bool>,
    sweeper: Option<JoinHandle<()>>,
}

impl Session {
    /// Spawns the sweep loop; must be called from within a tokio runtime.
    pub async fn start(user: User, config: &LapseConfig, clock: Arc<dyn Clock>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (active_tx, _) = watch::channel(0usize);
        let active_tx = Arc::new(active_tx);

        let store = Arc::new(Mutex::new(NoteStore::new(clock.clone())));
        let notifier = Notifier::new(
            clock.clone(),
            config.notifications.dismiss_after(),
            shutdown_rx.clone(),
        );

        let sweeper = tokio::spawn(sweep::run_sweep_loop(
            store.clone(),
            clock.clone(),
            notifier.clone(),
            config.sweep.clone(),
            active_tx.clone(),
            shutdown_rx,
        ));

        tracing::info!("Session started for {}", user.email);
        notifier.emit(messages::welcome(&user.name)).await;

        Self {
            user,
            store,
            clock,
            notifier,
            active_tx,
            shutdown_tx,
            sweeper: Some(sweeper),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub async fn add_note(&self, input: NoteInput) -> Result<Note, StoreError> {
        let result = self.store.lock().await.add_note(input);
        let note = result.inspect_err(|e| warn_rejected("add", e))?;
        self.notifier.emit(messages::CREATED).await;
        Ok(note)
    }

    pub async fn update_note(&self, id: NoteId, input: NoteInput) -> Result<Note, StoreError> {
        let result = self.store.lock().await.update_note(id, input);
        let note = result.inspect_err(|e| warn_rejected("update", e))?;
        self.notifier.emit(messages::UPDATED).await;
        Ok(note)
    }

    pub async fn delete_note(&self, id: NoteId) -> Result<Note, StoreError> {
        let result = self.store.lock().await.delete_note(id);
        let note = result.inspect_err(|e| warn_rejected("delete", e))?;
        self.notifier.emit(messages::DELETED).await;
        Ok(note)
    }

    pub async fn toggle_save(&self, id: NoteId) -> Result<bool, StoreError> {
        let result = self.store.lock().await.toggle_save(id);
        let saved = result.inspect_err(|e| warn_rejected("toggle_save", e))?;
        self.notifier.emit(messages::SAVE_TOGGLED).await;
        Ok(saved)
    }

    /// Run a sweep outside the regular cadence.
    pub async fn sweep_now(&self) -> SweepReport {
        sweep::sweep_once(&self.store, self.clock.as_ref(), &self.notifier, &self.active_tx).await
    }

    /// Filtered, searched and sorted snapshot at the clock's current time.
    pub async fn list(&self, filter: Filter, search: &str, sort_by: SortBy) -> Vec<Note> {
        let now = self.clock.now();
        let store = self.store.lock().await;
        let visible = filter_and_search(store.notes(), filter, search, now);
        sort_notes(visible, sort_by).into_iter().cloned().collect()
    }

    pub async fn get(&self, id: NoteId) -> Option<Note> {
        self.store.lock().await.get(id).cloned()
    }

    pub async fn counts(&self) -> Counts {
        let store = self.store.lock().await;
        Counts {
            total: store.len(),
            saved: store.saved_count(),
            active: *self.active_tx.borrow(),
        }
    }

    /// Receiver for the active count published on every sweep.
    pub fn active_count(&self) -> watch::Receiver<usize> {
        self.active_tx.subscribe()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifier.outstanding().await
    }

    /// Stop the sweep loop and every pending dismiss timer, then drop all
    /// notes and notifications.
    pub async fn logout(mut self) {
        self.shutdown_tx.send_replace(true);
        if let Some(sweeper) = self.sweeper.take() {
            if let Err(e) = sweeper.await {
                tracing::error!("Sweep loop ended abnormally: {}", e);
            }
        }

        self.store.lock().await.clear();
        self.notifier.clear().await;
        tracing::info!("Session ended for {}", self.user.email);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // a session dropped without logout must not leave timers running
        self.shutdown_tx.send_replace(true);
    }
}

fn warn_rejected(op: &str, err: &StoreError) {
    tracing::warn!("{} rejected: {}", op, err);
}
