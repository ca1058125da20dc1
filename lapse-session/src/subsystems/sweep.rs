//! Expiry sweep loop
//!
//! Runs every `sweep.interval_ms` (1s by default) for the lifetime of a session.
//! Each tick:
//! - removes unsaved notes whose expiry is at or before the clock's now
//! - emits "{n} note(s) expired" when anything was removed
//! - publishes the active count on a watch channel
//!
//! Ticks missed under load are skipped, not replayed; the sweep predicate only
//! depends on current time so nothing is lost.

use std::sync::Arc;

use lapse_core::config::SweepConfig;
use lapse_core::notify::messages;
use lapse_core::{Clock, NoteStore, SweepReport};
use tokio::sync::{watch, Mutex};

use super::notifier::Notifier;

// ============================================================================
// PUBLIC API
// ============================================================================

/// One sweep pass under the store lock, followed by the expiry notification
/// and the active-count update.
pub async fn sweep_once(
    store: &Mutex<NoteStore>,
    clock: &dyn Clock,
    notifier: &Notifier,
    active_tx: &watch::Sender<usize>,
) -> SweepReport {
    let report = {
        let mut store = store.lock().await;
        store.sweep(clock.now())
    };

    if report.removed > 0 {
        tracing::info!(
            "Sweep removed {} expired note(s), {} active",
            report.removed,
            report.active
        );
        notifier.emit(messages::expired(report.removed)).await;
    }
    active_tx.send_replace(report.active);

    report
}

/// Called from `Session::start`; returns once the shutdown flag is raised.
pub async fn run_sweep_loop(
    store: Arc<Mutex<NoteStore>>,
    clock: Arc<dyn Clock>,
    notifier: Notifier,
    config: SweepConfig,
    active_tx: Arc<watch::Sender<usize>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(config.interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!("Sweep loop started (interval: {}ms)", config.interval_ms);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sweep_once(&store, clock.as_ref(), &notifier, &active_tx).await;
            }
            // the watch::Ref is dropped inside the branch so the loop stays Send
            _ = async { let _ = shutdown.wait_for(|stop| *stop).await; } => {
                tracing::info!("Sweep loop shutting down");
                break;
            }
        }
    }
}
