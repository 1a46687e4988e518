//! Live query worker and subscription handle.
//!
//! # Responsibility
//! - Run the initial read and every change-triggered re-read on a
//!   dedicated worker thread.
//! - Enforce the delivery contract: serialized re-reads, coalesced
//!   bursts, strictly no deliveries after cancellation.
//!
//! # Invariants
//! - The change channel is subscribed before the initial read, so a write
//!   racing the initial read still triggers a re-read.
//! - Deliveries happen under the delivery gate; `cancel` acquires the
//!   same gate, so it returns only once any in-flight delivery finished.

use crate::model::project::{Project, ProjectOrdering};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::store::{ProjectStore, StoreError, StoreResult};
use log::error;
use rusqlite::Connection;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Handle for an active live query.
///
/// Dropping the handle cancels the subscription. `cancel` (or drop) blocks
/// until any in-flight delivery has finished; afterwards the subscriber
/// callbacks are guaranteed to never run again. An in-flight re-read is
/// simply discarded.
pub struct Subscription {
    gate: Arc<Mutex<bool>>,
    wake: Sender<()>,
}

impl Subscription {
    /// Cancels the subscription. Equivalent to dropping the handle.
    pub fn cancel(self) {}

    fn shut_down(&self) {
        let mut cancelled = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        *cancelled = true;
        // Wake the worker so it exits instead of blocking on the next
        // change signal.
        let _ = self.wake.send(());
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.shut_down();
    }
}

/// Starts a live query over an arbitrary read operation.
///
/// Delivers the current result once, then a new result after every
/// committed write to the project table, until the returned subscription
/// is cancelled. Consecutive rapid writes may coalesce into a single
/// re-read, but the read following the last write in a burst is never
/// skipped. Read failures go to `on_error` and leave the subscription
/// active.
pub fn observe<T, R, C, E>(store: Arc<ProjectStore>, read: R, on_change: C, on_error: E) -> Subscription
where
    T: Send + 'static,
    R: Fn(&Connection) -> StoreResult<T> + Send + 'static,
    C: FnMut(T) + Send + 'static,
    E: FnMut(StoreError) + Send + 'static,
{
    let (wake, signals) = store.changes().subscribe();
    let gate = Arc::new(Mutex::new(false));

    let worker_gate = Arc::clone(&gate);
    let worker = thread::Builder::new()
        .name("projboard-live-query".to_string())
        .spawn(move || {
            let mut on_change = on_change;
            let mut on_error = on_error;

            loop {
                if *worker_gate.lock().unwrap_or_else(PoisonError::into_inner) {
                    return;
                }

                let result = store.read(|conn| read(conn));

                {
                    let cancelled =
                        worker_gate.lock().unwrap_or_else(PoisonError::into_inner);
                    if *cancelled {
                        return;
                    }
                    match result {
                        Ok(value) => on_change(value),
                        Err(err) => {
                            error!(
                                "event=live_query_read module=live status=error error={err}"
                            );
                            on_error(err);
                        }
                    }
                }

                // Block until the table changes; drain any further queued
                // signals so a burst of writes becomes one re-read.
                if signals.recv().is_err() {
                    return;
                }
                while signals.try_recv().is_ok() {}
            }
        });

    if let Err(err) = worker {
        error!("event=live_query_spawn module=live status=error error={err}");
        *gate.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    Subscription { gate, wake }
}

/// Starts a live query delivering the ordered project list.
pub fn observe_projects<C, E>(
    store: Arc<ProjectStore>,
    ordering: ProjectOrdering,
    on_change: C,
    on_error: E,
) -> Subscription
where
    C: FnMut(Vec<Project>) + Send + 'static,
    E: FnMut(StoreError) + Send + 'static,
{
    observe(
        store,
        move |conn| Ok(SqliteProjectRepository::new(conn).list(ordering)?),
        on_change,
        on_error,
    )
}
