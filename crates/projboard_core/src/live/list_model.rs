//! Observable project list with switchable ordering.
//!
//! The UI-facing shape of the live-query layer: holds the latest ordered
//! snapshot and swaps the underlying subscription whenever the ordering
//! changes.

use crate::live::query::{observe_projects, Subscription};
use crate::model::project::{Project, ProjectOrdering};
use crate::store::{ProjectStore, StoreResult};
use log::error;
use std::sync::{Arc, Mutex, PoisonError};

/// A live, ordered view of all projects.
///
/// `observe` starts delivery into an internal snapshot; `set_ordering`
/// cancels the current subscription before starting the replacement, so a
/// result computed under the previous ordering is never published after
/// the switch. Read errors are logged and the subscription stays alive.
pub struct ProjectList {
    store: Arc<ProjectStore>,
    ordering: ProjectOrdering,
    projects: Arc<Mutex<Vec<Project>>>,
    subscription: Option<Subscription>,
}

impl ProjectList {
    /// Creates an idle list model; call `observe` to start delivery.
    pub fn new(store: Arc<ProjectStore>) -> Self {
        Self {
            store,
            ordering: ProjectOrdering::default(),
            projects: Arc::new(Mutex::new(Vec::new())),
            subscription: None,
        }
    }

    /// Starts (or restarts) observation with the current ordering.
    pub fn observe(&mut self) {
        self.resubscribe();
    }

    pub fn ordering(&self) -> ProjectOrdering {
        self.ordering
    }

    /// Switches the active ordering.
    ///
    /// When observation is running, the old subscription is cancelled
    /// first and a fresh one started under the new mode.
    pub fn set_ordering(&mut self, ordering: ProjectOrdering) {
        self.ordering = ordering;
        if self.subscription.is_some() {
            self.resubscribe();
        }
    }

    /// Returns the latest delivered snapshot.
    pub fn projects(&self) -> Vec<Project> {
        self.projects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stops observation; the snapshot keeps its last delivered value.
    pub fn cancel(&mut self) {
        self.subscription = None;
    }

    /// Deletes every project through the store's write path.
    pub fn delete_all(&self) -> StoreResult<usize> {
        self.store.delete_all()
    }

    fn resubscribe(&mut self) {
        // Dropping the old subscription blocks until its in-flight
        // delivery (if any) completes, which keeps orderings from ever
        // interleaving on the snapshot.
        self.subscription = None;

        let snapshot = Arc::clone(&self.projects);
        let subscription = observe_projects(
            Arc::clone(&self.store),
            self.ordering,
            move |projects| {
                *snapshot.lock().unwrap_or_else(PoisonError::into_inner) = projects;
            },
            |err| {
                error!("event=project_list_read module=live status=error error={err}");
            },
        );
        self.subscription = Some(subscription);
    }
}
