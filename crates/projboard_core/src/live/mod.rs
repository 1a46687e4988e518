//! Live queries: change-tracked reads over the project table.
//!
//! # Responsibility
//! - Fan change notifications out from the store's write path.
//! - Re-run a subscribed read after every committed write, coalescing
//!   bursts, and push each result to the subscriber until cancelled.
//!
//! # Invariants
//! - A subscription never delivers after `cancel` returns.
//! - Re-reads for one subscription never overlap; a burst of writes
//!   collapses into at most one extra re-read after the in-flight one.
//! - A failed re-read is reported to the error handler and does not end
//!   the subscription.

mod list_model;
mod notifier;
mod query;

pub use list_model::ProjectList;
pub(crate) use notifier::ChangeNotifier;
pub use query::{observe, observe_projects, Subscription};
