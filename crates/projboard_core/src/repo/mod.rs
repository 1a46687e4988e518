//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the `project` table.
//! - Isolate SQL query details from store/live-query orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic results (`Option`, matched-row flags)
//!   in addition to DB transport errors.
//! - Row parsing rejects corrupt persisted state instead of masking it.

pub mod project_repo;
