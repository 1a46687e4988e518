//! Domain model for the project board.
//!
//! # Responsibility
//! - Define the canonical `Project` record and its ordering modes.
//! - Keep persistence identity rules (`id` lifecycle) in one place.
//!
//! # Invariants
//! - A persisted project is identified by a store-assigned `ProjectId`.
//! - Ordering modes are exclusive; exactly one is active per query.

pub mod project;
