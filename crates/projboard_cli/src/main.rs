//! Bootstrap smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable that wires `projboard_core` end to end:
//!   locate the database file, open and migrate it, seed demo data once,
//!   and print the current listing.
//! - Keep output deterministic enough for quick local sanity checks.

use projboard_core::{
    default_log_level, init_logging, ProjectOrdering, ProjectStore, StoreConfig,
};
use std::error::Error;

const DEMO_SEED_COUNT: usize = 8;

fn main() {
    if let Err(err) = run() {
        eprintln!("projboard: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("projboard");
    std::fs::create_dir_all(&data_dir)?;

    let log_dir = data_dir.join("logs");
    init_logging(default_log_level(), &log_dir.to_string_lossy())?;

    let store = ProjectStore::open(data_dir.join("projboard.sqlite3"), &StoreConfig::default())?;

    let seeded = store.seed_if_empty(DEMO_SEED_COUNT)?;
    if seeded > 0 {
        println!("seeded {seeded} demo projects");
    }

    println!("{} projects, by priority:", store.count()?);
    for project in store.list(ProjectOrdering::ByPriority)? {
        println!(
            "  #{} priority={} due={} {}",
            project.id.unwrap_or_default(),
            project.priority,
            project.due_date.format("%Y-%m-%d %H:%M"),
            project.name,
        );
    }

    Ok(())
}
