//! Random demo-data generation for first-run population.
//!
//! Not core logic: names come from a fixed pool, due dates land within a
//! bounded offset from now, priorities stay in the UI's 1-5 range.

use crate::model::project::Project;
use chrono::{Duration, Utc};
use rand::Rng;

const NAME_POOL: &[&str] = &[
    "Build a house",
    "Build a farm",
    "Write a book",
    "Learn the guitar",
    "Plant a garden",
    "Paint the fence",
    "Fix the roof",
    "Plan a trip",
    "Clean the garage",
    "Host a dinner",
];

/// Due dates are spread at most this far on either side of "now".
const MAX_DUE_OFFSET_MINUTES: i64 = 30 * 24 * 60;

pub(crate) fn random_projects(count: usize) -> Vec<Project> {
    let mut rng = rand::rng();
    (0..count).map(|_| random_project(&mut rng)).collect()
}

fn random_project(rng: &mut impl Rng) -> Project {
    let name = NAME_POOL[rng.random_range(0..NAME_POOL.len())];
    let offset_minutes = rng.random_range(-MAX_DUE_OFFSET_MINUTES..=MAX_DUE_OFFSET_MINUTES);
    let due_date = Utc::now() + Duration::minutes(offset_minutes);
    let priority = rng.random_range(1..=5);

    Project::new(name, due_date, priority)
}
