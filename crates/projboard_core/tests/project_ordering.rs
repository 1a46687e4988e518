use chrono::{DateTime, Duration, TimeZone, Utc};
use projboard_core::{Project, ProjectOrdering, ProjectStore};

#[test]
fn by_name_orders_case_insensitively_ascending() {
    let store = ProjectStore::in_memory().unwrap();
    save(&store, "banana", base_date(), 1);
    save(&store, "Apple", base_date(), 2);
    save(&store, "cherry", base_date(), 3);

    let names = list_names(&store, ProjectOrdering::ByName);
    assert_eq!(names, vec!["Apple", "banana", "cherry"]);
}

#[test]
fn by_due_date_orders_furthest_in_future_first() {
    let store = ProjectStore::in_memory().unwrap();
    save(&store, "soon", base_date() + Duration::days(1), 1);
    save(&store, "latest", base_date() + Duration::days(30), 1);
    save(&store, "past", base_date() - Duration::days(5), 1);

    let names = list_names(&store, ProjectOrdering::ByDueDate);
    assert_eq!(names, vec!["latest", "soon", "past"]);
}

#[test]
fn by_priority_orders_highest_first() {
    let store = ProjectStore::in_memory().unwrap();
    save(&store, "low", base_date(), 1);
    save(&store, "high", base_date(), 5);
    save(&store, "mid", base_date(), 3);

    let names = list_names(&store, ProjectOrdering::ByPriority);
    assert_eq!(names, vec!["high", "mid", "low"]);
}

#[test]
fn equal_sort_keys_fall_back_to_insertion_order() {
    let store = ProjectStore::in_memory().unwrap();
    save(&store, "first", base_date(), 3);
    save(&store, "second", base_date(), 3);
    save(&store, "third", base_date(), 3);

    for ordering in [ProjectOrdering::ByDueDate, ProjectOrdering::ByPriority] {
        let names = list_names(&store, ordering);
        assert_eq!(names, vec!["first", "second", "third"], "{ordering:?}");
    }
}

#[test]
fn out_of_range_priorities_sort_by_value() {
    let store = ProjectStore::in_memory().unwrap();
    save(&store, "huge", base_date(), 1000);
    save(&store, "normal", base_date(), 4);
    save(&store, "negative", base_date(), -7);

    let names = list_names(&store, ProjectOrdering::ByPriority);
    assert_eq!(names, vec!["huge", "normal", "negative"]);
}

fn save(store: &ProjectStore, name: &str, due_date: DateTime<Utc>, priority: i64) {
    store.save(Project::new(name, due_date, priority)).unwrap();
}

fn list_names(store: &ProjectStore, ordering: ProjectOrdering) -> Vec<String> {
    store
        .list(ordering)
        .unwrap()
        .into_iter()
        .map(|project| project.name)
        .collect()
}

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}
