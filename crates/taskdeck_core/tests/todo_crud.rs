use rusqlite::Connection;
use std::collections::HashSet;
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    Priority, SnapshotRepository, SqliteSnapshotRepository, TaskDraft, TodoService,
    DEFAULT_CATEGORY,
};
use uuid::Uuid;

fn open_store(conn: &Connection) -> TodoService<SqliteSnapshotRepository<'_>> {
    let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
    TodoService::load(repo).unwrap()
}

#[test]
fn add_applies_defaults_and_appends_to_the_end() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let first = store.add(TaskDraft::titled("Buy milk")).unwrap();
    let second = store.add(TaskDraft::titled("Walk dog")).unwrap();

    assert_eq!(first.category, DEFAULT_CATEGORY);
    assert_eq!(first.priority, Priority::Medium);
    assert!(!first.completed);

    let ids: Vec<_> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn add_generates_unique_ids_under_rapid_creation() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let mut seen = HashSet::new();
    for index in 0..200 {
        let task = store.add(TaskDraft::titled(format!("task {index}"))).unwrap();
        assert!(seen.insert(task.id), "duplicate id {}", task.id);
    }
}

#[test]
fn update_overwrites_fields_and_preserves_identity() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let created = store
        .add(TaskDraft {
            title: "Buy milk".to_string(),
            description: Some("two liters".to_string()),
            category: Some("Groceries".to_string()),
            priority: Some(Priority::High),
            due_date: None,
        })
        .unwrap();
    store.toggle_complete(created.id).unwrap();

    let updated = store
        .update(
            created.id,
            TaskDraft {
                title: "Buy bread".to_string(),
                category: Some("Groceries".to_string()),
                ..TaskDraft::default()
            },
        )
        .unwrap()
        .expect("task should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.completed, "toggle state must survive update");
    assert_eq!(updated.title, "Buy bread");
    assert_eq!(updated.category, "Groceries");
    // Overwrite, not merge: the omitted description resets to its default.
    assert_eq!(updated.description, "");
    assert_eq!(updated.priority, Priority::Medium);
}

#[test]
fn update_unknown_id_is_a_recoverable_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    store.add(TaskDraft::titled("only task")).unwrap();

    let result = store.update(Uuid::new_v4(), TaskDraft::titled("ghost")).unwrap();

    assert!(result.is_none());
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].title, "only task");
}

#[test]
fn get_after_delete_returns_absent() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let task = store.add(TaskDraft::titled("ephemeral")).unwrap();
    assert!(store.get(task.id).is_some());

    assert!(store.delete(task.id).unwrap());
    assert!(store.get(task.id).is_none());
    assert!(!store.delete(task.id).unwrap());
}

#[test]
fn delete_unknown_id_reports_false() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    assert!(!store.delete(Uuid::new_v4()).unwrap());
}

#[test]
fn toggle_complete_is_an_involution() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let task = store.add(TaskDraft::titled("flip me")).unwrap();
    assert!(!task.completed);

    let once = store.toggle_complete(task.id).unwrap().unwrap();
    assert!(once.completed);

    let twice = store.toggle_complete(task.id).unwrap().unwrap();
    assert!(!twice.completed);
}

#[test]
fn toggle_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    assert!(store.toggle_complete(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_categories_is_sorted_and_deduplicated() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    for category in ["Work", "Groceries", "Work", "errands"] {
        store
            .add(TaskDraft {
                title: "t".to_string(),
                category: Some(category.to_string()),
                ..TaskDraft::default()
            })
            .unwrap();
    }
    store.add(TaskDraft::titled("uncategorized one")).unwrap();

    assert_eq!(
        store.list_categories(),
        vec!["Groceries", "Work", "errands", "uncategorized"]
    );
}

#[test]
fn every_mutation_persists_the_full_sequence() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let kept = store.add(TaskDraft::titled("kept")).unwrap();
    let dropped = store.add(TaskDraft::titled("dropped")).unwrap();
    store.toggle_complete(kept.id).unwrap();
    store.delete(dropped.id).unwrap();

    let verify_repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let persisted = verify_repo.load_tasks().unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, kept.id);
    assert!(persisted[0].completed);
}

#[test]
fn reload_restores_the_same_sequence_field_for_field() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    store
        .add(TaskDraft {
            title: "full task".to_string(),
            description: Some("details".to_string()),
            category: Some("Work".to_string()),
            priority: Some(Priority::Low),
            due_date: Some("2024-06-30".parse().unwrap()),
        })
        .unwrap();
    let completed = store.add(TaskDraft::titled("done already")).unwrap();
    store.toggle_complete(completed.id).unwrap();

    let before = store.tasks().to_vec();
    drop(store);

    let reloaded = open_store(&conn);
    assert_eq!(reloaded.tasks(), before.as_slice());
}

#[test]
fn persistence_survives_reopening_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdeck.sqlite3");

    let task = {
        let conn = taskdeck_core::db::open_db(&path).unwrap();
        let mut store = open_store(&conn);
        store.add(TaskDraft::titled("durable")).unwrap()
    };

    let conn = taskdeck_core::db::open_db(&path).unwrap();
    let store = open_store(&conn);
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0], task);
}
