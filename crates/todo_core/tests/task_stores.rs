use rusqlite::{params, Connection};
use todo_core::db::migrations::latest_version;
use todo_core::db::{open_db, open_db_in_memory, DbError};
use todo_core::{
    Category, JsonFileTaskStore, NewTask, Priority, SqliteTaskStore, StoreError, Task,
    TaskCollection, TaskStore,
};

fn sample_tasks() -> Vec<Task> {
    let mut request = NewTask::titled("plan sprint");
    request.description = Some("backlog grooming".to_string());
    request.category = Category::Work;
    request.priority = Priority::High;
    request.due_date = Some(1_700_000_900_000);
    let first = Task::create(request, "a", 1_700_000_000_000).unwrap();

    let mut second = Task::create(NewTask::titled("read"), "b", 1_700_000_000_001).unwrap();
    second.toggle();

    vec![first, second]
}

fn load_tasks(store: &impl TaskStore) -> Vec<Task> {
    store
        .load()
        .unwrap()
        .into_iter()
        .map(|record| record.into_task().unwrap())
        .collect()
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(SqliteTaskStore::try_new(&conn).is_ok());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteTaskStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn sqlite_store_round_trips_sequence_in_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let mut tasks = sample_tasks();
    tasks.reverse();

    store.save(&tasks).unwrap();
    assert_eq!(load_tasks(&store), tasks);

    store.save(&tasks[..1]).unwrap();
    assert_eq!(load_tasks(&store), tasks[..1].to_vec());
}

#[test]
fn sqlite_store_coerces_unknown_labels_on_load() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (position, id, title, completed, created_at, category, priority, due_date)
         VALUES (0, ?1, 'legacy row', 0, 5, 'hobby', 'urgent', 0);",
        params!["legacy"],
    )
    .unwrap();

    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let loaded = load_tasks(&store);
    assert_eq!(loaded[0].category, Category::Other);
    assert_eq!(loaded[0].priority, Priority::Medium);
    assert_eq!(loaded[0].due_date, None);
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteTaskStore::try_new(&conn).unwrap();
        let mut tasks = TaskCollection::load(store);
        tasks.add(NewTask::titled("survive restart")).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let tasks = TaskCollection::load(store);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks.tasks()[0].title, "survive restart");
}

#[test]
fn json_store_round_trips_through_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileTaskStore::in_dir(dir.path());
    store.save(&sample_tasks()).unwrap();

    let tasks = TaskCollection::load(JsonFileTaskStore::in_dir(dir.path()));
    assert_eq!(tasks.tasks(), sample_tasks().as_slice());
}

#[test]
fn json_store_with_corrupted_file_loads_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileTaskStore::in_dir(dir.path());
    std::fs::write(store.path(), "{ not json").unwrap();

    let tasks = TaskCollection::load(store);
    assert!(tasks.is_empty());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
