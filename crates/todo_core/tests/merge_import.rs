use serde_json::json;
use todo_core::transfer::{
    export_json, parse_import_bytes, parse_import_value, read_import, write_export,
};
use todo_core::{
    merge_tasks, Category, FormatError, MemoryTaskStore, NewTask, Priority, Task, TaskCollection,
};

fn task(id: &str, title: &str) -> Task {
    Task::create(NewTask::titled(title), id, 1_700_000_000_000).unwrap()
}

fn detailed_task(id: &str) -> Task {
    let mut request = NewTask::titled(format!("detailed {id}"));
    request.description = Some("with notes".to_string());
    request.category = Category::Study;
    request.priority = Priority::High;
    request.due_date = Some(1_700_000_500_000);
    let mut task = Task::create(request, id, 1_700_000_000_000).unwrap();
    task.toggle();
    task
}

#[test]
fn merge_scenario_replaces_in_place_and_keeps_others() {
    let current = vec![task("x", "old"), task("y", "keep")];
    let incoming = parse_import_value(json!([{"id": "x", "title": "new"}])).unwrap();

    let merged = merge_tasks(&current, &incoming);
    let summary: Vec<(&str, &str)> = merged
        .iter()
        .map(|task| (task.id.as_str(), task.title.as_str()))
        .collect();
    assert_eq!(summary, [("x", "new"), ("y", "keep")]);
}

#[test]
fn merge_replaces_whole_record_not_fields() {
    let current = vec![detailed_task("x")];
    let incoming = parse_import_value(json!([{"id": "x", "title": "bare"}])).unwrap();

    let merged = merge_tasks(&current, &incoming);
    assert_eq!(merged[0].description, None);
    assert_eq!(merged[0].category, Category::Other);
    assert_eq!(merged[0].priority, Priority::Medium);
    assert!(!merged[0].completed);
}

#[test]
fn merging_same_batch_twice_is_idempotent() {
    let current = vec![task("a", "one"), task("b", "two"), task("c", "three")];
    let incoming = vec![
        task("b", "two v2"),
        task("d", "four"),
        task("d", "four v2"),
        task("a", "one v2"),
    ];

    let once = merge_tasks(&current, &incoming);
    let twice = merge_tasks(&once, &incoming);
    assert_eq!(once, twice);
}

#[test]
fn malformed_element_aborts_whole_import() {
    let store = MemoryTaskStore::new();
    let mut tasks = TaskCollection::new(&store);
    tasks.insert(task("a", "one")).unwrap();
    let before = tasks.tasks().to_vec();
    let saves_before = store.save_count();

    let err = tasks
        .import_merge_value(json!([
            {"id": "a", "title": "changed"},
            {"id": "b", "title": "new"},
            {"title": "no id"}
        ]))
        .unwrap_err();

    assert!(matches!(err, FormatError::InvalidRecord { index: 2, .. }));
    assert_eq!(tasks.tasks(), before.as_slice());
    assert_eq!(store.save_count(), saves_before);
}

#[test]
fn non_array_import_is_a_format_error() {
    let store = MemoryTaskStore::new();
    let mut tasks = TaskCollection::new(&store);

    let err = tasks.import_merge(br#"{"id": "a", "title": "x"}"#).unwrap_err();
    assert_eq!(err, FormatError::NotAnArray { found: "object" });
    assert!(err.to_string().contains("JSON array"));
    assert!(tasks.is_empty());
}

#[test]
fn export_then_import_into_empty_collection_round_trips() {
    let original = vec![detailed_task("a"), task("b", "plain"), detailed_task("c")];
    let mut buffer = Vec::new();
    write_export(&original, &mut buffer).unwrap();

    let store = MemoryTaskStore::new();
    let mut tasks = TaskCollection::new(&store);
    let summary = tasks.import_merge(&buffer).unwrap();

    assert_eq!(tasks.tasks(), original.as_slice());
    assert_eq!(summary.appended, 3);
    assert_eq!(summary.replaced, 0);
    assert_eq!(summary.total, 3);
}

#[test]
fn export_writes_wire_labels_and_omits_absent_optionals() {
    let mut buffer = Vec::new();
    write_export(&[detailed_task("a"), task("b", "plain")], &mut buffer).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(value[0]["category"], "学习");
    assert_eq!(value[0]["priority"], "高");
    assert_eq!(value[0]["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(value[0]["dueDate"], 1_700_000_500_000_i64);
    assert_eq!(value[0]["completed"], true);
    assert!(value[1].get("description").is_none());
    assert!(value[1].get("dueDate").is_none());
}

#[test]
fn import_accepts_files_from_earlier_releases() {
    let raw = r#"[
        {"id":"1700000000000","title":"写周报","completed":false,"createdAt":1700000000000,
         "category":"工作","priority":"高","dueDate":1700003600000},
        {"id":"1700000000001","title":"legacy","completed":true,"createdAt":1700000000001}
    ]"#;

    let tasks = parse_import_bytes(raw.as_bytes()).unwrap();
    assert_eq!(tasks[0].category, Category::Work);
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[1].category, Category::Other);
    assert_eq!(tasks[1].priority, Priority::Medium);
    assert!(tasks[1].completed);
}

#[test]
fn read_import_consumes_a_byte_stream() {
    let raw = br#"[{"id":"s","title":"from stream"}]"#;
    let tasks = read_import(&raw[..]).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "from stream");
}

#[test]
fn wrongly_typed_field_is_rejected() {
    let err = parse_import_value(json!([{"id": "a", "title": "t", "completed": "yes"}]))
        .unwrap_err();
    assert!(matches!(err, FormatError::InvalidRecord { index: 0, .. }));
}

#[test]
fn zero_deadline_round_trips_as_no_deadline() {
    let mut request = NewTask::titled("someday");
    request.due_date = Some(0);
    let original = Task::create(request, "a", 5).unwrap();
    assert_eq!(original.due_date, None);

    let exported = export_json(std::slice::from_ref(&original)).unwrap();
    let back = merge_tasks(&[], &parse_import_bytes(exported.as_bytes()).unwrap());
    assert_eq!(back, vec![original]);
}

#[test]
fn blank_title_record_rejects_whole_import() {
    let mut tasks = TaskCollection::load(MemoryTaskStore::new());
    tasks.add(NewTask::titled("keep me")).unwrap();

    let err = tasks
        .import_merge(br#"[{"id":"y","title":"fine"},{"id":"z","title":"   "}]"#)
        .unwrap_err();

    assert!(matches!(err, FormatError::InvalidRecord { index: 1, .. }));
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks.tasks()[0].title, "keep me");
}
