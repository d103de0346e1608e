use serde_json::json;
use todo_core::{create_task, Category, NewTask, Priority, Task, TaskValidationError};

#[test]
fn create_task_sets_defaults() {
    let task = create_task(NewTask::titled("hello")).unwrap();

    assert!(!task.id.is_empty());
    assert_eq!(task.title, "hello");
    assert_eq!(task.description, None);
    assert!(!task.completed);
    assert!(task.created_at > 0);
    assert_eq!(task.category, Category::Other);
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.due_date, None);
}

#[test]
fn create_task_rejects_blank_title() {
    let err = create_task(NewTask::titled("   ")).unwrap_err();
    assert_eq!(err, TaskValidationError::BlankTitle);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut request = NewTask::titled("ship release");
    request.description = Some("tag and publish".to_string());
    request.category = Category::Work;
    request.priority = Priority::Low;
    request.due_date = Some(1_700_000_360_000);
    let task = Task::create(request, "1700000000000", 1_700_000_000_000).unwrap();

    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "1700000000000",
            "title": "ship release",
            "description": "tag and publish",
            "completed": false,
            "createdAt": 1_700_000_000_000_i64,
            "category": "工作",
            "priority": "低",
            "dueDate": 1_700_000_360_000_i64
        })
    );

    let decoded: Task = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn deserialize_coerces_english_aliases_and_unknown_labels() {
    let decoded: Task = serde_json::from_value(json!({
        "id": "a",
        "title": "t",
        "category": "life",
        "priority": "top"
    }))
    .unwrap();

    assert_eq!(decoded.category, Category::Life);
    assert_eq!(decoded.priority, Priority::Medium);
}

#[test]
fn deserialize_rejects_blank_id() {
    let err = serde_json::from_value::<Task>(json!({"id": "", "title": "t"})).unwrap_err();
    assert!(err.to_string().contains("task id must not be empty"), "{err}");
}
