use taskpad_core::store::{decode_tasks, encode_tasks};
use taskpad_core::{Task, TaskId};

#[test]
fn task_collection_roundtrips_through_storage_encoding() {
    let mut first = Task::with_id(TaskId::new("1700000000000"), "Buy milk", "Default");
    first.completed = true;
    let mut second = Task::new("Quarterly report", "Work");
    second.due_date = Some("2026-11-30T17:00:00Z".parse().unwrap());
    let tasks = vec![first, second];

    let decoded = decode_tasks(&encode_tasks(&tasks).unwrap())
        .unwrap()
        .tasks;
    assert_eq!(decoded, tasks);
}

#[test]
fn decoding_ignores_record_key_order() {
    let ordered = r#"[{"id":"a","text":"Read","completed":false,"dueDate":"2026-10-20T08:00:00Z","list":"Personal"}]"#;
    let shuffled = r#"[{"list":"Personal","dueDate":"2026-10-20T08:00:00Z","text":"Read","id":"a","completed":false}]"#;

    let from_ordered = decode_tasks(ordered).unwrap().tasks;
    let from_shuffled = decode_tasks(shuffled).unwrap().tasks;
    assert_eq!(from_ordered, from_shuffled);
    assert_eq!(
        decode_tasks(&encode_tasks(&from_shuffled).unwrap())
            .unwrap()
            .tasks,
        from_ordered
    );
}

#[test]
fn missing_optional_fields_use_defaults() {
    let decoded = decode_tasks(r#"[{"id":"a","text":"Read","list":"Default"}]"#)
        .unwrap()
        .tasks;
    assert!(!decoded[0].completed);
    assert_eq!(decoded[0].due_date, None);
}

#[test]
fn serialized_record_uses_camel_case_fields() {
    let task = Task::with_id(TaskId::new("a"), "Read", "Default");
    let json = serde_json::to_value(&task).unwrap();
    let object = json.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["completed", "dueDate", "id", "list", "text"]);
}
