use chrono::{TimeZone, Utc};
use taskpad_core::store::decode_tasks;
use taskpad_core::{
    KeyValueStore, MemoryKvStore, RecordingScheduler, SqliteKvStore, SqliteReminderOutbox,
    TaskBoard, TaskId,
};

#[test]
fn board_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.sqlite3");
    let due = Utc.with_ymd_and_hms(2026, 10, 30, 18, 45, 0).unwrap();

    let (first_id, second_id) = {
        let store = SqliteKvStore::open(&path).unwrap();
        let mut board = TaskBoard::load(store, RecordingScheduler::new());
        board.submit_task("Pick up parcel", Some(due), None);
        board.add_list("Errands");
        board.submit_task("Return library books", None, None);
        board.toggle_task(board.state().tasks()[1].id.clone());
        board.set_accent_color("#8c54ff");
        board.set_dark_mode(true);
        (
            board.state().tasks()[0].id.clone(),
            board.state().tasks()[1].id.clone(),
        )
    };

    let reopened = TaskBoard::load(SqliteKvStore::open(&path).unwrap(), RecordingScheduler::new());
    let state = reopened.state();
    assert_eq!(state.tasks().len(), 2);
    assert_eq!(state.tasks()[0].id, first_id);
    assert_eq!(state.tasks()[0].due_date, Some(due));
    assert_eq!(state.tasks()[0].list, "Default");
    assert_eq!(state.tasks()[1].id, second_id);
    assert_eq!(state.tasks()[1].list, "Errands");
    assert!(state.tasks()[1].completed);
    assert_eq!(state.lists(), ["Default", "Work", "Personal", "Errands"]);
    assert_eq!(state.current_list(), "Errands");
    assert_eq!(state.accent_color(), "#8c54ff");
    assert!(state.dark_mode());
}

#[test]
fn partial_storage_defaults_each_key_independently() {
    let store = MemoryKvStore::with_entries([
        (
            "TODOS",
            r#"[{"id":"1","text":"Legacy","completed":false,"dueDate":null,"list":"Work"}]"#,
        ),
        ("DARK_MODE", "true"),
    ]);
    let board = TaskBoard::load(&store, RecordingScheduler::new());
    let state = board.state();

    assert_eq!(state.tasks().len(), 1);
    assert_eq!(state.tasks()[0].id, TaskId::new("1"));
    assert_eq!(state.lists(), ["Default", "Work", "Personal"]);
    assert_eq!(state.current_list(), "Default");
    assert_eq!(state.accent_color(), "#4f8cff");
    assert!(state.dark_mode());
}

#[test]
fn corrupt_values_fall_back_without_touching_other_keys() {
    let store = MemoryKvStore::with_entries([
        ("TODOS", "{not json"),
        ("LISTS", r#"["Home","Home","Side project"]"#),
        ("CURRENT_LIST", "Side project"),
        ("ACCENT_COLOR", "#badbad"),
        ("DARK_MODE", "yes"),
    ]);
    let board = TaskBoard::load(&store, RecordingScheduler::new());
    let state = board.state();

    assert!(state.tasks().is_empty());
    assert_eq!(state.lists(), ["Home", "Side project"]);
    assert_eq!(state.current_list(), "Side project");
    assert_eq!(state.accent_color(), "#4f8cff");
    assert!(!state.dark_mode());
    // Loading leaves the stored values alone.
    assert_eq!(store.get("TODOS").unwrap().as_deref(), Some("{not json"));
}

#[test]
fn invalid_task_record_is_dropped_and_neighbours_are_written_back() {
    let store = MemoryKvStore::with_entries([(
        "TODOS",
        r#"[{"id":"1","text":"Pay rent","completed":false,"dueDate":null,"list":"Default"},{"id":"2","text":"Call mom","completed":true,"dueDate":null,"list":"Personal"},{"id":"3","text":"","completed":false,"dueDate":null,"list":"Default"}]"#,
    )]);
    let mut board = TaskBoard::load(&store, RecordingScheduler::new());
    assert_eq!(board.state().tasks().len(), 2);

    let report = board.submit_task("New", None, None);
    assert!(report.is_clean());

    let stored = decode_tasks(&store.get("TODOS").unwrap().unwrap()).unwrap();
    assert!(stored.rejected.is_empty());
    let texts: Vec<&str> = stored.tasks.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["Pay rent", "Call mom", "New"]);
    assert!(stored.tasks[1].completed);
}

#[test]
fn duplicate_stored_ids_collapse_to_the_first_record() {
    let store = MemoryKvStore::with_entries([(
        "TODOS",
        r#"[{"id":"t1","text":"keep","list":"Default"},{"id":"t1","text":"shadow","list":"Default"},{"id":"t2","text":"other","list":"Default"}]"#,
    )]);
    let mut board = TaskBoard::load(&store, RecordingScheduler::new());
    assert_eq!(board.state().tasks().len(), 2);

    board.delete_task(TaskId::new("t1"));
    let ids: Vec<&str> = board
        .state()
        .tasks()
        .iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(ids, vec!["t2"]);
}

#[test]
fn empty_stored_lists_fall_back_to_defaults() {
    let store = MemoryKvStore::with_entries([("LISTS", "[]"), ("CURRENT_LIST", "Work")]);
    let board = TaskBoard::load(&store, RecordingScheduler::new());
    assert_eq!(board.state().lists(), ["Default", "Work", "Personal"]);
    assert_eq!(board.state().current_list(), "Work");
}

#[test]
fn outbox_receives_reminders_from_board() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.sqlite3");
    let due = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();

    let store = SqliteKvStore::open(&path).unwrap();
    let outbox = SqliteReminderOutbox::open(&path).unwrap();
    let mut board = TaskBoard::load(store, outbox);
    board.submit_task("Stand-up notes", Some(due), Some("Work"));
    board.submit_task("No reminder", None, None);

    let drained = board.scheduler_mut().take_pending(10).unwrap();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].request.body, "Stand-up notes");
    assert_eq!(drained[0].request.fire_at, due);
    assert_eq!(drained[0].request.task_id, board.state().tasks()[0].id);
    assert!(board.scheduler_mut().take_pending(10).unwrap().is_empty());
}
