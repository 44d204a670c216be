//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpad_core` linkage.
//! - Run one deterministic board session on in-memory adapters.

use chrono::{Duration, Utc};
use taskpad_core::view::due_label::humanize_due_local;
use taskpad_core::{MemoryKvStore, RecordingScheduler, TaskBoard, TaskFilter};

fn main() {
    println!("taskpad_core ping={}", taskpad_core::ping());
    println!("taskpad_core version={}", taskpad_core::core_version());

    let store = MemoryKvStore::new();
    let scheduler = RecordingScheduler::new();
    let mut board = TaskBoard::load(&store, &scheduler);

    let now = Utc::now();
    board.submit_task("Buy milk", None, None);
    board.submit_task("Book dentist", Some(now + Duration::days(1)), None);
    let first = board.state().tasks()[0].id.clone();
    board.toggle_task(first);
    board.set_filter(TaskFilter::Active);

    let snapshot = board.snapshot();
    println!(
        "board list={} filter={} visible={} stored_keys={} reminders={}",
        snapshot.current_list,
        snapshot.filter,
        snapshot.visible_tasks.len(),
        store.len(),
        scheduler.count()
    );
    for task in &snapshot.visible_tasks {
        let due = task
            .due_date
            .map(|due| humanize_due_local(due, now))
            .unwrap_or_else(|| "-".to_string());
        println!("  [{}] {} ({due})", if task.completed { "x" } else { " " }, task.text);
    }
}
