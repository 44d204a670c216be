//! Startup load of board state from the key/value store.
//!
//! # Invariants
//! - Every key falls back to its default independently.
//! - Loading never fails; unreadable or invalid values are logged and
//!   replaced by defaults.
//! - A task record that is malformed, invalid or repeats an earlier id is
//!   dropped on its own; its valid neighbours still load.
//! - Loading never writes to the store.

use crate::model::list::{dedupe_lists, default_lists, DEFAULT_LIST};
use crate::model::prefs::{decode_dark_mode, palette_color, DEFAULT_ACCENT_COLOR};
use crate::model::task::Task;
use crate::state::AppState;
use crate::store::{decode_lists, decode_tasks, DecodedTasks, KeyValueStore, StorageKey};
use log::{info, warn};

/// Reads every persisted key and builds the initial state.
pub fn load_state(store: &impl KeyValueStore) -> AppState {
    let tasks = read(store, StorageKey::Tasks)
        .and_then(|raw| decode_or_warn(StorageKey::Tasks, decode_tasks(&raw)))
        .map(keep_valid_tasks)
        .unwrap_or_default();

    let lists = read(store, StorageKey::Lists)
        .and_then(|raw| decode_or_warn(StorageKey::Lists, decode_lists(&raw)))
        .map(dedupe_lists)
        .filter(|lists| !lists.is_empty())
        .unwrap_or_else(default_lists);

    let current_list = read(store, StorageKey::CurrentList)
        .filter(|name| lists.contains(name))
        .unwrap_or_else(|| fallback_current_list(&lists));

    let accent_color = read(store, StorageKey::AccentColor)
        .and_then(|raw| {
            let color = palette_color(&raw);
            if color.is_none() {
                warn!("event=board_load module=service status=fallback key={} reason=unsupported_accent", StorageKey::AccentColor);
            }
            color
        })
        .unwrap_or(DEFAULT_ACCENT_COLOR)
        .to_string();

    let dark_mode = read(store, StorageKey::DarkMode)
        .map(|raw| decode_dark_mode(&raw))
        .unwrap_or(false);

    warn_orphans(&tasks, &lists);
    info!(
        "event=board_load module=service status=ok tasks={} lists={} dark_mode={}",
        tasks.len(),
        lists.len(),
        dark_mode
    );

    AppState {
        tasks,
        lists,
        current_list,
        accent_color,
        dark_mode,
        ..AppState::default()
    }
}

fn read(store: &impl KeyValueStore, key: StorageKey) -> Option<String> {
    match store.get(key.as_str()) {
        Ok(value) => value,
        Err(err) => {
            warn!("event=board_load module=service status=fallback key={key} reason=read_failed error={err}");
            None
        }
    }
}

fn decode_or_warn<T>(key: StorageKey, decoded: crate::store::StoreResult<T>) -> Option<T> {
    match decoded {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("event=board_load module=service status=fallback key={key} reason=decode_failed error={err}");
            None
        }
    }
}

fn keep_valid_tasks(decoded: DecodedTasks) -> Vec<Task> {
    if decoded.rejected.is_empty() {
        return decoded.tasks;
    }
    for rejected in &decoded.rejected {
        let id = rejected.id.as_ref().map_or("-", |id| id.as_str());
        warn!(
            "event=board_load module=service status=dropped key={} index={} task_id={id} reason={}",
            StorageKey::Tasks,
            rejected.index,
            rejected.reason
        );
    }
    warn!(
        "event=board_load module=service status=degraded key={} invalid_tasks={} kept_tasks={}",
        StorageKey::Tasks,
        decoded.rejected.len(),
        decoded.tasks.len()
    );
    decoded.tasks
}

fn fallback_current_list(lists: &[String]) -> String {
    if lists.iter().any(|name| name == DEFAULT_LIST) {
        return DEFAULT_LIST.to_string();
    }
    lists
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_LIST.to_string())
}

fn warn_orphans(tasks: &[Task], lists: &[String]) {
    let orphans = tasks
        .iter()
        .filter(|task| !lists.contains(&task.list))
        .count();
    if orphans > 0 {
        // Orphans stay in storage and hidden from every list view.
        warn!("event=board_load module=service status=degraded orphan_tasks={orphans}");
    }
}

#[cfg(test)]
mod tests {
    use super::load_state;
    use crate::store::MemoryKvStore;

    #[test]
    fn empty_store_loads_defaults() {
        let state = load_state(&MemoryKvStore::new());
        assert!(state.tasks().is_empty());
        assert_eq!(state.lists(), ["Default", "Work", "Personal"]);
        assert_eq!(state.current_list(), "Default");
        assert_eq!(state.accent_color(), "#4f8cff");
        assert!(!state.dark_mode());
    }

    #[test]
    fn invalid_task_records_do_not_drop_their_neighbours() {
        let store = MemoryKvStore::with_entries([(
            "TODOS",
            r#"[{"id":"1","text":"Pay rent","list":"Default"},{"id":"2","text":"","list":"Default"},{"id":"1","text":"Again","list":"Work"}]"#,
        )]);
        let state = load_state(&store);
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].text, "Pay rent");
    }

    #[test]
    fn unknown_current_list_falls_back() {
        let store = MemoryKvStore::with_entries([
            ("LISTS", r#"["Home","Office"]"#),
            ("CURRENT_LIST", "Gone"),
        ]);
        let state = load_state(&store);
        assert_eq!(state.current_list(), "Home");
    }
}
