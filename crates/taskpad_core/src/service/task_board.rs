//! Task board use-case service.
//!
//! # Responsibility
//! - Own board state together with its store and scheduler.
//! - Provide one entry point per user intent.
//!
//! # Invariants
//! - State changes happen only through [`AppState::apply`].
//! - Each persist effect writes the whole collection for its key.
//! - Task text never appears in log output.

use crate::model::list::TaskFilter;
use crate::model::prefs::encode_dark_mode;
use crate::model::task::TaskId;
use crate::notify::{NotificationScheduler, NotifyError, ReminderRequest};
use crate::service::loader::load_state;
use crate::state::{AppState, Command, Effect, Outcome};
use crate::store::{encode_lists, encode_tasks, KeyValueStore, StorageKey, StoreError};
use crate::view::BoardSnapshot;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Effect that could not be completed.
#[derive(Debug)]
pub enum EffectFailure {
    Persist { key: StorageKey, error: StoreError },
    Schedule { task_id: TaskId, error: NotifyError },
}

impl Display for EffectFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist { key, error } => write!(f, "persist `{key}` failed: {error}"),
            Self::Schedule { task_id, error } => {
                write!(f, "reminder for task {task_id} failed: {error}")
            }
        }
    }
}

impl Error for EffectFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist { error, .. } => Some(error),
            Self::Schedule { error, .. } => Some(error),
        }
    }
}

/// Result of one dispatched command.
#[derive(Debug)]
pub struct DispatchReport {
    pub outcome: Outcome,
    /// Effects that failed after the state change was applied.
    pub failures: Vec<EffectFailure>,
}

impl DispatchReport {
    pub fn is_applied(&self) -> bool {
        self.outcome.is_applied()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Stateful board driver over a store and a reminder scheduler.
pub struct TaskBoard<S: KeyValueStore, N: NotificationScheduler> {
    state: AppState,
    store: S,
    scheduler: N,
}

impl<S: KeyValueStore, N: NotificationScheduler> TaskBoard<S, N> {
    /// Loads persisted state; missing or invalid keys use defaults.
    pub fn load(store: S, scheduler: N) -> Self {
        let state = load_state(&store);
        Self {
            state,
            store,
            scheduler,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &N {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut N {
        &mut self.scheduler
    }

    /// Projects current state for rendering.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_state(&self.state)
    }

    /// Applies `command` and runs its effects.
    pub fn dispatch(&mut self, command: Command) -> DispatchReport {
        let name = command.name();
        let transition = self.state.apply(command);
        match &transition.outcome {
            Outcome::Applied => debug!(
                "event=dispatch module=service status=ok command={name} effects={}",
                transition.effects.len()
            ),
            Outcome::Ignored(reason) => {
                debug!("event=dispatch module=service status=ignored command={name} reason={reason}")
            }
        }

        let failures = transition
            .effects
            .iter()
            .filter_map(|effect| self.run_effect(effect).err())
            .collect::<Vec<_>>();
        for failure in &failures {
            warn!("event=effect module=service status=error command={name} error={failure}");
        }

        DispatchReport {
            outcome: transition.outcome,
            failures,
        }
    }

    /// Adds a task, or saves the edit in progress.
    pub fn submit_task(
        &mut self,
        text: &str,
        due_date: Option<DateTime<Utc>>,
        list: Option<&str>,
    ) -> DispatchReport {
        self.dispatch(Command::SubmitTask {
            new_id: TaskId::generate(),
            text: text.to_string(),
            due_date,
            list: list.map(str::to_string),
        })
    }

    pub fn begin_edit(&mut self, id: TaskId) -> DispatchReport {
        self.dispatch(Command::BeginEdit(id))
    }

    pub fn cancel_edit(&mut self) -> DispatchReport {
        self.dispatch(Command::CancelEdit)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> DispatchReport {
        self.dispatch(Command::ToggleTask(id))
    }

    pub fn delete_task(&mut self, id: TaskId) -> DispatchReport {
        self.dispatch(Command::DeleteTask(id))
    }

    pub fn add_list(&mut self, name: &str) -> DispatchReport {
        self.dispatch(Command::AddList(name.to_string()))
    }

    pub fn select_list(&mut self, name: &str) -> DispatchReport {
        self.dispatch(Command::SelectList(name.to_string()))
    }

    pub fn set_filter(&mut self, filter: TaskFilter) -> DispatchReport {
        self.dispatch(Command::SetFilter(filter))
    }

    pub fn set_search(&mut self, search: &str) -> DispatchReport {
        self.dispatch(Command::SetSearch(search.to_string()))
    }

    pub fn set_accent_color(&mut self, color: &str) -> DispatchReport {
        self.dispatch(Command::SetAccentColor(color.to_string()))
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> DispatchReport {
        self.dispatch(Command::SetDarkMode(enabled))
    }

    fn run_effect(&self, effect: &Effect) -> Result<(), EffectFailure> {
        match effect {
            Effect::Persist(key) => self
                .persist(*key)
                .map_err(|error| EffectFailure::Persist { key: *key, error }),
            Effect::ScheduleReminder(request) => {
                self.schedule(request)
                    .map_err(|error| EffectFailure::Schedule {
                        task_id: request.task_id.clone(),
                        error,
                    })
            }
        }
    }

    fn persist(&self, key: StorageKey) -> Result<(), StoreError> {
        let value = match key {
            StorageKey::Tasks => encode_tasks(self.state.tasks())?,
            StorageKey::Lists => encode_lists(self.state.lists())?,
            StorageKey::CurrentList => self.state.current_list().to_string(),
            StorageKey::AccentColor => self.state.accent_color().to_string(),
            StorageKey::DarkMode => encode_dark_mode(self.state.dark_mode()).to_string(),
        };
        self.store.set(key.as_str(), &value)
    }

    fn schedule(&self, request: &ReminderRequest) -> Result<(), NotifyError> {
        self.scheduler.schedule(request)?;
        debug!(
            "event=reminder_schedule module=service status=ok task_id={} fire_at_ms={}",
            request.task_id,
            request.fire_at.timestamp_millis()
        );
        Ok(())
    }
}
