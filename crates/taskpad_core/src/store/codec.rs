//! JSON codecs for collection values.

use super::{StorageKey, StoreError, StoreResult};
use crate::model::task::{Task, TaskId, TaskValidationError};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Why a stored task record was dropped on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The record does not have the task shape.
    Malformed,
    Invalid(TaskValidationError),
    /// An earlier record already uses this id.
    DuplicateId,
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed"),
            Self::Invalid(TaskValidationError::EmptyId) => write!(f, "empty_id"),
            Self::Invalid(TaskValidationError::BlankText) => write!(f, "blank_text"),
            Self::Invalid(TaskValidationError::BlankList) => write!(f, "blank_list"),
            Self::DuplicateId => write!(f, "duplicate_id"),
        }
    }
}

/// A stored record that did not survive decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTask {
    /// Position in the stored array.
    pub index: usize,
    pub id: Option<TaskId>,
    pub reason: RejectReason,
}

/// Tasks recovered from a stored collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTasks {
    pub tasks: Vec<Task>,
    pub rejected: Vec<RejectedTask>,
}

/// Serializes the whole task collection.
pub fn encode_tasks(tasks: &[Task]) -> StoreResult<String> {
    serde_json::to_string(tasks).map_err(|err| codec_error(StorageKey::Tasks, err))
}

/// Parses a stored task collection record by record.
///
/// Only a value that is not a JSON array fails as a whole. Records that are
/// malformed, fail validation or repeat an earlier id are dropped and
/// reported in `rejected`; the first record with a given id wins.
pub fn decode_tasks(raw: &str) -> StoreResult<DecodedTasks> {
    let records: Vec<Value> =
        serde_json::from_str(raw).map_err(|err| codec_error(StorageKey::Tasks, err))?;

    let mut decoded = DecodedTasks::default();
    let mut seen = HashSet::new();
    for (index, record) in records.into_iter().enumerate() {
        let raw_id = record.get("id").and_then(Value::as_str).map(TaskId::new);
        let reason = match serde_json::from_value::<Task>(record) {
            Err(_) => RejectReason::Malformed,
            Ok(task) => match task.validate() {
                Err(err) => RejectReason::Invalid(err),
                Ok(()) if !seen.insert(task.id.clone()) => RejectReason::DuplicateId,
                Ok(()) => {
                    decoded.tasks.push(task);
                    continue;
                }
            },
        };
        decoded.rejected.push(RejectedTask {
            index,
            id: raw_id,
            reason,
        });
    }
    Ok(decoded)
}

/// Serializes the list name sequence.
pub fn encode_lists(lists: &[String]) -> StoreResult<String> {
    serde_json::to_string(lists).map_err(|err| codec_error(StorageKey::Lists, err))
}

/// Parses a stored list name sequence.
pub fn decode_lists(raw: &str) -> StoreResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|err| codec_error(StorageKey::Lists, err))
}

fn codec_error(key: StorageKey, err: serde_json::Error) -> StoreError {
    StoreError::Codec {
        key,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_lists, decode_tasks, encode_tasks, RejectReason};
    use crate::model::task::{Task, TaskId, TaskValidationError};
    use crate::store::{StorageKey, StoreError};

    #[test]
    fn decode_tasks_accepts_legacy_shape() {
        let raw = r#"[{"list":"Default","dueDate":"2024-03-01T09:30:00.000Z","completed":true,"text":"Pay rent","id":"1709280000000"}]"#;
        let tasks = decode_tasks(raw).unwrap().tasks;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, TaskId::new("1709280000000"));
        assert!(tasks[0].completed);
        assert_eq!(
            tasks[0].due_date.map(|due| due.to_rfc3339()),
            Some("2024-03-01T09:30:00+00:00".to_string())
        );
    }

    #[test]
    fn encode_tasks_writes_null_due_date() {
        let task = Task::with_id(TaskId::new("a"), "Buy milk", "Default");
        let json: serde_json::Value =
            serde_json::from_str(&encode_tasks(&[task]).unwrap()).unwrap();
        assert_eq!(json[0]["dueDate"], serde_json::Value::Null);
        assert_eq!(json[0]["completed"], false);
    }

    #[test]
    fn decode_tasks_drops_only_invalid_records() {
        let raw = r#"[
            {"id":"1","text":"Pay rent","list":"Default"},
            {"id":"2","text":"  ","completed":false,"dueDate":null,"list":"Default"},
            {"id":"3","text":"Call mom","list":"Personal"},
            {"id":"4","list":"Default"},
            "stray"
        ]"#;
        let decoded = decode_tasks(raw).unwrap();

        let ids: Vec<&str> = decoded.tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        let rejected: Vec<_> = decoded
            .rejected
            .iter()
            .map(|item| (item.index, item.id.clone(), item.reason.clone()))
            .collect();
        assert_eq!(
            rejected,
            vec![
                (
                    1,
                    Some(TaskId::new("2")),
                    RejectReason::Invalid(TaskValidationError::BlankText)
                ),
                (3, Some(TaskId::new("4")), RejectReason::Malformed),
                (4, None, RejectReason::Malformed),
            ]
        );
    }

    #[test]
    fn decode_tasks_keeps_first_record_per_id() {
        let raw = r#"[
            {"id":"t1","text":"first","list":"Default"},
            {"id":"t2","text":"other","list":"Default"},
            {"id":"t1","text":"second","list":"Work"}
        ]"#;
        let decoded = decode_tasks(raw).unwrap();

        assert_eq!(decoded.tasks.len(), 2);
        assert_eq!(decoded.tasks[0].text, "first");
        assert_eq!(decoded.rejected.len(), 1);
        assert_eq!(decoded.rejected[0].index, 2);
        assert_eq!(decoded.rejected[0].reason, RejectReason::DuplicateId);
    }

    #[test]
    fn decode_tasks_rejects_non_array_values() {
        for raw in ["{not json", r#"{"id":"1"}"#] {
            let err = decode_tasks(raw).unwrap_err();
            assert!(matches!(
                err,
                StoreError::Codec {
                    key: StorageKey::Tasks,
                    ..
                }
            ));
        }
    }

    #[test]
    fn decode_lists_rejects_non_array() {
        assert!(decode_lists("\"Work\"").is_err());
        assert_eq!(decode_lists(r#"["A","B"]"#).unwrap(), vec!["A", "B"]);
    }
}
