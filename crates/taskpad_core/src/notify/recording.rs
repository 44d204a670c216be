//! In-memory scheduler that records requests.

use super::{NotificationScheduler, NotifyResult, ReminderRequest};
use std::cell::RefCell;

#[derive(Debug, Default)]
pub struct RecordingScheduler {
    scheduled: RefCell<Vec<ReminderRequest>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, in scheduling order.
    pub fn scheduled(&self) -> Vec<ReminderRequest> {
        self.scheduled.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.scheduled.borrow().len()
    }
}

impl NotificationScheduler for RecordingScheduler {
    fn schedule(&self, request: &ReminderRequest) -> NotifyResult<()> {
        self.scheduled.borrow_mut().push(request.clone());
        Ok(())
    }
}
