use chrono::{DateTime, Utc};
use reminders_domain::{Reminder, ReminderScope, ReminderStatus};

/// Predicate over stored reminders. Every filter that is set must hold.
#[derive(Debug, Clone, Default)]
pub struct ReminderFindQuery {
    /// Exact (object, project) pair
    pub scope: Option<ReminderScope>,
    /// Project across all objects
    pub project: Option<String>,
    pub status: Option<ReminderStatus>,
    /// Only reminders that are due at this instant, see `Reminder::is_due`
    pub due_at: Option<DateTime<Utc>>,
    /// Only reminders without `notified_at`
    pub unnotified_only: bool,
}

impl ReminderFindQuery {
    /// Pending reminders whose `remind_next` is at or before `now`
    pub fn due(now: DateTime<Utc>) -> Self {
        Self {
            due_at: Some(now),
            ..Default::default()
        }
    }

    pub fn in_scope(mut self, scope: ReminderScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn in_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_status(mut self, status: ReminderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn unnotified(mut self) -> Self {
        self.unnotified_only = true;
        self
    }

    pub fn matches(&self, reminder: &Reminder) -> bool {
        if let Some(scope) = &self.scope {
            if reminder.object() != scope.object || reminder.project() != scope.project {
                return false;
            }
        }
        if let Some(project) = &self.project {
            if reminder.project() != project {
                return false;
            }
        }
        if let Some(status) = self.status {
            if reminder.status() != status {
                return false;
            }
        }
        if let Some(due_at) = self.due_at {
            if !reminder.is_due(due_at) {
                return false;
            }
        }
        !(self.unnotified_only && reminder.notified_at().is_some())
    }
}
