use crate::{
    date::canonical,
    shared::{
        entity::{Entity, ID},
        validation::{self, ValidationError},
    },
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const OBJECT_MAX_LEN: usize = 64;
pub const PROJECT_MAX_LEN: usize = 64;
pub const SUBJECT_MAX_LEN: usize = 255;
pub const DATA_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    #[default]
    Pending,
    Done,
    Cancelled,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// `Done` and `Cancelled` reminders never become due
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Reminder status: `{0}` is not one of pending, done or cancelled")]
pub struct InvalidStatusError(String);

impl FromStr for ReminderStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

/// The (object, project) pair a `Reminder` belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReminderScope {
    pub object: String,
    pub project: String,
}

impl ReminderScope {
    pub fn new(object: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            project: project.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSnooze {
    #[error("Snooze duration must be a positive number of minutes, got {0}")]
    NonPositive(i64),
    #[error("Snoozing for {0} minutes is out of the supported time range")]
    OutOfRange(i64),
}

/// Input for creating a `Reminder`
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub object: String,
    pub project: String,
    pub subject: String,
    pub remind_at: DateTime<Utc>,
    pub description: Option<String>,
    pub data1: Option<String>,
    pub data2: Option<String>,
}

impl NewReminder {
    pub fn new(
        object: impl Into<String>,
        project: impl Into<String>,
        subject: impl Into<String>,
        remind_at: DateTime<Utc>,
    ) -> Self {
        Self {
            object: object.into(),
            project: project.into(),
            subject: subject.into(),
            remind_at,
            description: None,
            data1: None,
            data2: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn data(mut self, data1: Option<String>, data2: Option<String>) -> Self {
        self.data1 = data1;
        self.data2 = data2;
        self
    }
}

/// The storage shape of a `Reminder`. Only repositories should need this,
/// everything else goes through the `Reminder` lifecycle methods.
#[derive(Debug, Clone)]
pub struct ReminderRecord {
    pub id: ID,
    pub object: String,
    pub project: String,
    pub subject: String,
    pub description: Option<String>,
    pub remind_at: DateTime<Utc>,
    pub remind_next: DateTime<Utc>,
    pub status: ReminderStatus,
    pub notified_at: Option<DateTime<Utc>>,
    pub data1: Option<String>,
    pub data2: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A deferred notification for an object within a project.
///
/// `remind_at` is the originally requested time and never changes.
/// `remind_next` is when the reminder fires next. `notified_at` always
/// refers to the current `remind_next`: every change of `remind_next` goes
/// through [`Reminder::retarget`], which clears it.
///
/// Mutators only touch the in-memory value and report whether anything
/// changed. Persisting the change is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    id: ID,
    object: String,
    project: String,
    subject: String,
    description: Option<String>,
    remind_at: DateTime<Utc>,
    remind_next: DateTime<Utc>,
    status: ReminderStatus,
    notified_at: Option<DateTime<Utc>>,
    data1: Option<String>,
    data2: Option<String>,
    created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn create(input: NewReminder, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        validation::required("object", &input.object, OBJECT_MAX_LEN)?;
        validation::required("project", &input.project, PROJECT_MAX_LEN)?;
        validation::required("subject", &input.subject, SUBJECT_MAX_LEN)?;
        validation::optional("data1", input.data1.as_deref(), DATA_MAX_LEN)?;
        validation::optional("data2", input.data2.as_deref(), DATA_MAX_LEN)?;

        let remind_at = canonical(input.remind_at);
        Ok(Self {
            id: Default::default(),
            object: input.object,
            project: input.project,
            subject: input.subject,
            description: input.description,
            remind_at,
            remind_next: remind_at,
            status: ReminderStatus::Pending,
            notified_at: None,
            data1: input.data1,
            data2: input.data2,
            created_at: canonical(now),
        })
    }

    pub fn id(&self) -> &ID {
        &self.id
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn scope(&self) -> ReminderScope {
        ReminderScope::new(self.object.clone(), self.project.clone())
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn remind_at(&self) -> DateTime<Utc> {
        self.remind_at
    }

    pub fn remind_next(&self) -> DateTime<Utc> {
        self.remind_next
    }

    pub fn status(&self) -> ReminderStatus {
        self.status
    }

    pub fn notified_at(&self) -> Option<DateTime<Utc>> {
        self.notified_at
    }

    pub fn data1(&self) -> Option<&str> {
        self.data1.as_deref()
    }

    pub fn data2(&self) -> Option<&str> {
        self.data2.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && self.remind_next <= now
    }

    /// Moves `remind_next`, re-arming the reminder. This is the only place
    /// `remind_next` is written after creation.
    pub fn retarget(&mut self, remind_next: DateTime<Utc>) -> bool {
        let remind_next = canonical(remind_next);
        if self.remind_next == remind_next {
            return false;
        }
        self.remind_next = remind_next;
        self.notified_at = None;
        true
    }

    fn set_status(&mut self, status: ReminderStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        true
    }

    /// Fires again `minutes` from `now`. A done or cancelled reminder is
    /// reopened.
    pub fn snooze(&mut self, minutes: i64, now: DateTime<Utc>) -> Result<bool, InvalidSnooze> {
        if minutes <= 0 {
            return Err(InvalidSnooze::NonPositive(minutes));
        }
        let remind_next = Duration::try_minutes(minutes)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or(InvalidSnooze::OutOfRange(minutes))?;

        let retargeted = self.retarget(remind_next);
        let reopened = self.set_status(ReminderStatus::Pending);
        // Snoozing always re-arms, even when the target second did not move
        let cleared = self.notified_at.take().is_some();
        Ok(retargeted || reopened || cleared)
    }

    pub fn mark_done(&mut self) -> bool {
        self.set_status(ReminderStatus::Done)
    }

    pub fn cancel(&mut self) -> bool {
        self.set_status(ReminderStatus::Cancelled)
    }

    /// Back to the original schedule
    pub fn reset(&mut self) -> bool {
        let retargeted = self.retarget(self.remind_at);
        let reopened = self.set_status(ReminderStatus::Pending);
        retargeted || reopened
    }

    /// Acknowledges delivery for the current `remind_next`.
    pub fn mark_notified(&mut self, at: DateTime<Utc>) -> bool {
        let at = Some(canonical(at));
        if self.notified_at == at {
            return false;
        }
        self.notified_at = at;
        true
    }

    pub fn set_object(&mut self, object: String) -> Result<bool, ValidationError> {
        validation::required("object", &object, OBJECT_MAX_LEN)?;
        Ok(replace(&mut self.object, object))
    }

    pub fn set_project(&mut self, project: String) -> Result<bool, ValidationError> {
        validation::required("project", &project, PROJECT_MAX_LEN)?;
        Ok(replace(&mut self.project, project))
    }

    pub fn set_subject(&mut self, subject: String) -> Result<bool, ValidationError> {
        validation::required("subject", &subject, SUBJECT_MAX_LEN)?;
        Ok(replace(&mut self.subject, subject))
    }

    pub fn set_description(&mut self, description: Option<String>) -> bool {
        replace(&mut self.description, description)
    }

    pub fn set_data1(&mut self, data1: Option<String>) -> Result<bool, ValidationError> {
        validation::optional("data1", data1.as_deref(), DATA_MAX_LEN)?;
        Ok(replace(&mut self.data1, data1))
    }

    pub fn set_data2(&mut self, data2: Option<String>) -> Result<bool, ValidationError> {
        validation::optional("data2", data2.as_deref(), DATA_MAX_LEN)?;
        Ok(replace(&mut self.data2, data2))
    }
}

fn replace<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

impl From<ReminderRecord> for Reminder {
    fn from(record: ReminderRecord) -> Self {
        Self {
            id: record.id,
            object: record.object,
            project: record.project,
            subject: record.subject,
            description: record.description,
            remind_at: canonical(record.remind_at),
            remind_next: canonical(record.remind_next),
            status: record.status,
            notified_at: record.notified_at.map(canonical),
            data1: record.data1,
            data2: record.data2,
            created_at: canonical(record.created_at),
        }
    }
}

impl From<Reminder> for ReminderRecord {
    fn from(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            object: reminder.object,
            project: reminder.project,
            subject: reminder.subject,
            description: reminder.description,
            remind_at: reminder.remind_at,
            remind_next: reminder.remind_next,
            status: reminder.status,
            notified_at: reminder.notified_at,
            data1: reminder.data1,
            data2: reminder.data2,
            created_at: reminder.created_at,
        }
    }
}

/// The columns of a stored reminder to overwrite. `None` leaves a column as
/// it is in storage, so concurrent writes to other columns survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderChanges {
    pub object: Option<String>,
    pub project: Option<String>,
    pub subject: Option<String>,
    pub description: Option<Option<String>>,
    pub remind_next: Option<DateTime<Utc>>,
    pub status: Option<ReminderStatus>,
    pub notified_at: Option<Option<DateTime<Utc>>>,
    pub data1: Option<Option<String>>,
    pub data2: Option<Option<String>>,
    /// Write only while the stored status still is this one
    pub expected_status: Option<ReminderStatus>,
}

impl ReminderChanges {
    /// What has to be written to turn the stored `before` into `after`.
    ///
    /// A new `remind_next` always carries its `notified_at`, so an
    /// acknowledgement stored meanwhile for the old `remind_next` is cleared.
    pub fn between(before: &Reminder, after: &Reminder) -> Self {
        fn diff<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
            (before != after).then(|| after.clone())
        }

        let remind_next = diff(&before.remind_next, &after.remind_next);
        let notified_at = if remind_next.is_some() {
            Some(after.notified_at)
        } else {
            diff(&before.notified_at, &after.notified_at)
        };
        Self {
            object: diff(&before.object, &after.object),
            project: diff(&before.project, &after.project),
            subject: diff(&before.subject, &after.subject),
            description: diff(&before.description, &after.description),
            remind_next,
            status: diff(&before.status, &after.status),
            notified_at,
            data1: diff(&before.data1, &after.data1),
            data2: diff(&before.data2, &after.data2),
            expected_status: None,
        }
    }

    pub fn when_status(mut self, status: ReminderStatus) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// True when no column would be written
    pub fn is_empty(&self) -> bool {
        self.object.is_none()
            && self.project.is_none()
            && self.subject.is_none()
            && self.description.is_none()
            && self.remind_next.is_none()
            && self.status.is_none()
            && self.notified_at.is_none()
            && self.data1.is_none()
            && self.data2.is_none()
    }

    /// Writes the changes into a stored record. Returns false and leaves the
    /// record untouched when `expected_status` does not hold.
    pub fn apply_to(&self, record: &mut ReminderRecord) -> bool {
        if matches!(self.expected_status, Some(status) if status != record.status) {
            return false;
        }
        if let Some(object) = &self.object {
            record.object = object.clone();
        }
        if let Some(project) = &self.project {
            record.project = project.clone();
        }
        if let Some(subject) = &self.subject {
            record.subject = subject.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(remind_next) = self.remind_next {
            record.remind_next = remind_next;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(notified_at) = self.notified_at {
            record.notified_at = notified_at;
        }
        if let Some(data1) = &self.data1 {
            record.data1 = data1.clone();
        }
        if let Some(data2) = &self.data2 {
            record.data2 = data2.clone();
        }
        true
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
