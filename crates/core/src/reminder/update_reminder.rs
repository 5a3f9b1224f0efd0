use super::{find_reminder, save_changes};
use crate::{error::ReminderError, shared::usecase::UseCase};
use chrono::{DateTime, Utc};
use reminders_domain::{Reminder, ID};
use reminders_infra::ReminderContext;

/// Updates plain fields of a `Reminder`. `None` leaves a field untouched,
/// `Some(None)` clears an optional one.
///
/// A new `remind_next` re-arms the reminder (clears `notified_at`) but does
/// not change its status. Values equal to the stored ones cause no write.
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub object: Option<String>,
    pub project: Option<String>,
    pub subject: Option<String>,
    pub description: Option<Option<String>>,
    pub data1: Option<Option<String>>,
    pub data2: Option<Option<String>>,
    pub remind_next: Option<DateTime<Utc>>,
}

impl UpdateReminderUseCase {
    pub fn new(reminder_id: ID) -> Self {
        Self {
            reminder_id,
            object: None,
            project: None,
            subject: None,
            description: None,
            data1: None,
            data2: None,
            remind_next: None,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = ReminderError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let UpdateReminderUseCase {
            reminder_id,
            object,
            project,
            subject,
            description,
            data1,
            data2,
            remind_next,
        } = self;

        let stored = find_reminder(reminder_id, ctx).await?;
        let mut reminder = stored.clone();

        // Validation errors return before anything is written
        if let Some(object) = object.take() {
            reminder.set_object(object)?;
        }
        if let Some(project) = project.take() {
            reminder.set_project(project)?;
        }
        if let Some(subject) = subject.take() {
            reminder.set_subject(subject)?;
        }
        if let Some(description) = description.take() {
            reminder.set_description(description);
        }
        if let Some(data1) = data1.take() {
            reminder.set_data1(data1)?;
        }
        if let Some(data2) = data2.take() {
            reminder.set_data2(data2)?;
        }
        if let Some(remind_next) = remind_next {
            reminder.retarget(*remind_next);
        }

        save_changes(&stored, &reminder, ctx).await?;
        Ok(reminder)
    }
}
