use super::{find_reminder, save_changes};
use crate::{error::ReminderError, shared::usecase::UseCase};
use chrono::{DateTime, Utc};
use reminders_domain::{Reminder, ID};
use reminders_infra::ReminderContext;
use tracing::debug;

/// Records that a notification was delivered for the current `remind_next`.
///
/// Used by the notification sender after it acted on a due reminder, so that
/// the reminder drops out of the unnotified due set. Marking twice with the
/// same instant does not write again.
#[derive(Debug)]
pub struct MarkReminderNotifiedUseCase {
    pub reminder_id: ID,
    /// Defaults to now
    pub notified_at: Option<DateTime<Utc>>,
}

#[async_trait::async_trait]
impl UseCase for MarkReminderNotifiedUseCase {
    type Response = Reminder;

    type Error = ReminderError;

    const NAME: &'static str = "MarkReminderNotified";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let stored = find_reminder(&self.reminder_id, ctx).await?;
        let mut reminder = stored.clone();
        let notified_at = self.notified_at.unwrap_or_else(|| ctx.sys.now());
        reminder.mark_notified(notified_at);
        save_changes(&stored, &reminder, ctx).await?;
        debug!("Reminder {} notified at {}", reminder.id(), notified_at);
        Ok(reminder)
    }
}
