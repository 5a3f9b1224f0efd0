use crate::{error::ReminderError, shared::usecase::UseCase};
use reminders_domain::{NewReminder, Reminder};
use reminders_infra::ReminderContext;
use tracing::debug;

/// Creates a pending `Reminder` that first fires at its `remind_at`.
/// Not idempotent, every execution stores a new reminder.
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub reminder: NewReminder,
}

#[async_trait::async_trait]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = ReminderError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let reminder = Reminder::create(self.reminder.clone(), ctx.sys.now())?;
        ctx.repos.reminders.insert(&reminder).await?;
        debug!(
            "Created reminder {} for {}/{}",
            reminder.id(),
            reminder.object(),
            reminder.project()
        );
        Ok(reminder)
    }
}
