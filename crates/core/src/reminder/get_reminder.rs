use super::find_reminder;
use crate::{error::ReminderError, shared::usecase::UseCase};
use reminders_domain::{Reminder, ID};
use reminders_infra::ReminderContext;

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub reminder_id: ID,
}

#[async_trait::async_trait]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = ReminderError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        find_reminder(&self.reminder_id, ctx).await
    }
}
