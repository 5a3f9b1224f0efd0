mod create_reminder;
mod get_reminder;
mod mark_reminder_notified;
mod transition_reminder;
mod update_reminder;

pub use create_reminder::CreateReminderUseCase;
pub use get_reminder::GetReminderUseCase;
pub use mark_reminder_notified::MarkReminderNotifiedUseCase;
pub use transition_reminder::{ReminderTransition, TransitionReminderUseCase};
pub use update_reminder::UpdateReminderUseCase;

use crate::error::ReminderError;
use reminders_domain::{Reminder, ReminderChanges, ID};
use reminders_infra::ReminderContext;

pub(crate) async fn find_reminder(
    reminder_id: &ID,
    ctx: &ReminderContext,
) -> Result<Reminder, ReminderError> {
    ctx.repos
        .reminders
        .find(reminder_id)
        .await?
        .ok_or_else(|| ReminderError::NotFound(reminder_id.clone()))
}

/// Every mutation ends here. Only the columns that differ between `before`
/// and `after` are written, and nothing at all when they are equal.
pub(crate) async fn save_changes(
    before: &Reminder,
    after: &Reminder,
    ctx: &ReminderContext,
) -> Result<(), ReminderError> {
    let changes = ReminderChanges::between(before, after);
    if changes.is_empty() {
        return Ok(());
    }
    if !ctx.repos.reminders.update(after.id(), &changes).await? {
        return Err(ReminderError::NotFound(after.id().clone()));
    }
    Ok(())
}
