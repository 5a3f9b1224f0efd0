use super::{find_reminder, save_changes};
use crate::{error::ReminderError, shared::usecase::UseCase};
use chrono::{DateTime, Utc};
use reminders_domain::{date::format_instant, Reminder, ID};
use reminders_infra::ReminderContext;
use tracing::debug;

/// The lifecycle operations of a `Reminder`.
///
/// `Snooze` and `Reset` put the reminder back to pending and re-arm it,
/// `MarkDone` and `Cancel` are terminal. Applying a transition whose target
/// state already holds changes nothing, so repeating one is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTransition {
    Snooze { minutes: i64 },
    MarkDone,
    Cancel,
    Reset,
}

impl ReminderTransition {
    /// Returns whether `reminder` changed
    pub fn apply(&self, reminder: &mut Reminder, now: DateTime<Utc>) -> Result<bool, ReminderError> {
        let changed = match *self {
            Self::Snooze { minutes } => reminder.snooze(minutes, now)?,
            Self::MarkDone => reminder.mark_done(),
            Self::Cancel => reminder.cancel(),
            Self::Reset => reminder.reset(),
        };
        Ok(changed)
    }
}

#[derive(Debug)]
pub struct TransitionReminderUseCase {
    pub reminder_id: ID,
    pub transition: ReminderTransition,
}

impl TransitionReminderUseCase {
    pub fn snooze(reminder_id: ID, minutes: i64) -> Self {
        Self {
            reminder_id,
            transition: ReminderTransition::Snooze { minutes },
        }
    }

    pub fn mark_done(reminder_id: ID) -> Self {
        Self {
            reminder_id,
            transition: ReminderTransition::MarkDone,
        }
    }

    pub fn cancel(reminder_id: ID) -> Self {
        Self {
            reminder_id,
            transition: ReminderTransition::Cancel,
        }
    }

    pub fn reset(reminder_id: ID) -> Self {
        Self {
            reminder_id,
            transition: ReminderTransition::Reset,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for TransitionReminderUseCase {
    type Response = Reminder;

    type Error = ReminderError;

    const NAME: &'static str = "TransitionReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let stored = find_reminder(&self.reminder_id, ctx).await?;
        let mut reminder = stored.clone();
        let changed = self.transition.apply(&mut reminder, ctx.sys.now())?;
        save_changes(&stored, &reminder, ctx).await?;
        debug!(
            "Applied {:?} to reminder {}, changed: {}, next: {}, status: {}",
            self.transition,
            reminder.id(),
            changed,
            format_instant(&reminder.remind_next()),
            reminder.status()
        );
        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        shared::{test_utils::*, usecase::execute},
        CreateReminderUseCase, MarkReminderNotifiedUseCase,
    };
    use chrono::Duration;
    use reminders_domain::{NewReminder, ReminderStatus};

    async fn create(ctx: &ReminderContext, remind_at: DateTime<Utc>) -> Reminder {
        execute(
            CreateReminderUseCase {
                reminder: NewReminder::new("user1", "project1", "Test", remind_at),
            },
            ctx,
        )
        .await
        .unwrap()
    }

    async fn stored(ctx: &ReminderContext, reminder_id: &ID) -> Reminder {
        ctx.repos.reminders.find(reminder_id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn snooze_moves_remind_next_and_clears_notification() {
        let ctx = setup_context();
        let remind_at = fixed_now() + Duration::hours(1);
        let reminder = create(&ctx, remind_at).await;
        execute(
            MarkReminderNotifiedUseCase {
                reminder_id: reminder.id().clone(),
                notified_at: None,
            },
            &ctx,
        )
        .await
        .unwrap();

        let snoozed = execute(TransitionReminderUseCase::snooze(reminder.id().clone(), 30), &ctx)
            .await
            .unwrap();
        assert_eq!(snoozed.remind_next(), fixed_now() + Duration::minutes(30));
        assert_eq!(snoozed.remind_at(), remind_at);
        assert_eq!(snoozed.status(), ReminderStatus::Pending);
        assert_eq!(snoozed.notified_at(), None);
        assert_eq!(stored(&ctx, reminder.id()).await, snoozed);
    }

    #[tokio::test]
    async fn snooze_rejects_non_positive_minutes() {
        let ctx = setup_context();
        let reminder = create(&ctx, fixed_now()).await;

        for minutes in [0, -1] {
            let res = execute(TransitionReminderUseCase::snooze(reminder.id().clone(), minutes), &ctx).await;
            assert!(matches!(res, Err(ReminderError::InvalidArgument(_))));
        }
        assert_eq!(stored(&ctx, reminder.id()).await, reminder);
    }

    #[tokio::test]
    async fn snooze_reopens_terminal_reminders() {
        let ctx = setup_context();
        let reminder = create(&ctx, fixed_now()).await;
        execute(TransitionReminderUseCase::cancel(reminder.id().clone()), &ctx)
            .await
            .unwrap();

        let snoozed = execute(TransitionReminderUseCase::snooze(reminder.id().clone(), 5), &ctx)
            .await
            .unwrap();
        assert_eq!(snoozed.status(), ReminderStatus::Pending);
    }

    #[tokio::test]
    async fn mark_done_and_cancel_are_persisted() {
        let ctx = setup_context();
        let first = create(&ctx, fixed_now()).await;
        let second = create(&ctx, fixed_now()).await;

        let done = execute(TransitionReminderUseCase::mark_done(first.id().clone()), &ctx)
            .await
            .unwrap();
        assert_eq!(done.status(), ReminderStatus::Done);
        assert_eq!(done.remind_next(), first.remind_next());
        assert_eq!(stored(&ctx, first.id()).await.status(), ReminderStatus::Done);

        let cancelled = execute(TransitionReminderUseCase::cancel(second.id().clone()), &ctx)
            .await
            .unwrap();
        assert_eq!(cancelled.status(), ReminderStatus::Cancelled);
        assert_eq!(
            stored(&ctx, second.id()).await.status(),
            ReminderStatus::Cancelled
        );

        // Repeating a transition is a no-op
        let again = execute(TransitionReminderUseCase::cancel(second.id().clone()), &ctx)
            .await
            .unwrap();
        assert_eq!(again, cancelled);
    }

    #[tokio::test]
    async fn reset_returns_to_original_time() {
        let ctx = setup_context();
        let remind_at = fixed_now() + Duration::hours(1);
        let reminder = create(&ctx, remind_at).await;

        execute(TransitionReminderUseCase::snooze(reminder.id().clone(), 30), &ctx)
            .await
            .unwrap();
        execute(TransitionReminderUseCase::snooze(reminder.id().clone(), 240), &ctx)
            .await
            .unwrap();
        execute(TransitionReminderUseCase::mark_done(reminder.id().clone()), &ctx)
            .await
            .unwrap();

        let reset = execute(TransitionReminderUseCase::reset(reminder.id().clone()), &ctx)
            .await
            .unwrap();
        assert_eq!(reset.remind_next(), remind_at);
        assert_eq!(reset.status(), ReminderStatus::Pending);
        assert_eq!(stored(&ctx, reminder.id()).await, reset);
    }

    #[tokio::test]
    async fn missing_reminder_is_not_found() {
        let ctx = setup_context();
        let res = execute(TransitionReminderUseCase::mark_done(ID::new()), &ctx).await;
        assert!(matches!(res, Err(ReminderError::NotFound(_))));
    }

    #[tokio::test]
    async fn storage_errors_reach_the_caller() {
        let ctx = setup_context_with_repo(UnavailableReminderRepo);
        let res = execute(
            CreateReminderUseCase {
                reminder: NewReminder::new("user1", "project1", "Test", fixed_now()),
            },
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(ReminderError::Storage(_))));

        let res = execute(TransitionReminderUseCase::cancel(ID::new()), &ctx).await;
        assert!(matches!(res, Err(ReminderError::Storage(_))));
    }

    #[tokio::test]
    async fn failed_write_leaves_reminder_unchanged() {
        let ctx = setup_context_with_repo(FailingUpdatesRepo::new(0));
        let reminder = create(&ctx, fixed_now()).await;

        let res = execute(TransitionReminderUseCase::snooze(reminder.id().clone(), 10), &ctx).await;
        assert!(matches!(res, Err(ReminderError::Storage(_))));
        assert_eq!(stored(&ctx, reminder.id()).await, reminder);
    }

    #[tokio::test]
    async fn mark_done_keeps_a_concurrent_acknowledgement() {
        let ctx = setup_context_with_repo(InterleavedNotifyRepo::new(fixed_now()));
        let reminder = create(&ctx, fixed_now()).await;

        execute(TransitionReminderUseCase::mark_done(reminder.id().clone()), &ctx)
            .await
            .unwrap();
        let stored = stored(&ctx, reminder.id()).await;
        assert_eq!(stored.status(), ReminderStatus::Done);
        assert_eq!(stored.notified_at(), Some(fixed_now()));
    }

    #[tokio::test]
    async fn snooze_clears_a_concurrent_acknowledgement() {
        let ctx = setup_context_with_repo(InterleavedNotifyRepo::new(fixed_now()));
        let reminder = create(&ctx, fixed_now()).await;

        execute(TransitionReminderUseCase::snooze(reminder.id().clone(), 10), &ctx)
            .await
            .unwrap();
        let stored = stored(&ctx, reminder.id()).await;
        assert_eq!(stored.remind_next(), fixed_now() + Duration::minutes(10));
        assert_eq!(stored.notified_at(), None);
    }
}
