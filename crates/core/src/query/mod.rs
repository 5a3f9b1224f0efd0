use crate::{error::ReminderError, ReminderTransition};
use chrono::{DateTime, Utc};
use reminders_domain::{Reminder, ReminderChanges, ReminderScope, ReminderStatus};
use reminders_infra::{ReminderContext, ReminderFindQuery};
use tracing::info;

/// Read and aggregate operations over the stored reminders.
///
/// Every `now` argument defaults to the context clock. Results reflect what
/// storage had committed when the query ran: a concurrent writer may change
/// a returned reminder right after, so callers acting on a due set must
/// tolerate it being slightly stale. Marking a reminder notified right after
/// delivering gives at-least-once delivery, not exactly-once.
pub struct ReminderQueryService<'a> {
    ctx: &'a ReminderContext,
}

impl<'a> ReminderQueryService<'a> {
    pub fn new(ctx: &'a ReminderContext) -> Self {
        Self { ctx }
    }

    fn now_or_default(&self, now: Option<DateTime<Utc>>) -> DateTime<Utc> {
        now.unwrap_or_else(|| self.ctx.sys.now())
    }

    async fn find(&self, query: ReminderFindQuery) -> Result<Vec<Reminder>, ReminderError> {
        Ok(self.ctx.repos.reminders.find_by(&query).await?)
    }

    /// Pending reminders with `remind_next <= now`, earliest first
    pub async fn get_due(&self, now: Option<DateTime<Utc>>) -> Result<Vec<Reminder>, ReminderError> {
        self.find(ReminderFindQuery::due(self.now_or_default(now)))
            .await
    }

    pub async fn get_due_for(
        &self,
        scope: &ReminderScope,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<Reminder>, ReminderError> {
        self.find(ReminderFindQuery::due(self.now_or_default(now)).in_scope(scope.clone()))
            .await
    }

    /// The due reminders a notification sender still has to act on
    pub async fn get_due_unnotified(
        &self,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<Reminder>, ReminderError> {
        self.find(ReminderFindQuery::due(self.now_or_default(now)).unnotified())
            .await
    }

    pub async fn get_due_unnotified_for(
        &self,
        scope: &ReminderScope,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<Reminder>, ReminderError> {
        self.find(
            ReminderFindQuery::due(self.now_or_default(now))
                .in_scope(scope.clone())
                .unnotified(),
        )
        .await
    }

    /// Each scope with at least one due reminder, once
    pub async fn get_objects_with_due(
        &self,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<ReminderScope>, ReminderError> {
        let query = ReminderFindQuery::due(self.now_or_default(now));
        Ok(self.ctx.repos.reminders.find_scopes(&query).await?)
    }

    /// All reminders of a scope regardless of when they are due
    pub async fn get_for(
        &self,
        scope: &ReminderScope,
        status: Option<ReminderStatus>,
    ) -> Result<Vec<Reminder>, ReminderError> {
        let query = ReminderFindQuery {
            scope: Some(scope.clone()),
            status,
            ..Default::default()
        };
        self.find(query).await
    }

    /// Pending reminders, across every object of `project` when given
    pub async fn count_pending(&self, project: Option<&str>) -> Result<i64, ReminderError> {
        let query = ReminderFindQuery {
            project: project.map(str::to_string),
            status: Some(ReminderStatus::Pending),
            ..Default::default()
        };
        Ok(self.ctx.repos.reminders.count(&query).await?)
    }

    /// Cancels every pending reminder of `scope` and returns how many were
    /// cancelled.
    ///
    /// Each reminder is cancelled and written on its own, and only while it
    /// is still pending in storage. One that a concurrent caller completed or
    /// cancelled in the meantime is left alone and not counted. A storage
    /// failure stops the iteration and leaves the reminders cancelled so far
    /// as they are.
    pub async fn cancel_all_for(&self, scope: &ReminderScope) -> Result<i64, ReminderError> {
        let now = self.ctx.sys.now();
        let mut cancelled = 0;
        for stored in self.get_for(scope, Some(ReminderStatus::Pending)).await? {
            let mut reminder = stored.clone();
            ReminderTransition::Cancel.apply(&mut reminder, now)?;
            let changes =
                ReminderChanges::between(&stored, &reminder).when_status(ReminderStatus::Pending);
            if self.ctx.repos.reminders.update(stored.id(), &changes).await? {
                cancelled += 1;
            }
        }
        info!(
            "Cancelled {} pending reminders for {}/{}",
            cancelled, scope.object, scope.project
        );
        Ok(cancelled)
    }
}
