use chrono::{DateTime, Utc};
use reminders_domain::{date::parse_instant, Reminder, ReminderChanges, ReminderScope, ID};
use reminders_infra::{
    IReminderRepo, ISys, InMemoryReminderRepo, ReminderContext, ReminderFindQuery,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

pub struct StaticTimeSys(pub DateTime<Utc>);
impl ISys for StaticTimeSys {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2024-01-01 12:00:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    parse_instant("2024-01-01 12:00:00").unwrap()
}

/// Inmemory context whose clock is stuck at `fixed_now`
pub fn setup_context() -> ReminderContext {
    let mut ctx = ReminderContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(fixed_now()));
    ctx
}

/// Inmemory context on the fixed clock, stored through `repo`
pub fn setup_context_with_repo(repo: impl IReminderRepo + 'static) -> ReminderContext {
    let mut ctx = setup_context();
    ctx.repos.reminders = Arc::new(repo);
    ctx
}

/// Store whose every call fails, like one that lost its connection
pub struct UnavailableReminderRepo;

#[async_trait::async_trait]
impl IReminderRepo for UnavailableReminderRepo {
    async fn insert(&self, _reminder: &Reminder) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }

    async fn update(&self, _reminder_id: &ID, _changes: &ReminderChanges) -> anyhow::Result<bool> {
        anyhow::bail!("connection refused")
    }

    async fn find(&self, _reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        anyhow::bail!("connection refused")
    }

    async fn find_by(&self, _query: &ReminderFindQuery) -> anyhow::Result<Vec<Reminder>> {
        anyhow::bail!("connection refused")
    }

    async fn find_scopes(&self, _query: &ReminderFindQuery) -> anyhow::Result<Vec<ReminderScope>> {
        anyhow::bail!("connection refused")
    }

    async fn count(&self, _query: &ReminderFindQuery) -> anyhow::Result<i64> {
        anyhow::bail!("connection refused")
    }
}

/// Inmemory store that stops accepting updates after `healthy_updates` of them
pub struct FailingUpdatesRepo {
    inner: InMemoryReminderRepo,
    healthy_updates: AtomicUsize,
}

impl FailingUpdatesRepo {
    pub fn new(healthy_updates: usize) -> Self {
        Self {
            inner: InMemoryReminderRepo::new(),
            healthy_updates: AtomicUsize::new(healthy_updates),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for FailingUpdatesRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn update(&self, reminder_id: &ID, changes: &ReminderChanges) -> anyhow::Result<bool> {
        let healthy = self
            .healthy_updates
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !healthy {
            anyhow::bail!("write timed out");
        }
        self.inner.update(reminder_id, changes).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.find(reminder_id).await
    }

    async fn find_by(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_by(query).await
    }

    async fn find_scopes(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<ReminderScope>> {
        self.inner.find_scopes(query).await
    }

    async fn count(&self, query: &ReminderFindQuery) -> anyhow::Result<i64> {
        self.inner.count(query).await
    }
}

/// Inmemory store where another writer gets in between every read and update:
/// right before an update is applied, the same reminder is marked notified at
/// `notified_at`.
pub struct InterleavedNotifyRepo {
    inner: InMemoryReminderRepo,
    notified_at: DateTime<Utc>,
}

impl InterleavedNotifyRepo {
    pub fn new(notified_at: DateTime<Utc>) -> Self {
        Self {
            inner: InMemoryReminderRepo::new(),
            notified_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InterleavedNotifyRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn update(&self, reminder_id: &ID, changes: &ReminderChanges) -> anyhow::Result<bool> {
        let acknowledge = ReminderChanges {
            notified_at: Some(Some(self.notified_at)),
            ..Default::default()
        };
        self.inner.update(reminder_id, &acknowledge).await?;
        self.inner.update(reminder_id, changes).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.find(reminder_id).await
    }

    async fn find_by(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_by(query).await
    }

    async fn find_scopes(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<ReminderScope>> {
        self.inner.find_scopes(query).await
    }

    async fn count(&self, query: &ReminderFindQuery) -> anyhow::Result<i64> {
        self.inner.count(query).await
    }
}
