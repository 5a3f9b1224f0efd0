mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::ReminderFindQuery;
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use reminders_domain::{Reminder, ReminderChanges, ReminderScope, ID};

/// Storage for `Reminder`s.
///
/// Every method is a single round trip and every row update is atomic on its
/// own. Nothing here spans several rows in one transaction.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Writes the given columns of one stored reminder and nothing else.
    /// Returns false when the reminder does not exist or its stored status
    /// is not `changes.expected_status`.
    async fn update(&self, reminder_id: &ID, changes: &ReminderChanges) -> anyhow::Result<bool>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// Ordered by `remind_next` ascending, ties broken by id
    async fn find_by(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<Reminder>>;
    /// Distinct scopes among the matching reminders
    async fn find_scopes(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<ReminderScope>>;
    async fn count(&self, query: &ReminderFindQuery) -> anyhow::Result<i64>;
}
