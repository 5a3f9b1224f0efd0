use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, query_structs::ReminderFindQuery};
use reminders_domain::{Reminder, ReminderChanges, ReminderRecord, ReminderScope, ID};
use std::collections::BTreeSet;

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders)
    }

    async fn update(&self, reminder_id: &ID, changes: &ReminderChanges) -> anyhow::Result<bool> {
        let updated = update(reminder_id, &self.reminders, |stored| {
            let mut record = ReminderRecord::from(stored.clone());
            if !changes.apply_to(&mut record) {
                return false;
            }
            *stored = record.into();
            true
        });
        Ok(updated)
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_by(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| query.matches(r));
        reminders.sort_by(|r1, r2| {
            r1.remind_next()
                .cmp(&r2.remind_next())
                .then_with(|| r1.id().cmp(r2.id()))
        });
        Ok(reminders)
    }

    async fn find_scopes(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<ReminderScope>> {
        let scopes = find_by(&self.reminders, |r| query.matches(r))
            .iter()
            .map(|r| r.scope())
            .collect::<BTreeSet<_>>();
        Ok(scopes.into_iter().collect())
    }

    async fn count(&self, query: &ReminderFindQuery) -> anyhow::Result<i64> {
        let count = find_by(&self.reminders, |r| query.matches(r)).len();
        Ok(count as i64)
    }
}
