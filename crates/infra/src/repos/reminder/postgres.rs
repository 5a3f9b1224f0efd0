use super::IReminderRepo;
use crate::repos::shared::query_structs::ReminderFindQuery;
use chrono::{DateTime, Utc};
use reminders_domain::{Reminder, ReminderChanges, ReminderRecord, ReminderScope, ReminderStatus, ID};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const REMINDER_COLUMNS: &str = "id, object, project, subject, description, remind_at, \
    remind_next, status, notified_at, data1, data2, created_at";

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    id: Uuid,
    object: String,
    project: String,
    subject: String,
    description: Option<String>,
    remind_at: DateTime<Utc>,
    remind_next: DateTime<Utc>,
    status: String,
    notified_at: Option<DateTime<Utc>>,
    data1: Option<String>,
    data2: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        Ok(ReminderRecord {
            id: raw.id.into(),
            object: raw.object,
            project: raw.project,
            subject: raw.subject,
            description: raw.description,
            remind_at: raw.remind_at,
            remind_next: raw.remind_next,
            status: raw.status.parse()?,
            notified_at: raw.notified_at,
            data1: raw.data1,
            data2: raw.data2,
            created_at: raw.created_at,
        }
        .into())
    }
}

#[derive(Debug, FromRow)]
struct ReminderScopeRaw {
    object: String,
    project: String,
}

impl From<ReminderScopeRaw> for ReminderScope {
    fn from(raw: ReminderScopeRaw) -> Self {
        ReminderScope::new(raw.object, raw.project)
    }
}

/// Appends the WHERE clause for `query`
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ReminderFindQuery) {
    builder.push(" WHERE TRUE");
    if let Some(scope) = &query.scope {
        builder
            .push(" AND object = ")
            .push_bind(scope.object.clone())
            .push(" AND project = ")
            .push_bind(scope.project.clone());
    }
    if let Some(project) = &query.project {
        builder.push(" AND project = ").push_bind(project.clone());
    }
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(due_at) = query.due_at {
        builder
            .push(" AND status = ")
            .push_bind(ReminderStatus::Pending.as_str())
            .push(" AND remind_next <= ")
            .push_bind(due_at);
    }
    if query.unnotified_only {
        builder.push(" AND notified_at IS NULL");
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (id, object, project, subject, description, remind_at, remind_next, status, notified_at, data1, data2, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(reminder.id().inner_ref())
        .bind(reminder.object())
        .bind(reminder.project())
        .bind(reminder.subject())
        .bind(reminder.description())
        .bind(reminder.remind_at())
        .bind(reminder.remind_next())
        .bind(reminder.status().as_str())
        .bind(reminder.notified_at())
        .bind(reminder.data1())
        .bind(reminder.data2())
        .bind(reminder.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, reminder_id: &ID, changes: &ReminderChanges) -> anyhow::Result<bool> {
        if changes.is_empty() {
            return Ok(self.find(reminder_id).await?.is_some());
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE reminders SET ");
        {
            let mut columns = builder.separated(", ");
            if let Some(object) = &changes.object {
                columns.push("object = ").push_bind_unseparated(object.clone());
            }
            if let Some(project) = &changes.project {
                columns.push("project = ").push_bind_unseparated(project.clone());
            }
            if let Some(subject) = &changes.subject {
                columns.push("subject = ").push_bind_unseparated(subject.clone());
            }
            if let Some(description) = &changes.description {
                columns
                    .push("description = ")
                    .push_bind_unseparated(description.clone());
            }
            if let Some(remind_next) = changes.remind_next {
                columns.push("remind_next = ").push_bind_unseparated(remind_next);
            }
            if let Some(status) = changes.status {
                columns.push("status = ").push_bind_unseparated(status.as_str());
            }
            if let Some(notified_at) = changes.notified_at {
                columns.push("notified_at = ").push_bind_unseparated(notified_at);
            }
            if let Some(data1) = &changes.data1 {
                columns.push("data1 = ").push_bind_unseparated(data1.clone());
            }
            if let Some(data2) = &changes.data2 {
                columns.push("data2 = ").push_bind_unseparated(data2.clone());
            }
        }
        builder.push(" WHERE id = ").push_bind(*reminder_id.inner_ref());
        if let Some(status) = changes.expected_status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }

        let rows_affected = builder
            .build()
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE id = $1",
            REMINDER_COLUMNS
        ))
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        raw.map(Reminder::try_from).transpose()
    }

    async fn find_by(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<Reminder>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM reminders", REMINDER_COLUMNS));
        push_filters(&mut builder, query);
        builder.push(" ORDER BY remind_next ASC, id ASC");

        builder
            .build_query_as::<ReminderRaw>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Reminder::try_from)
            .collect()
    }

    async fn find_scopes(&self, query: &ReminderFindQuery) -> anyhow::Result<Vec<ReminderScope>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT DISTINCT object, project FROM reminders");
        push_filters(&mut builder, query);
        builder.push(" ORDER BY object ASC, project ASC");

        let scopes = builder
            .build_query_as::<ReminderScopeRaw>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ReminderScope::from)
            .collect();
        Ok(scopes)
    }

    async fn count(&self, query: &ReminderFindQuery) -> anyhow::Result<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM reminders");
        push_filters(&mut builder, query);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
