//! Task repository — CRUD, predicate queries, and section transitions.

use chrono::{Local, NaiveDate, Utc};

use focus_core::entities::Task;
use focus_core::enums::{Section, Weekday};
use focus_core::errors::CoreError;
use focus_core::ids::PREFIX_TASK;

use crate::error::DatabaseError;
use crate::helpers::{
    encode_optional_datetime, encode_regularity, get_opt_string, parse_datetime, parse_enum,
    parse_optional_datetime, parse_regularity,
};
use crate::service::FocusService;
use crate::updates::task::{NewTask, TaskUpdate};

const SELECT_COLS: &str = "id, title, why, urgency, section, planned_date, regularity, \
     completed_at, is_deleted, created_at, updated_at";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        why: row.get(2)?,
        urgency: parse_enum(&row.get::<String>(3)?)?,
        section: parse_enum(&row.get::<String>(4)?)?,
        planned_date: parse_optional_datetime(get_opt_string(row, 5)?.as_deref())?,
        regularity: parse_regularity(get_opt_string(row, 6)?.as_deref())?,
        completed_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
        is_deleted: row.get::<i64>(8)? != 0,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

/// Predicate for [`FocusService::query_tasks`]. `None` fields do not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub section: Option<Section>,
    pub is_deleted: Option<bool>,
    /// Keep only tasks whose regularity set contains this weekday.
    pub recurs_on: Option<Weekday>,
}

impl TaskFilter {
    /// Non-deleted tasks stored under `section`.
    #[must_use]
    pub const fn listed_in(section: Section) -> Self {
        Self {
            section: Some(section),
            is_deleted: Some(false),
            recurs_on: None,
        }
    }
}

impl FocusService {
    pub async fn create_task(&self, draft: NewTask) -> Result<Task, DatabaseError> {
        let draft = draft.validate()?;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TASK).await?;

        let task = Task {
            id,
            title: draft.title,
            why: draft.why,
            urgency: draft.urgency,
            section: draft.section,
            planned_date: draft.planned_date,
            regularity: draft.regularity,
            completed_at: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        self.db().conn().execute(
            &format!(
                "INSERT INTO tasks ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            libsql::params![
                task.id.as_str(),
                task.title.as_str(),
                task.why.as_str(),
                task.urgency.as_str(),
                task.section.as_str(),
                encode_optional_datetime(task.planned_date.as_ref()),
                encode_regularity(task.regularity.as_deref())?,
                libsql::Value::Null,
                0i64,
                now.to_rfc3339(),
                now.to_rfc3339()
            ],
        ).await?;

        tracing::debug!(task_id = %task.id, section = %task.section, "task created");
        Ok(task)
    }

    pub async fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        let mut rows = self.db().conn().query(
            &format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"),
            [id],
        ).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::task_not_found(id))?;
        row_to_task(&row)
    }

    /// Insert `task`, or replace every column of the row with the same `id`.
    pub async fn put_task(&self, task: &Task) -> Result<(), DatabaseError> {
        self.db().conn().execute(
            &format!(
                "INSERT INTO tasks ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    why = excluded.why,
                    urgency = excluded.urgency,
                    section = excluded.section,
                    planned_date = excluded.planned_date,
                    regularity = excluded.regularity,
                    completed_at = excluded.completed_at,
                    is_deleted = excluded.is_deleted,
                    created_at = excluded.created_at,
                    updated_at = excluded.updated_at"
            ),
            libsql::params![
                task.id.as_str(),
                task.title.as_str(),
                task.why.as_str(),
                task.urgency.as_str(),
                task.section.as_str(),
                encode_optional_datetime(task.planned_date.as_ref()),
                encode_regularity(task.regularity.as_deref())?,
                encode_optional_datetime(task.completed_at.as_ref()),
                i64::from(task.is_deleted),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339()
            ],
        ).await?;
        Ok(())
    }

    /// Select tasks matching `filter`, in storage order.
    ///
    /// Every filter value is bound as a parameter. Regularity membership is
    /// tested with `json_each` over the stored tag array.
    pub async fn query_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(section) = filter.section {
            conditions.push(format!("section = ?{idx}"));
            params.push(section.as_str().into());
            idx += 1;
        }
        if let Some(is_deleted) = filter.is_deleted {
            conditions.push(format!("is_deleted = ?{idx}"));
            params.push(i64::from(is_deleted).into());
            idx += 1;
        }
        if let Some(day) = filter.recurs_on {
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM json_each(tasks.regularity) WHERE json_each.value = ?{idx})"
            ));
            params.push(day.as_str().into());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("SELECT {SELECT_COLS} FROM tasks{where_clause} ORDER BY rowid");

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    pub async fn update_task(
        &self,
        task_id: &str,
        update: TaskUpdate,
    ) -> Result<Task, DatabaseError> {
        let update = update.validate()?;
        if update.is_empty() {
            return self.get_task(task_id).await;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.clone().into());
            idx += 1;
        }
        if let Some(ref why) = update.why {
            sets.push(format!("why = ?{idx}"));
            params.push(why.clone().into());
            idx += 1;
        }
        if let Some(urgency) = update.urgency {
            sets.push(format!("urgency = ?{idx}"));
            params.push(urgency.as_str().into());
            idx += 1;
        }
        if let Some(section) = update.section {
            sets.push(format!("section = ?{idx}"));
            params.push(section.as_str().into());
            idx += 1;
        }
        if let Some(ref planned_date) = update.planned_date {
            sets.push(format!("planned_date = ?{idx}"));
            params.push(
                encode_optional_datetime(planned_date.as_ref())
                    .map_or(libsql::Value::Null, Into::into),
            );
            idx += 1;
        }
        if let Some(ref regularity) = update.regularity {
            sets.push(format!("regularity = ?{idx}"));
            params.push(
                encode_regularity(regularity.as_deref())?.map_or(libsql::Value::Null, Into::into),
            );
            idx += 1;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;

        params.push(task_id.into());
        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ?{idx} RETURNING {SELECT_COLS}",
            sets.join(", ")
        );
        let task = self
            .update_returning(task_id, &sql, libsql::params_from_iter(params))
            .await?;

        tracing::debug!(task_id, "task updated");
        Ok(task)
    }

    /// Mark a task deleted. The row and its section are kept.
    pub async fn delete_task(&self, task_id: &str) -> Result<(), DatabaseError> {
        let changed = self.db().conn().execute(
            "UPDATE tasks SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
            libsql::params![Utc::now().to_rfc3339(), task_id],
        ).await?;
        if changed == 0 {
            return Err(CoreError::task_not_found(task_id).into());
        }

        tracing::debug!(task_id, "task soft-deleted");
        Ok(())
    }

    /// Move a task to `done` and stamp `completed_at` with the current time.
    pub async fn complete_task(&self, task_id: &str) -> Result<Task, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let task = self
            .update_returning(
                task_id,
                &format!(
                    "UPDATE tasks SET section = ?1, completed_at = ?2, updated_at = ?2
                     WHERE id = ?3 RETURNING {SELECT_COLS}"
                ),
                libsql::params![Section::Done.as_str(), now, task_id],
            )
            .await?;

        tracing::debug!(task_id, "task completed");
        Ok(task)
    }

    /// Move a task to `active`. `completed_at` is left as it was.
    pub async fn activate_task(&self, task_id: &str) -> Result<Task, DatabaseError> {
        let task = self
            .update_returning(
                task_id,
                &format!(
                    "UPDATE tasks SET section = ?1, updated_at = ?2
                     WHERE id = ?3 RETURNING {SELECT_COLS}"
                ),
                libsql::params![Section::Active.as_str(), Utc::now().to_rfc3339(), task_id],
            )
            .await?;

        tracing::debug!(task_id, "task activated");
        Ok(task)
    }

    /// Run a single-row `UPDATE ... RETURNING` and decode the row it wrote.
    async fn update_returning(
        &self,
        task_id: &str,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Task, DatabaseError> {
        let mut rows = self.db().conn().query(sql, params).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::task_not_found(task_id))?;
        row_to_task(&row)
    }

    /// List a section as of the local calendar date.
    pub async fn list_section(&self, section: Section) -> Result<Vec<Task>, DatabaseError> {
        self.list_section_on(section, Local::now().date_naive()).await
    }

    /// Non-deleted tasks stored under `section`. The active list also gets
    /// done tasks recurring on `today`, appended after the stored ones.
    pub async fn list_section_on(
        &self,
        section: Section,
        today: NaiveDate,
    ) -> Result<Vec<Task>, DatabaseError> {
        let mut tasks = self.query_tasks(&TaskFilter::listed_in(section)).await?;
        if section == Section::Active {
            tasks.extend(self.recurring_due_on(today).await?);
        }
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{ids, test_service};
    use crate::updates::task::TaskUpdateBuilder;
    use chrono::Duration;
    use focus_core::enums::Urgency;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_task_roundtrip() {
        let svc = test_service().await;

        let task = svc
            .create_task(NewTask::new("Write report", "Due Friday").urgency(Urgency::High))
            .await
            .unwrap();

        assert!(task.id.starts_with("tsk-"));
        assert_eq!(task.section, Section::Active);
        assert_eq!(task.urgency, Urgency::High);
        assert_eq!(task.completed_at, None);
        assert!(!task.is_deleted);

        let fetched = svc.get_task(&task.id).await.unwrap();
        assert_eq!(fetched.title, "Write report");
        assert_eq!(fetched.why, "Due Friday");
        assert_eq!(fetched.created_at.timestamp(), task.created_at.timestamp());
    }

    #[tokio::test]
    async fn create_task_ids_are_unique() {
        let svc = test_service().await;
        let a = svc.create_task(NewTask::new("A", "a")).await.unwrap();
        let b = svc.create_task(NewTask::new("B", "b")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn create_task_rejects_missing_why() {
        let svc = test_service().await;
        let result = svc.create_task(NewTask::new("No reason", "")).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Core(CoreError::Validation(_)))
        ));
        assert!(svc.query_tasks(&TaskFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_missing_task_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_task("nonexistent-id").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("nonexistent-id"));
    }

    #[tokio::test]
    async fn update_task_partial() {
        let svc = test_service().await;
        let planned = Utc::now() + Duration::days(3);
        let task = svc
            .create_task(NewTask::new("Original", "Reason").planned_date(planned))
            .await
            .unwrap();

        let update = TaskUpdateBuilder::new()
            .title("Renamed")
            .section(Section::Future)
            .build();
        let updated = svc.update_task(&task.id, update).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.section, Section::Future);
        assert_eq!(updated.why, "Reason");
        assert_eq!(
            updated.planned_date.map(|d| d.timestamp()),
            Some(planned.timestamp())
        );
    }

    #[tokio::test]
    async fn update_task_clears_nullable_fields() {
        let svc = test_service().await;
        let task = svc
            .create_task(
                NewTask::new("Gym", "Health")
                    .planned_date(Utc::now())
                    .regularity(vec![Weekday::Tu]),
            )
            .await
            .unwrap();

        let update = TaskUpdateBuilder::new()
            .planned_date(None)
            .regularity(None)
            .build();
        let updated = svc.update_task(&task.id, update).await.unwrap();
        assert_eq!(updated.planned_date, None);
        assert_eq!(updated.regularity, None);
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found() {
        let svc = test_service().await;
        let update = TaskUpdateBuilder::new().title("x").build();
        let err = svc.update_task("tsk-missing", update).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_update_returns_current_record() {
        let svc = test_service().await;
        let task = svc.create_task(NewTask::new("Same", "Same")).await.unwrap();
        let unchanged = svc
            .update_task(&task.id, TaskUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged.title, "Same");
        assert_eq!(unchanged.updated_at, task.updated_at);

        let err = svc
            .update_task("tsk-missing", TaskUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn lifecycle_returns_the_row_it_wrote() {
        let svc = test_service().await;
        let task = svc
            .create_task(NewTask::new("Echo", "Check").section(Section::Future))
            .await
            .unwrap();

        let updated = svc
            .update_task(&task.id, TaskUpdateBuilder::new().urgency(Urgency::Critical).build())
            .await
            .unwrap();
        assert_eq!(updated.urgency, Urgency::Critical);
        assert_eq!(updated.section, Section::Future);
        assert!(updated.updated_at >= task.updated_at);

        let done = svc.complete_task(&task.id).await.unwrap();
        assert_eq!(done.urgency, Urgency::Critical);
        assert_eq!(done.updated_at, done.completed_at.unwrap());

        let active = svc.activate_task(&task.id).await.unwrap();
        assert_eq!(active, svc.get_task(&task.id).await.unwrap());
    }

    #[tokio::test]
    async fn put_task_inserts_then_replaces() {
        let svc = test_service().await;
        let mut task = svc.create_task(NewTask::new("Put", "Me")).await.unwrap();

        task.title = "Replaced".to_string();
        task.section = Section::Done;
        task.completed_at = Some(Utc::now());
        svc.put_task(&task).await.unwrap();

        let fetched = svc.get_task(&task.id).await.unwrap();
        assert_eq!(fetched.title, "Replaced");
        assert_eq!(fetched.section, Section::Done);
        assert!(fetched.completed_at.is_some());

        let mut copy = fetched.clone();
        copy.id = "tsk-manual0000000001".to_string();
        svc.put_task(&copy).await.unwrap();
        assert_eq!(svc.query_tasks(&TaskFilter::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn complete_sets_done_and_timestamp() {
        let svc = test_service().await;
        let task = svc.create_task(NewTask::new("Finish", "Now")).await.unwrap();

        let first = svc.complete_task(&task.id).await.unwrap();
        assert_eq!(first.section, Section::Done);
        let first_at = first.completed_at.expect("completed_at should be set");

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let second = svc.complete_task(&task.id).await.unwrap();
        assert_eq!(second.section, Section::Done);
        let second_at = second.completed_at.expect("completed_at should be set");
        assert!(second_at > first_at, "{second_at} should be after {first_at}");

        let stored = svc.get_task(&task.id).await.unwrap();
        assert_eq!(stored.completed_at, Some(second_at));
    }

    #[tokio::test]
    async fn activate_keeps_completed_at() {
        let svc = test_service().await;
        let task = svc.create_task(NewTask::new("Again", "Again")).await.unwrap();
        let done = svc.complete_task(&task.id).await.unwrap();

        let active = svc.activate_task(&task.id).await.unwrap();
        assert_eq!(active.section, Section::Active);
        assert_eq!(active.completed_at, done.completed_at);
    }

    #[tokio::test]
    async fn lifecycle_on_missing_task_is_not_found() {
        let svc = test_service().await;
        assert!(svc.complete_task("tsk-missing").await.unwrap_err().is_not_found());
        assert!(svc.activate_task("tsk-missing").await.unwrap_err().is_not_found());
        assert!(svc.delete_task("tsk-missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn delete_is_soft() {
        let svc = test_service().await;
        let task = svc
            .create_task(NewTask::new("Drop", "Obsolete").section(Section::Future))
            .await
            .unwrap();

        svc.delete_task(&task.id).await.unwrap();

        let stored = svc.get_task(&task.id).await.unwrap();
        assert!(stored.is_deleted);
        assert_eq!(stored.section, Section::Future);
        for section in Section::ALL {
            let listed = svc.list_section(section).await.unwrap();
            assert!(!ids(&listed).contains(&task.id.as_str()));
        }
    }

    #[tokio::test]
    async fn list_section_filters_by_section() {
        let svc = test_service().await;
        let active = svc.create_task(NewTask::new("A", "a")).await.unwrap();
        let future = svc
            .create_task(NewTask::new("B", "b").section(Section::Future))
            .await
            .unwrap();

        let future_list = svc.list_section(Section::Future).await.unwrap();
        assert_eq!(ids(&future_list), vec![future.id.as_str()]);

        let active_list = svc.list_section(Section::Active).await.unwrap();
        assert_eq!(ids(&active_list), vec![active.id.as_str()]);
    }

    #[tokio::test]
    async fn list_section_keeps_storage_order() {
        let svc = test_service().await;
        let mut expected = Vec::new();
        for title in ["first", "second", "third"] {
            expected.push(svc.create_task(NewTask::new(title, "w")).await.unwrap().id);
        }
        let listed = svc.list_section(Section::Active).await.unwrap();
        assert_eq!(ids(&listed), expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn regularity_roundtrip() {
        let svc = test_service().await;
        let days = vec![Weekday::Mo, Weekday::We, Weekday::Fr];
        let task = svc
            .create_task(NewTask::new("Run", "Cardio").regularity(days.clone()))
            .await
            .unwrap();

        let fetched = svc.get_task(&task.id).await.unwrap();
        assert_eq!(fetched.regularity, Some(days));
    }
}
