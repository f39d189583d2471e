//! Weekly recurrence selection.
//!
//! A done task whose regularity set contains today's weekday is shown in the
//! active list again. Its stored section and `completed_at` stay untouched;
//! the next `complete` call simply refreshes the timestamp.

use chrono::NaiveDate;

use focus_core::entities::Task;
use focus_core::enums::{Section, Weekday};

use crate::error::DatabaseError;
use crate::repos::task::TaskFilter;
use crate::service::FocusService;

impl FocusService {
    /// Non-deleted done tasks that recur on the weekday of `date`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` with `CoreError::Internal` if the date
    /// cannot be mapped to a weekday tag, or a storage error from the query.
    pub async fn recurring_due_on(&self, date: NaiveDate) -> Result<Vec<Task>, DatabaseError> {
        let day = Weekday::for_date(date)?;
        let filter = TaskFilter {
            section: Some(Section::Done),
            is_deleted: Some(false),
            recurs_on: Some(day),
        };
        let tasks = self.query_tasks(&filter).await?;
        tracing::debug!(%date, %day, matches = tasks.len(), "recurring tasks due");
        Ok(tasks)
    }
}
