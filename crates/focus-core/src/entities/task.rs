use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Section, Urgency, Weekday};

/// A unit of work listed under one section, optionally recurring weekly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub why: String,
    pub urgency: Urgency,
    pub section: Section,
    #[serde(rename = "plannedDate")]
    pub planned_date: Option<DateTime<Utc>>,
    /// Weekdays the task reappears as active once done. `None` means not recurring.
    pub regularity: Option<Vec<Weekday>>,
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
