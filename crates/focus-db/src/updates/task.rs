//! Task create payload and update builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use focus_core::enums::{Section, Urgency, Weekday};
use focus_core::errors::CoreError;
use focus_core::serde_helpers::double_option;
use focus_core::validation::{normalize_regularity, require_text};

/// Fields accepted when creating a task. `id` and `completedAt` are assigned
/// by the store and ignored if a client sends them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub section: Section,
    #[serde(default, rename = "plannedDate")]
    pub planned_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub regularity: Option<Vec<Weekday>>,
}

impl NewTask {
    #[must_use]
    pub fn new(title: impl Into<String>, why: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            why: why.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    #[must_use]
    pub fn planned_date(mut self, planned_date: DateTime<Utc>) -> Self {
        self.planned_date = Some(planned_date);
        self
    }

    #[must_use]
    pub fn regularity(mut self, days: Vec<Weekday>) -> Self {
        self.regularity = Some(days);
        self
    }

    /// Check required fields and normalise the regularity set.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first violated rule.
    pub fn validate(mut self) -> Result<Self, CoreError> {
        require_text("title", &self.title)?;
        require_text("why", &self.why)?;
        self.regularity = normalize_regularity(self.regularity);
        Ok(self)
    }
}

/// Partial task update. Outer `None` leaves a field untouched; for nullable
/// fields `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(
        default,
        rename = "plannedDate",
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub planned_date: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub regularity: Option<Option<Vec<Weekday>>>,
}

impl TaskUpdate {
    /// Whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.why.is_none()
            && self.urgency.is_none()
            && self.section.is_none()
            && self.planned_date.is_none()
            && self.regularity.is_none()
    }

    /// Check supplied fields and normalise the regularity set.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first violated rule.
    pub fn validate(mut self) -> Result<Self, CoreError> {
        if let Some(ref title) = self.title {
            require_text("title", title)?;
        }
        if let Some(ref why) = self.why {
            require_text("why", why)?;
        }
        self.regularity = self.regularity.map(normalize_regularity);
        Ok(self)
    }
}

pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn why(mut self, why: impl Into<String>) -> Self {
        self.0.why = Some(why.into());
        self
    }

    #[must_use]
    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.0.urgency = Some(urgency);
        self
    }

    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.0.section = Some(section);
        self
    }

    #[must_use]
    pub fn planned_date(mut self, planned_date: Option<DateTime<Utc>>) -> Self {
        self.0.planned_date = Some(planned_date);
        self
    }

    #[must_use]
    pub fn regularity(mut self, days: Option<Vec<Weekday>>) -> Self {
        self.0.regularity = Some(days);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}

impl Default for TaskUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
