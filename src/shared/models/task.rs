use chrono::{DateTime, Utc};

use crate::{task_priority::TaskPriority, task_status::TaskStatus};

pub type TaskId = i32;

/// A stored task. `id` and `created_at` never change once assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a task that has not been stored yet.
/// Omitted `status` and `priority` take their defaults at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update of a task. `None` leaves the stored value untouched;
/// `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl Task {
    pub fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        let TaskPatch {
            title,
            description,
            status,
            priority,
            due_date,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }

        self.touch(now);
    }

    pub fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        self.status = status;
        self.touch(now);
    }

    // updated_at must never precede created_at, even if the clock steps back.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_task() -> Task {
        let created = Utc::now();
        Task {
            id: 7,
            title: "Write report".into(),
            description: Some("quarterly numbers".into()),
            status: TaskStatus::Pending,
            priority: TaskPriority::Low,
            due_date: Some(created + Duration::days(3)),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn apply_only_touches_provided_fields() {
        let mut task = sample_task();
        let before = task.clone();
        let later = task.created_at + Duration::seconds(5);

        task.apply(
            TaskPatch {
                title: Some("Write annual report".into()),
                ..TaskPatch::default()
            },
            later,
        );

        assert_eq!(task.title, "Write annual report");
        assert_eq!(task.description, before.description);
        assert_eq!(task.status, before.status);
        assert_eq!(task.priority, before.priority);
        assert_eq!(task.due_date, before.due_date);
        assert_eq!(task.created_at, before.created_at);
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn apply_can_clear_nullable_fields() {
        let mut task = sample_task();
        task.apply(
            TaskPatch {
                description: Some(None),
                due_date: Some(None),
                ..TaskPatch::default()
            },
            Utc::now(),
        );

        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn set_status_changes_status_and_updated_at_only() {
        let mut task = sample_task();
        let before = task.clone();
        let later = task.created_at + Duration::minutes(1);

        task.set_status(TaskStatus::Completed, later);

        let expected = Task {
            status: TaskStatus::Completed,
            updated_at: later,
            ..before
        };
        assert_eq!(task, expected);
    }

    #[test]
    fn updated_at_never_precedes_created_at() {
        let mut task = sample_task();
        let earlier = task.created_at - Duration::hours(1);

        task.set_status(TaskStatus::InProgress, earlier);

        assert_eq!(task.updated_at, task.created_at);
    }
}
