use crate::{task_priority::TaskPriority, task_status::TaskStatus};

/// Exact-match filters for listing tasks. `None` fields do not filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}
