use serde::{Deserialize, Serialize};

use crate::{task_response::TaskResponse, task_service::TaskPage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
    pub pagination: PaginationResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResponse {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

impl From<TaskPage> for TaskListResponse {
    fn from(page: TaskPage) -> Self {
        TaskListResponse {
            tasks: page.tasks.into_iter().map(TaskResponse::from).collect(),
            pagination: PaginationResponse {
                page: page.page,
                per_page: page.per_page,
                total_pages: page.total_pages,
                total_items: page.total_items,
            },
        }
    }
}
