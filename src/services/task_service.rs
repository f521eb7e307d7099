use chrono::Utc;

use crate::{
    data_access_error::DataAccessError,
    data_context::DataContext,
    task::{NewTask, Task, TaskId, TaskPatch},
    task_filter::TaskFilter,
    task_row::NewTaskRow,
    task_status::TaskStatus,
};

pub type ServiceResult<T> = Result<T, DataAccessError>;

/// One page of a task listing with its totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

impl TaskPage {
    /// A page for a query that cannot match anything.
    pub fn empty(page: i64, per_page: i64) -> Self {
        TaskPage {
            tasks: Vec::new(),
            page,
            per_page,
            total_pages: 0,
            total_items: 0,
        }
    }
}

/// Task operations over the store. Holds no state besides the store handle;
/// "not found" is reported as `None` / `false`, store failures as errors.
#[derive(Clone)]
pub struct TaskService {
    data_context: DataContext,
}

impl TaskService {
    pub fn new(data_context: DataContext) -> Self {
        TaskService { data_context }
    }

    pub async fn create_task(&self, new_task: NewTask) -> ServiceResult<Task> {
        let row = NewTaskRow::new(new_task, Utc::now());
        let task = self.data_context.insert_task(row).await?;
        tracing::info!(task_id = task.id, status = %task.status, priority = %task.priority, "task created");
        Ok(task)
    }

    pub async fn get_task_by_id(&self, id: TaskId) -> ServiceResult<Option<Task>> {
        let task = self.data_context.get_task(id).await?;
        tracing::debug!(task_id = id, found = task.is_some(), "task lookup");
        Ok(task)
    }

    /// Expects `page >= 1` and `per_page` in 1..=100; the route layer clamps.
    pub async fn list_tasks(
        &self,
        page: i64,
        per_page: i64,
        filter: TaskFilter,
    ) -> ServiceResult<TaskPage> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let offset = (page - 1).saturating_mul(per_page);

        let (tasks, total_items) = self.data_context.list_tasks(filter, per_page, offset).await?;
        let total_pages = (total_items + per_page - 1) / per_page;

        tracing::debug!(page, per_page, total_items, returned = tasks.len(), "tasks listed");
        Ok(TaskPage {
            tasks,
            page,
            per_page,
            total_pages,
            total_items,
        })
    }

    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> ServiceResult<Option<Task>> {
        let Some(mut task) = self.data_context.get_task(id).await? else {
            return Ok(None);
        };

        task.apply(patch, Utc::now());
        let saved = self.data_context.save_task(&task).await?;
        if saved.is_some() {
            tracing::info!(task_id = id, "task updated");
        }
        Ok(saved)
    }

    pub async fn update_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> ServiceResult<Option<Task>> {
        let Some(mut task) = self.data_context.get_task(id).await? else {
            return Ok(None);
        };

        task.set_status(status, Utc::now());
        let saved = self.data_context.save_task(&task).await?;
        if saved.is_some() {
            tracing::info!(task_id = id, %status, "task status changed");
        }
        Ok(saved)
    }

    pub async fn delete_task(&self, id: TaskId) -> ServiceResult<bool> {
        let deleted = self.data_context.delete_task(id).await?;
        if deleted {
            tracing::info!(task_id = id, "task deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task_priority::TaskPriority;

    fn service() -> TaskService {
        TaskService::new(DataContext::in_memory().unwrap())
    }

    fn titled(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            ..NewTask::default()
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let service = service();

        let task = service.create_task(titled("Defaults")).await.unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = service();
        let created = service
            .create_task(NewTask {
                title: "Round trip".into(),
                description: Some("same on the way back".into()),
                priority: Some(TaskPriority::High),
                due_date: Some(Utc::now() + chrono::Duration::days(1)),
                ..NewTask::default()
            })
            .await
            .unwrap();

        let fetched = service.get_task_by_id(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn status_update_changes_only_status_and_updated_at() {
        let service = service();
        let created = service.create_task(titled("Status only")).await.unwrap();

        let updated = service
            .update_task_status(created.id, TaskStatus::Completed)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, TaskStatus::Completed);
        assert!(updated.updated_at >= created.updated_at);
        let expected = Task {
            status: updated.status,
            updated_at: updated.updated_at,
            ..created
        };
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn update_applies_patch_and_keeps_identity() {
        let service = service();
        let created = service.create_task(titled("Original")).await.unwrap();

        let updated = service
            .update_task(
                created.id,
                TaskPatch {
                    title: Some("Renamed".into()),
                    description: Some(Some("now described".into())),
                    ..TaskPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description.as_deref(), Some("now described"));
        assert_eq!(updated.priority, created.priority);
        assert_eq!(service.get_task_by_id(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn updates_of_unknown_ids_are_not_found() {
        let service = service();

        assert_eq!(service.update_task(41, TaskPatch::default()).await.unwrap(), None);
        assert_eq!(
            service.update_task_status(41, TaskStatus::Completed).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn delete_is_not_found_after_the_first_time() {
        let service = service();
        let task = service.create_task(titled("Delete me")).await.unwrap();

        assert!(service.delete_task(task.id).await.unwrap());
        assert_eq!(service.get_task_by_id(task.id).await.unwrap(), None);
        assert!(!service.delete_task(task.id).await.unwrap());
        assert!(!service.delete_task(task.id).await.unwrap());
    }

    #[tokio::test]
    async fn pagination_over_twenty_five_tasks() {
        let service = service();
        for i in 0..25 {
            service.create_task(titled(&format!("Task {i}"))).await.unwrap();
        }

        let mut sizes = Vec::new();
        for page in 1..=3 {
            let listed = service.list_tasks(page, 10, TaskFilter::default()).await.unwrap();
            assert_eq!(listed.total_pages, 3);
            assert_eq!(listed.total_items, 25);
            sizes.push(listed.tasks.len());
        }
        assert_eq!(sizes, [10, 10, 5]);

        let default_page = service.list_tasks(1, 20, TaskFilter::default()).await.unwrap();
        assert_eq!(default_page.tasks.len(), 20);
        assert_eq!(default_page.total_pages, 2);
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty_with_totals() {
        let service = service();
        for i in 0..3 {
            service.create_task(titled(&format!("Task {i}"))).await.unwrap();
        }

        let listed = service.list_tasks(9, 10, TaskFilter::default()).await.unwrap();

        assert!(listed.tasks.is_empty());
        assert_eq!(listed.total_items, 3);
        assert_eq!(listed.total_pages, 1);
        assert_eq!(listed.page, 9);
    }

    #[tokio::test]
    async fn empty_store_has_zero_pages() {
        let listed = service().list_tasks(1, 20, TaskFilter::default()).await.unwrap();
        assert_eq!(listed, TaskPage::empty(1, 20));
    }

    #[tokio::test]
    async fn status_filter_returns_only_matches_newest_first() {
        let service = service();
        for i in 0..9 {
            let status = match i % 3 {
                0 => TaskStatus::Pending,
                1 => TaskStatus::InProgress,
                _ => TaskStatus::Completed,
            };
            service
                .create_task(NewTask {
                    title: format!("Task {i}"),
                    status: Some(status),
                    ..NewTask::default()
                })
                .await
                .unwrap();
        }

        let filter = TaskFilter {
            status: Some(TaskStatus::Completed),
            priority: None,
        };
        let listed = service.list_tasks(1, 20, filter).await.unwrap();

        assert_eq!(listed.total_items, 3);
        assert!(listed.tasks.iter().all(|t| t.status == TaskStatus::Completed));
        assert!(listed
            .tasks
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at && pair[0].id > pair[1].id));
    }

    #[tokio::test]
    async fn priority_filter_combines_with_status() {
        let service = service();
        for (status, priority) in [
            (TaskStatus::Pending, TaskPriority::High),
            (TaskStatus::Pending, TaskPriority::Low),
            (TaskStatus::Completed, TaskPriority::High),
        ] {
            service
                .create_task(NewTask {
                    title: format!("{status} {priority}"),
                    status: Some(status),
                    priority: Some(priority),
                    ..NewTask::default()
                })
                .await
                .unwrap();
        }

        let listed = service
            .list_tasks(
                1,
                20,
                TaskFilter {
                    status: Some(TaskStatus::Pending),
                    priority: Some(TaskPriority::High),
                },
            )
            .await
            .unwrap();

        assert_eq!(listed.total_items, 1);
        assert_eq!(listed.tasks[0].title, "pending high");
    }
}
