use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    api_error::ApiError,
    app_state::SharedState,
    create_task_request::CreateTaskRequest,
    list_tasks_query::ListTasksQuery,
    message_response::MessageResponse,
    task::TaskId,
    task_list_response::TaskListResponse,
    task_response::TaskResponse,
    task_service::TaskPage,
    task_validation,
    update_task_request::UpdateTaskRequest,
    update_task_status_request::UpdateTaskStatusRequest,
};

pub struct TaskController {}

// Ids that do not parse as integers cannot name a task.
fn task_id(path: Result<Path<TaskId>, PathRejection>) -> Result<TaskId, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

impl TaskController {
    #[tracing::instrument(skip_all)]
    pub async fn create(
        State(state): State<SharedState>,
        payload: Result<Json<CreateTaskRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
        let Json(body) = payload?;
        let new_task = task_validation::validate_create(body, Utc::now())?;
        let task = state.task_service.create_task(new_task).await?;
        Ok((StatusCode::CREATED, Json(task.into())))
    }

    #[tracing::instrument(skip_all)]
    pub async fn get(
        State(state): State<SharedState>,
        path: Result<Path<TaskId>, PathRejection>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        let id = task_id(path)?;
        match state.task_service.get_task_by_id(id).await? {
            Some(task) => Ok(Json(task.into())),
            None => Err(ApiError::NotFound),
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn get_all(
        State(state): State<SharedState>,
        query: Result<Query<ListTasksQuery>, QueryRejection>,
    ) -> Result<Json<TaskListResponse>, ApiError> {
        // An unreadable query string lists with default paging and no filters.
        let query = query.map(|Query(query)| query).unwrap_or_default();
        let page = query.page();
        let per_page = query.per_page();
        let listed = match query.filter() {
            Some(filter) => state.task_service.list_tasks(page, per_page, filter).await?,
            None => TaskPage::empty(page, per_page),
        };
        Ok(Json(listed.into()))
    }

    #[tracing::instrument(skip_all)]
    pub async fn update(
        State(state): State<SharedState>,
        path: Result<Path<TaskId>, PathRejection>,
        payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        let id = task_id(path)?;
        let Json(body) = payload?;
        let patch = task_validation::validate_update(body, Utc::now())?;
        match state.task_service.update_task(id, patch).await? {
            Some(task) => Ok(Json(task.into())),
            None => Err(ApiError::NotFound),
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn update_status(
        State(state): State<SharedState>,
        path: Result<Path<TaskId>, PathRejection>,
        payload: Result<Json<UpdateTaskStatusRequest>, JsonRejection>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        let id = task_id(path)?;
        let Json(body) = payload?;
        let status = task_validation::validate_status_update(body)?;
        match state.task_service.update_task_status(id, status).await? {
            Some(task) => Ok(Json(task.into())),
            None => Err(ApiError::NotFound),
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn delete(
        State(state): State<SharedState>,
        path: Result<Path<TaskId>, PathRejection>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let id = task_id(path)?;
        if state.task_service.delete_task(id).await? {
            Ok(Json(MessageResponse::new("Task deleted successfully")))
        } else {
            Err(ApiError::NotFound)
        }
    }
}
