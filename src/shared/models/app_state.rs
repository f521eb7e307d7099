use std::sync::Arc;

use crate::task_service::TaskService;

pub struct AppState {
    pub task_service: TaskService,
}

impl AppState {
    pub fn new(task_service: TaskService) -> SharedState {
        Arc::new(AppState { task_service })
    }
}

pub type SharedState = Arc<AppState>;
