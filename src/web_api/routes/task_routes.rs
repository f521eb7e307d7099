use axum::{
    routing::{get, patch},
    Router,
};

use crate::{app_state::SharedState, task_controller::TaskController};

pub const ROUTER_PATH: &str = "/api/tasks";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(TaskController::get_all).post(TaskController::create))
        .route(
            format!("{}/:id", ROUTER_PATH).as_str(),
            get(TaskController::get)
                .put(TaskController::update)
                .delete(TaskController::delete),
        )
        .route(
            format!("{}/:id/status", ROUTER_PATH).as_str(),
            patch(TaskController::update_status),
        )
        .with_state(app_state)
}
