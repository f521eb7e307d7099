pub mod api_error;
pub mod task_controller;
