pub mod task;
pub mod task_status;
pub mod task_priority;
pub mod task_filter;
pub mod app_state;
pub mod settings;
