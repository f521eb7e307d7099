pub mod field;

// Requests
pub mod create_task_request;
pub mod update_task_request;
pub mod update_task_status_request;
pub mod list_tasks_query;

// Responses
pub mod task_response;
pub mod task_list_response;
pub mod message_response;
pub mod error_response;
