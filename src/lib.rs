
//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
}

pub use web_api::routes::map_routes;
pub use web_api::controllers::*;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
}

pub use shared::models::*;
pub use shared::dto::*;
//---------------------------------------

//---------------------------------------
pub mod validation {
    pub mod validation_error;
    pub mod task_validation;
}

pub use validation::*;
//---------------------------------------

//---------------------------------------
pub mod services {
    pub mod task_service;
}

pub use services::*;
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_access_error;
    pub mod data_context;
    pub mod schema;
    pub mod task_row;
}

pub use data_access::*;
//---------------------------------------
