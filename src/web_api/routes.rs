pub mod task_routes;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app_state::SharedState;

pub fn map_routes(app_state: SharedState) -> Router {
    Router::new()
        .merge(task_routes::get_router(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
