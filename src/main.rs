use task_tracker::{
    app_state::AppState, data_context::DataContext, map_routes, settings::Settings,
    task_service::TaskService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_tracker=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── Store ──────────────────────────────────────────────────
    let settings = Settings::load()?;
    let data_context = DataContext::new(&settings.database_url, settings.database_max_connections)?;
    tracing::info!(database = %settings.database_url, "task store opened");

    // ── Shared state ───────────────────────────────────────────
    let state = AppState::new(TaskService::new(data_context));

    // ── Router ─────────────────────────────────────────────────
    let app = map_routes(state);

    // ── Start ──────────────────────────────────────────────────
    let address = settings.socket_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "task service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("task service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "cannot listen for shutdown signal");
    }
}
