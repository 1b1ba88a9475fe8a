use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::UniversityInfo;
use crate::storage::SqliteStore;
use crate::ui::Icons;

pub mod routes;

/// Server state shared by every request
pub struct AppState {
    pub store: SqliteStore,
    pub university: UniversityInfo,
}

/// Routes of the action webhook
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(routes::handle_webhook))
        .route("/actions", get(routes::list_actions))
        .route("/health", get(routes::health))
        .route("/stats", get(routes::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting action server on {}", addr);
    println!("{} Action server running at http://{}/webhook", Icons::GLOBE, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
