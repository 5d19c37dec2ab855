mod error;
mod handlers;
mod models;
mod router;
mod state;

use router::create_router;
use state::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Commission Tracker API service");

    // Initialize application state (fresh in-memory ledger)
    let state = AppState::new();

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
