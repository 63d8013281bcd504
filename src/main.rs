// src/main.rs

use tokio::net::TcpListener;

use angaza_backend::{config::AppState, routes::create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new().await?;
    let app = create_router(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
