use dotenvy::dotenv;
use tracing::info;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting transcode trigger...");

    let config = config::settings::AppConfig::new()
        .expect("VOD_SECRET_ID and VOD_SECRET_KEY must be set");
    let vod = infrastructure::vod::client::VodClient::new(&config)
        .expect("Failed to build VOD client");

    let port = config.server_port;
    let state = state::AppState::new(config, vod);

    let app = app::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await.unwrap();
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await.unwrap();
}
