use aurex::{api, config::Config, AppState};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aurex=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting Aurex server on {}:{}", config.host, config.port);

    let state = AppState::new(config);

    // Background alert evaluation loop
    if state.config.alert_check_secs > 0 {
        let alert_service = state.alert_service.clone();
        let interval = state.config.alert_check_secs;
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
                match alert_service.check().await {
                    Ok(triggered) if !triggered.is_empty() => {
                        info!("{} alert(s) triggered this cycle", triggered.len());
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Alert check cycle failed: {}", e),
                }
            }
        });
    } else {
        info!("Background alert checks disabled");
    }

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start the server
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Aurex server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
