use std::sync::Arc;

use clinic_tour::config::TourConfig;
use clinic_tour::store::{LibSqlBackend, SettingsStore};
use clinic_tour::tour::routes::{TourRouteState, tour_routes};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = TourConfig::from_env();

    eprintln!("🎀 Clinic Tour v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Tour API: http://0.0.0.0:{}/api/tour", config.port);

    // ── Database ─────────────────────────────────────────────────────────
    let store: Arc<dyn SettingsStore> = Arc::new(
        LibSqlBackend::new_local(&config.db_path)
            .await
            .unwrap_or_else(|e| {
                eprintln!(
                    "Error: Failed to open database at {}: {}",
                    config.db_path.display(),
                    e
                );
                std::process::exit(1);
            }),
    );
    eprintln!("   Database: {}", config.db_path.display());
    eprintln!(
        "   Auto-launch delay: {}ms\n",
        config.auto_launch_delay.as_millis()
    );

    let app = tour_routes(TourRouteState {
        store,
        auto_launch_delay: config.auto_launch_delay,
    })
    .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Tour server started");
    axum::serve(listener, app).await?;

    Ok(())
}
