//! OneTap SOS - An emergency toolkit shell with simulated telemetry
//!
//! This is the main entry point for the onetap-sos server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use onetap_sos::{
    api::create_router,
    config::Config,
    services::LogHaptics,
    state::AppState,
    tasks::battery_monitor_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("onetap_sos={},tower_http=info", config.log_level()))
        .init();

    info!("Starting onetap-sos server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, battery={}%, power_save={}",
          config.host, config.port, config.battery, config.power_save);
    match config.location_fix() {
        Some(fix) => info!("Simulated location fix: {:.4}, {:.4}", fix.latitude, fix.longitude),
        None => info!("No location fix configured, location services unsupported"),
    }

    // Create application state
    let state = AppState::new(
        config.settings(),
        config.location_provider(),
        Arc::new(LogHaptics),
    );

    // Start the battery monitor background task
    let battery_state = Arc::clone(&state);
    let battery_monitor = tokio::spawn(async move {
        battery_monitor_task(battery_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /shell           - Render the current view");
    info!("  POST /navigate/:view  - Switch to a panel");
    info!("  POST /back            - Return to the main view");
    info!("  POST /sos             - Trigger the SOS flow");
    info!("  GET  /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    battery_monitor.abort();
    // stop the SOS flow and unmount whatever panel is on screen
    if let Err(e) = state.shutdown() {
        tracing::warn!("Failed to stop background tasks on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
