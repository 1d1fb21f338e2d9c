//! Focus Cycle - A work/break focus timer driven over HTTP
//!
//! This is the main entry point for the focus-cycle application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_cycle::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{notification_log_task, phase_driver_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_cycle={},tower_http=info", config.log_level()))
        .init();

    // Reject bad durations before anything can be armed
    let cycle_config = config.cycle_config()?;

    info!("Starting focus-cycle server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, work={}min, short break={}min, long break={}min, long break every {} intervals",
          config.host, config.port, cycle_config.work_minutes(), cycle_config.short_break_minutes(),
          cycle_config.long_break_minutes(), cycle_config.work_intervals_per_long_break());

    // Create application state
    let (state, timer_rx) = AppState::new(cycle_config, config.port, config.host.clone());
    let state = Arc::new(state);

    // Deliver countdown events to the phase controller
    tokio::spawn(phase_driver_task(Arc::clone(&state), timer_rx));

    // Render notifications to the log
    tokio::spawn(notification_log_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /cycle       - Start a focus cycle");
    info!("  POST /work        - Start a single work interval");
    info!("  POST /short-break - Start a short break");
    info!("  POST /long-break  - Start a long break");
    info!("  POST /pause       - Pause the countdown");
    info!("  POST /resume      - Resume the countdown");
    info!("  POST /finish      - Finish the current phase now");
    info!("  POST /continue    - Continue with the next work interval");
    info!("  POST /decline     - Stop after the break");
    info!("  GET  /status      - Current phase, counters and remaining time");
    info!("  GET  /events      - Server-sent notification stream");
    info!("  GET  /health      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
