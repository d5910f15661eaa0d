pub mod app;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod lock;
pub mod logging;
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary and other integrations.
pub fn run() -> AppResult<()> {
    logging::init();
    let startup = app::StartupConfig::from_args();
    tracing::info!(?startup, "starting presslock");

    if startup.check_config {
        let config = config::check_app_config()?;
        tracing::info!(?config, "config is valid");
        return Ok(());
    }

    let app = app::App::new(config::load_app_config());
    app.start()?;

    tracing::info!(locked = app.lock().read(), "shutdown complete");
    Ok(())
}
