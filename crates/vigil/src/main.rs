//! Vigil uptime-monitor binary.

use vigil::{Config, Engine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Tracing is not initialized yet.
            eprintln!("Configuration error: {e}");
            eprintln!("Using default configuration");
            Config::default()
        }
    };

    let level = config.logging.level.as_deref().unwrap_or("info");
    match config.logging.format.as_deref() {
        Some("json") => common::logging::init_json(level),
        _ => common::logging::init(level),
    }

    tracing::info!("Vigil uptime monitor starting");

    Engine::new(config).run().await?;

    Ok(())
}
