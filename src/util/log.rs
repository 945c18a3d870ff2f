use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, LOG_ENV};

/// Logs go to a file in the data directory; the terminal belongs to the UI.
pub fn initialize_logging(config: &AppConfig) -> Result<()> {
    let directory = config.data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(config.log_path())?;

    let filter = EnvFilter::try_from_env(LOG_ENV.as_str())
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME"))));

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
