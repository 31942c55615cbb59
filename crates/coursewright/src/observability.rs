//! Tracing subscriber setup for the binary.

use coursewright_error::{ConfigError, CourseResult};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. With `json` set,
/// events are written as one JSON object per line.
pub fn init_logging(json: bool) -> CourseResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| ConfigError::new(format!("Failed to initialize logging: {}", e)).into())
}
