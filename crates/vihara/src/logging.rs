//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::ViharaError;

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a `fmt` subscriber for the process.
///
/// `RUST_LOG` wins when set and valid; otherwise `default_directive` is
/// used. Fails if a global subscriber is already installed.
pub fn init(default_directive: &str) -> Result<(), ViharaError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| ViharaError::Logging(e.to_string()))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| ViharaError::Logging(e.to_string()))
}
