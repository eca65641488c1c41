//! CLI error types.

use mdsplit_config::ConfigError;
use mdsplit_sections::InputError;
use mdsplit_server::ServerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("Failed to encode sections: {0}")]
    Json(#[from] serde_json::Error),
}
