//! `mdsplit serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdsplit_config::{CliSettings, Config};
use mdsplit_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover mdsplit.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "MDSPLIT_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "MDSPLIT_PORT")]
    port: Option<u16>,

    /// Enable verbose output (request and tool call logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config file: {}", path.display()));
        }
        output.highlight(&format!(
            "Starting mdsplit server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Tool endpoint: {} (JSON-RPC, tool split_text)",
            config.server.mcp_path
        ));
        output.info("Split endpoint: /api/split");

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config).await?;

        Ok(())
    }
}
