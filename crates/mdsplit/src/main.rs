//! mdsplit CLI - split markdown documents into hierarchical sections.
//!
//! Provides commands for:
//! - `split`: Split a file or stdin and print the sections
//! - `serve`: Start the HTTP / JSON-RPC service

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ServeArgs, SplitArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// mdsplit - split markdown into hierarchical sections.
#[derive(Parser)]
#[command(name = "mdsplit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a markdown document into sections.
    Split(SplitArgs),
    /// Start the split service.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Split(args) => args.execute(),
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(VERSION)),
            Err(e) => Err(e.into()),
        },
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Build the log filter.
///
/// `--verbose` enables INFO; otherwise `RUST_LOG`, then `LOG_LEVEL`, then WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| level_directive(&level))
            .unwrap_or("warn");
        EnvFilter::new(level)
    })
}

/// Map a `LOG_LEVEL` value to a tracing level directive.
fn level_directive(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some("trace"),
        "DEBUG" => Some("debug"),
        "INFO" => Some("info"),
        "WARN" | "WARNING" => Some("warn"),
        "ERROR" | "CRITICAL" => Some("error"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("debug"), Some("debug"));
        assert_eq!(level_directive("WARNING"), Some("warn"));
        assert_eq!(level_directive(" Critical "), Some("error"));
        assert_eq!(level_directive("verbose"), None);
    }

    #[test]
    fn test_parse_split_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["mdsplit", "split"]).unwrap();
        assert!(matches!(cli.command, Commands::Split(_)));
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from(["mdsplit", "serve", "--port", "9000", "--verbose"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert!(args.verbose);
    }
}
