//! CLI entrypoint for simbridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use simbridge_application::DeviceOperations;
use simbridge_infrastructure::{
    AllowList, ConfigLoader, FileConfig, JsonlInvocationLogger, ProcessCommandGateway,
    default_registry,
};
use simbridge_presentation::{Cli, Command, ConsoleFormatter, RequestHandler, server};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;

    init_logging(cli.verbose, &config)?;

    let allow_list = config
        .executables
        .to_allow_list()
        .context("Invalid executable allow-list")?;

    match cli.command() {
        Command::Check => check(&config, &allow_list),
        Command::Serve => serve(&config, allow_list).await,
    }
}

/// Logs never go to stdout, which carries the protocol.
fn init_logging(verbose: u8, config: &FileConfig) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.logging.log_directory() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "simbridge.log");
            builder.with_writer(appender).with_ansi(false).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

fn check(config: &FileConfig, allow_list: &AllowList) -> Result<()> {
    let entries = allow_list.inspect();
    println!("{}", ConsoleFormatter::check_report(&entries));
    println!("{}", ConsoleFormatter::config_summary(config));

    if !ConsoleFormatter::all_ready(&entries) {
        std::process::exit(1);
    }
    Ok(())
}

async fn serve(config: &FileConfig, allow_list: AllowList) -> Result<()> {
    info!("Starting simbridge {}", env!("CARGO_PKG_VERSION"));

    // === Dependency Injection ===
    let mut gateway = ProcessCommandGateway::new(allow_list)
        .with_max_output_bytes(config.gateway.max_output_bytes)
        .with_timeout(Some(config.gateway.timeout()));

    if let Some(path) = config.logging.audit_log_path() {
        match JsonlInvocationLogger::new(&path) {
            Some(logger) => {
                info!("Auditing invocations to {}", path.display());
                gateway = gateway.with_invocation_logger(Arc::new(logger));
            }
            None => warn!("Audit log {} could not be opened; continuing without it", path.display()),
        }
    }

    let ops = DeviceOperations::new(Arc::new(gateway));
    let registry = Arc::new(default_registry(ops));
    info!("Registered tools: {}", registry.names().join(", "));

    let handler = RequestHandler::new(registry);
    server::run(&handler, tokio::io::stdin(), tokio::io::stdout()).await?;

    info!("simbridge stopped");
    Ok(())
}
