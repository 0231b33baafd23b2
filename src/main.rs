//! HSM Visualiser API entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utoipa::OpenApi;

use hsm_visualiser_api::api::{router_from_config, ApiDoc, AppState};
use hsm_visualiser_api::config::{Config, LogFormat};
use hsm_visualiser_api::metrics;
use hsm_visualiser_api::utils::shutdown_signal;

/// HTTP backend for the Habitat Suitability Model visualiser.
#[derive(Parser, Debug)]
#[command(name = "hsm-visualiser-api")]
#[command(about = "API for Habitat Suitability Model Visualisation")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Address to bind (overrides HOST).
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to bind (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Print the OpenAPI document as JSON.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    match args.command {
        Some(Command::Openapi) => cmd_openapi(),
        Some(Command::CheckConfig) => cmd_check_config(&args),
        Some(Command::Serve) | None => cmd_serve(&args).await,
    }
}

/// Load configuration and apply CLI overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load()?;

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config.verbose |= args.verbose;

    Ok(config)
}

fn init_logging(config: &Config) {
    let filter = if config.verbose {
        EnvFilter::new("hsm_visualiser_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    match config.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
    }
}

/// Print the OpenAPI document.
fn cmd_openapi() -> anyhow::Result<()> {
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(args: &Args) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HSM VISUALISER API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match load_config(args) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}:{}", config.host, config.port);
    for origin in config.allowed_origins()? {
        println!("  CORS Origin: {}", origin);
    }
    println!("  Log Level: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!("  Verbose: {}", config.verbose);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the API until a shutdown signal arrives.
async fn cmd_serve(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args)?;

    init_logging(&config);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    info!("Configuration loaded successfully");
    info!("CORS origins: {:?}", config.allowed_origins()?);

    let handle = metrics::install_recorder()?;
    let router = router_from_config(&config, AppState::new(handle))?;

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        e
    })?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
