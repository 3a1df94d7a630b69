//! CLI command implementations
//!
//! Each command loads configuration, installs logging, opens the database
//! and makes sure the schema exists before doing its own work.

use tracing::{info, warn};

use crate::config::Config;
use crate::http_server::{AppState, HttpServer};
use crate::observability::init_tracing;
use crate::store::Database;

use super::args::{Command, CommonArgs};
use super::errors::CliResult;

/// Run a parsed command on a fresh tokio runtime
pub fn run_command(command: Command) -> CliResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        match command {
            Command::Init { common } => init(&common).await,
            Command::Seed { common } => seed(&common).await,
            Command::Serve { common, port } => serve(&common, port).await,
        }
    })
}

/// Resolve configuration: file (or defaults), then command-line overrides
pub fn load_config(common: &CommonArgs, port: Option<u16>) -> CliResult<Config> {
    let mut config = match &common.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(url) = &common.database_url {
        config.database_url = url.clone();
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    config.validate()?;
    Ok(config)
}

async fn open(config: &Config) -> CliResult<Database> {
    init_tracing(&config.log_level, config.log_format)?;

    let db = Database::connect(&config.database_url, config.max_connections).await?;
    db.init_schema().await?;
    Ok(db)
}

/// Create the schema
pub async fn init(common: &CommonArgs) -> CliResult<()> {
    let config = load_config(common, None)?;
    let db = open(&config).await?;
    db.close().await;

    info!(database_url = %config.database_url, "schema initialized");
    Ok(())
}

/// Create the schema and load the demo data
pub async fn seed(common: &CommonArgs) -> CliResult<()> {
    let config = load_config(common, None)?;
    let db = open(&config).await?;

    let summary = db.seed().await?;
    db.close().await;

    info!(
        heroes = summary.heroes,
        powers = summary.powers,
        hero_powers = summary.hero_powers,
        "database seeded"
    );
    Ok(())
}

/// Serve HTTP until Ctrl-C
pub async fn serve(common: &CommonArgs, port: Option<u16>) -> CliResult<()> {
    let config = load_config(common, port)?;
    let db = open(&config).await?;

    let state = AppState::new(db.clone()).with_name_policy(config.name_policy());
    let server = HttpServer::with_config(config.server.clone(), state);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %server.socket_addr(),
        name_policy = ?config.name_policy(),
        "starting superheroes"
    );
    server.start(shutdown_signal()).await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl-C; shutting down"),
    }
}
