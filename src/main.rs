use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pageforge::data::HistorySnapshot;
use pageforge::generator::HttpContentGenerator;
use pageforge::history::HistoryService;
use pageforge::identity::{HttpIdentityProvider, IdentitySession};
use pageforge::store::HttpDocumentStore;
use pageforge::web::{run_server, ServerConfig, WebAppState};
use pageforge::{util, Config};

/// AI landing page builder server
#[derive(Debug, Parser)]
#[command(name = "pageforge", version, about)]
struct Cli {
    /// Host address to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Data directory (defaults to ~/.pageforge)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    util::init_data_dir(cli.data_dir);

    // Initialize logging to file (~/.pageforge/logs/pageforge.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    let mut config = Config::load();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let http = reqwest::Client::new();

    let provider = Arc::new(HttpIdentityProvider::new(
        http.clone(),
        config.identity_base_url.clone(),
    ));
    let session = IdentitySession::new(provider);

    let store = Arc::new(HttpDocumentStore::new(
        http.clone(),
        config.store_base_url.clone(),
    ));
    let history = Arc::new(HistoryService::new(
        session.clone(),
        store,
        HistorySnapshot::open_default(),
        Some(config.resolved_share_base_url()),
    ));

    let generator = Arc::new(HttpContentGenerator::new(
        http,
        config.generator_base_url.clone(),
        config.generator_model.clone(),
        config.generator_api_key.clone(),
    ));

    let state = WebAppState::new(session, history, generator);
    let server_config = ServerConfig {
        host: config.host.clone(),
        port: config.port,
        cors_permissive: true,
    };

    run_server(state, server_config).await
}
