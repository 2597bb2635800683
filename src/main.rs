use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tvdl::{
    args::Args,
    db_persistence::DbPersistence,
    errors::{AppError, AppResult},
    http_server::{self, AppState},
    metrics::Metrics,
    services::{
        annotator::{RandomUpsell, ShortcutPolicy},
        resolver::MediaResolver,
        twitter_client::TwitterApiClient,
    },
    Config,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();

    // Load configuration from --config path (defaults to config/default.toml)
    let mut config = Config::load(&args.config).map_err(AppError::Config)?;

    // Apply CLI overrides
    if let Some(bearer_token) = args.bearer_token {
        config.twitter.bearer_token = bearer_token;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.data.database_url = database_url;
    }

    init_logging(&config.logging.level)?;

    info!("🚀 Starting {} v{}", tvdl::NAME, tvdl::VERSION);
    info!("Configuration loaded from: {}", args.config);
    info!(
        "Shortcut versions: minimum {}, latest {}",
        config.shortcut.minimum_version, config.shortcut.latest_version
    );

    let db = DbPersistence::new(config.get_database_url()).await?;
    info!("Database connected, migrations applied");

    let twitter_client = TwitterApiClient::new(&config.twitter, config.get_twitter_timeout())?;
    let shortcut = ShortcutPolicy::new(&config.shortcut).map_err(|e| AppError::Server(e.to_string()))?;
    let upsell = RandomUpsell::new(&config.upsell);

    let resolver = MediaResolver::new(
        Arc::new(twitter_client),
        Arc::new(db.request_counters.clone()),
        Arc::new(db.error_logs.clone()),
        shortcut,
        Arc::new(upsell),
    );

    let state = AppState {
        resolver: Arc::new(resolver),
        metrics: Arc::new(Metrics::new()),
    };

    let server_address = config.get_server_address();
    info!("🎯 tvdl is now running!");
    info!("HTTP API available at: http://{}", server_address);

    http_server::start_server(state, &server_address)
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

fn init_logging(level: &str) -> AppResult<()> {
    let log_level = match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => {
            eprintln!("Invalid log level: {}, defaulting to info", level);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tvdl={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    Ok(())
}
