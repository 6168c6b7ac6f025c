use anyhow::{Context as _, Result};
use clap::Parser;
use std::sync::Arc;
use tarefad::{config::AppConfig, rest, storage::MongoStore, AppContext};
use tracing::info;

#[derive(Parser)]
#[command(name = "tarefad", about = "Tarefad — to-do task CRUD API", version)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI")]
    mongodb_uri: Option<String>,

    /// Database holding the tasks collection
    #[arg(long, env = "MONGODB_DB")]
    db_name: Option<String>,

    /// Origin allowed to make cross-origin requests
    #[arg(long, env = "ALLOWED_ORIGIN")]
    allowed_origin: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TAREFAD_LOG")]
    log: Option<String>,

    /// Log format: "pretty" (default) or "json"
    #[arg(long, env = "TAREFAD_LOG_FORMAT")]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(
        args.log.as_deref().unwrap_or("info"),
        args.log_format.as_deref().unwrap_or("pretty"),
    );

    let config = Arc::new(AppConfig::new(
        args.port,
        args.mongodb_uri,
        args.db_name,
        args.allowed_origin,
    ));

    let store = MongoStore::connect(&config.mongodb_uri, &config.db_name)
        .await
        .context("failed to connect to MongoDB")?;
    info!("connected to MongoDB (db = {})", config.db_name);

    let ctx = Arc::new(AppContext::new(config, Arc::new(store)));
    rest::start_rest_server(ctx).await
}

/// Initialize the tracing subscriber. `log_format` may be `"pretty"`
/// (human-readable compact output) or `"json"` (structured JSON for log
/// aggregators).
fn setup_logging(log_level: &str, log_format: &str) {
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(log_level)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .compact()
            .init();
    }
}
