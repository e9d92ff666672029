//! Inventory Server - product catalog REST service

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, header};
use clap::{Args as ClapArgs, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::{Config, LoggingConfig};
use inventory_api::{AppState, create_router};
use inventory_db::{AnalyticsSource, Database, NoAnalytics, SqlViewAnalytics, apply_schema_file};

/// Inventory Server - product catalog backed by SQLite
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Database connection URL (overrides the config file)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve(ServeArgs),
    /// Apply the schema file to the database once, then exit
    InitDb {
        /// Schema file (defaults to database.schema_path)
        #[arg(long)]
        schema: Option<String>,
    },
}

#[derive(ClapArgs, Debug, Default)]
struct ServeArgs {
    /// Bind address
    #[arg(long, env = "INVENTORY_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "INVENTORY_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    // Initialize logging
    init_logging(&config.logging);

    match args.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(serve_args) => serve(config, serve_args).await,
        Command::InitDb { schema } => init_db(config, schema).await,
    }
}

/// Open the database, creating the parent directory of a file-backed URL
async fn open_database(config: &Config) -> Result<Database> {
    if let Some(path) = config.database.sqlite_file_path()
        && let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    Ok(Database::connect(&config.database.url, config.database.max_connections).await?)
}

/// `init-db`: apply the schema in one transaction and exit
async fn init_db(config: Config, schema: Option<String>) -> Result<()> {
    let schema = schema.unwrap_or_else(|| config.database.schema_path.clone());
    let db = open_database(&config).await?;

    let result = apply_schema_file(&db, &schema).await;
    db.close().await;

    match result {
        Ok(()) => {
            info!("Database initialized successfully");
            Ok(())
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            Err(e.into())
        }
    }
}

/// `serve`: run the HTTP API until shutdown
async fn serve(config: Config, args: ServeArgs) -> Result<()> {
    info!("Starting Inventory Server v{}", env!("CARGO_PKG_VERSION"));

    let db = open_database(&config).await?;

    if config.database.auto_init && !db.has_table("products").await? {
        info!("Products table missing, applying {}", config.database.schema_path);
        apply_schema_file(&db, &config.database.schema_path).await?;
    }

    let analytics: Arc<dyn AnalyticsSource> = match config.analytics.relation() {
        Some(relation) => {
            info!("Most-added analytics read from {}", relation);
            Arc::new(SqlViewAnalytics::new(db.clone(), relation)?)
        }
        None => Arc::new(NoAnalytics),
    };

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    // Create router
    let state = AppState::new(db.clone(), analytics);
    let app = create_router(state, Some(Arc::new(metrics_handle)))
        .layer(cors_layer(&config.server.cors_origins)?)
        .layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

/// Build the CORS layer; an empty list or `*` allows any origin
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Initialize logging
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.database.url = format!("sqlite:{}?mode=rwc", dir.join("nested/inventory.db").display());
        config.database.max_connections = 1;
        config
    }

    #[test]
    fn test_args_default_to_serve() {
        let args = Args::try_parse_from(["inventory-server"]).unwrap();
        assert!(args.command.is_none());

        let args = Args::try_parse_from(["inventory-server", "init-db", "--schema", "x.sql"]).unwrap();
        assert!(matches!(args.command, Some(Command::InitDb { schema: Some(ref s) }) if s == "x.sql"));
    }

    #[test]
    fn test_cors_layer() {
        assert!(cors_layer(&[]).is_ok());
        assert!(cors_layer(&["*".to_string()]).is_ok());
        assert!(cors_layer(&["http://localhost:3000".to_string()]).is_ok());
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }

    #[tokio::test]
    async fn test_init_db_applies_schema_once() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, inventory_db::DEFAULT_SCHEMA).unwrap();
        let schema = schema.to_str().unwrap().to_string();

        init_db(test_config(dir.path()), Some(schema.clone())).await.unwrap();

        let db = open_database(&test_config(dir.path())).await.unwrap();
        assert!(db.has_table("products").await.unwrap());
        db.close().await;

        // The schema is not idempotent: a second run fails
        assert!(init_db(test_config(dir.path()), Some(schema)).await.is_err());
    }

    #[tokio::test]
    async fn test_init_db_missing_schema_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.sql").to_str().unwrap().to_string();
        assert!(init_db(test_config(dir.path()), Some(missing)).await.is_err());
    }

    #[tokio::test]
    async fn test_init_db_with_empty_schema_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("empty.sql");
        std::fs::write(&schema, "-- nothing to apply yet
;
").unwrap();

        let result = init_db(test_config(dir.path()), Some(schema.to_str().unwrap().to_string())).await;
        assert!(result.is_ok());
    }
}
