//! Warden API server binary.
//!
//! Connects the configured store once, runs migrations, seeds the admin
//! account and serves the HTTP API until interrupted.

use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use warden_core::auth::jwt::resolve_jwt_secret;
use warden_core::seed::{AdminSeed, seed_admin};
use warden_core::store::{StoreDriver, StorePool};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "warden_server", about = "Warden user account API server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Backing store dialect: postgres, mysql or memory.
    #[arg(long, env = "DB_TYPE", default_value = "postgres")]
    db_type: StoreDriver,

    /// Store connection URL / DSN. Ignored for the in-memory store.
    #[arg(
        long,
        env = "DB_DSN",
        default_value = "postgres://localhost:5432/warden"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Seconds to wait for a pooled connection before failing the request.
    #[arg(long, default_value_t = 30)]
    acquire_timeout_secs: u64,

    /// Seconds before an in-flight request is aborted.
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,

    /// Issuer embedded in every token.
    #[arg(long, env = "JWT_ISSUER", default_value = "warden")]
    jwt_issuer: String,

    /// Do not create the bootstrap admin user.
    #[arg(long, default_value_t = false)]
    skip_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if dotenvy::dotenv().is_err() {
        eprintln!("no .env file found, relying on environment variables");
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
                tracing_subscriber::EnvFilter::try_new("info,warden_api=debug,warden_core=debug")
            })?,
        )
        .init();

    let args = Args::parse();
    let driver = args.db_type;

    info!(
        driver = %driver,
        max_connections = args.max_connections,
        "connecting to store"
    );
    let pool = StorePool::connect(
        driver,
        &args.database_url,
        args.max_connections,
        Duration::from_secs(args.acquire_timeout_secs),
    )
    .await?;

    info!("running database migrations");
    warden_core::migrate::migrate(&pool).await?;

    let config = warden_api::config::ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        db_driver: driver,
        database_url: args.database_url,
        jwt_secret: resolve_jwt_secret(),
        jwt_issuer: args.jwt_issuer,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    };

    let state = warden_api::AppState::new(pool.user_store(), config.clone());

    if args.skip_seed {
        warn!("skipping admin seed");
    } else {
        seed_admin(&state.accounts, &AdminSeed::from_env()).await?;
    }

    let app = warden_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
