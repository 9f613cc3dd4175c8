use parkwatch::db;
use parkwatch::db::services::ParkingService;
use parkwatch::server::config::ServerConfig;
use parkwatch::services::clock::SystemClock;
use parkwatch::version::VERSION;

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,
}

fn init_logging(log_dir: &str) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "server.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn,sqlx::query=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("Server version: {VERSION}");
        return Ok(());
    }

    let args = Args::parse();

    // Logging needs the configured directory, so a config failure can only go to stderr.
    let server_config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load server configuration: {e}");
            return Err(e.into());
        }
    };

    init_logging(&server_config.log_dir);
    info!("Starting server, version: {}", VERSION);

    // --- Store Setup ---
    let db_pool = match db::connect(&server_config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, path = %server_config.database_path, "Failed to open parking store.");
            return Err(e.into());
        }
    };
    if let Err(e) = db::initialize(&db_pool, server_config.total_slots).await {
        error!(error = %e, "Failed to initialize parking store.");
        return Err(e.into());
    }

    let parking_service = Arc::new(ParkingService::new(
        db_pool.clone(),
        Arc::new(SystemClock),
        server_config.rate_per_hour,
    ));

    // --- Axum HTTP Server Setup ---
    let app = parkwatch::web::create_axum_router(db_pool, parking_service, server_config.clone());

    let addr: SocketAddr = server_config.bind_address().parse()?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4()?
    } else {
        tokio::net::TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.set_keepalive(true)?;
    socket.bind(addr)?;
    let listener = socket.listen(1024)?;
    info!(
        address = %addr,
        total_slots = server_config.total_slots,
        rate_per_hour = server_config.rate_per_hour,
        "HTTP server listening"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Box::new)?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal.");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
