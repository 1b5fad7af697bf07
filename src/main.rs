use std::path::PathBuf;

use clap::Parser;
use taskboard_server::ServerConfig;
use taskboard_store::Database;

#[derive(Parser)]
#[command(name = "taskboard", about = "Task-tracking HTTP service")]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Path to the SQLite database file. Defaults to tasks.db next to the
    /// working directory.
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting taskboard server");

    let db_path = cli.db.unwrap_or_else(|| PathBuf::from("tasks.db"));
    let db = Database::open(&db_path).expect("Failed to open database");
    tracing::info!(path = %db_path.display(), "Database opened");

    let config = ServerConfig { port: cli.port };
    let _handle = taskboard_server::start(config, db)
        .await
        .expect("Failed to start server");

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl+c");

    tracing::info!("Shutting down");
}
