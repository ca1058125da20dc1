use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use lapse_core::{LapseConfig, SystemClock};
use tokio::io::BufReader;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use lapse_session::{auth, shell, Session};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "lapse.toml")]
    config: String,

    #[arg(long, default_value = "guest@lapse.local")]
    email: String,

    #[arg(long, default_value = "")]
    password: String,

    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config; a missing file means defaults
    let config = if Path::new(&args.config).exists() {
        match LapseConfig::load(&args.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config from {}: {}", args.config, e);
                std::process::exit(1);
            }
        }
    } else {
        LapseConfig::default()
    };

    // Init logging on stderr; stdout carries responses
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let user = auth::login(&args.email, &args.password, args.name, Utc::now());
    let session = Session::start(user, &config, Arc::new(SystemClock)).await;

    let (tx, rx) = broadcast::channel(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                let _ = tx.send(());
            }
            Err(e) => tracing::warn!("Ctrl+C handler unavailable, serving until EOF: {}", e),
        }
    });

    let result = shell::run_shell(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &session,
        rx,
    )
    .await;

    session.logout().await;
    result?;

    Ok(())
}
