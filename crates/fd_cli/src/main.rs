use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fd_core::{Result, UserConfig};
use fd_pipeline::{MailerConfig, Pipeline, Scheduler, SmtpNotifier};
use fd_scrapers::FolhaScraper;
use fd_web::rate_limit::RateLimiter;
use fd_web::{create_app, AppState};

const DEFAULT_PORT: u16 = 3000;

/// Daily Folha de S.Paulo headline digest with an HTTP control API.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Port for the control API; falls back to the PORT environment variable
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let port = cli
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(DEFAULT_PORT);

    let mailer = MailerConfig::from_env()?;
    let config = Arc::new(RwLock::new(UserConfig::default()));

    let scraper = Arc::new(FolhaScraper::new());
    let notifier = Arc::new(SmtpNotifier::new(mailer));
    let pipeline = Arc::new(Pipeline::new(scraper, notifier, Arc::clone(&config)));

    let scheduler = Scheduler::new(Arc::clone(&pipeline), Arc::clone(&config));
    tokio::spawn(scheduler.run());
    info!("daily scheduler started");

    let state = AppState {
        config,
        pipeline,
        limiter: Mutex::new(RateLimiter::new(5, Duration::from_secs(60))),
    };
    let app = create_app(state).await;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("control API listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
