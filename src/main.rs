use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blog_feed::config::{Config, LogFormat};
use blog_feed::controller::FeedController;
use blog_feed::fetcher::HttpFeedSource;
use blog_feed::render::render_document;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging, pretty when the config cannot be loaded
    let config = Config::from_env().context("Failed to load configuration");
    init_tracing(config.as_ref().map_or(LogFormat::Pretty, |c| c.log_format))?;

    // Validate configuration
    let config = config?;
    config.validate().context("Invalid configuration")?;

    info!(posts_url = %config.posts_url, comments_url = %config.comments_url, "Starting blog-feed");

    let source = HttpFeedSource::new(&config).context("Failed to create feed source")?;
    let mut controller = FeedController::with_preview_limit(source, config.comment_preview_limit);

    info!(delay = ?config.load_delay, "Loading feed");
    let loaded = controller.load().await.is_ready();
    let html = render_document(&controller, 0, config.posts_per_page).into_string();

    match &config.output_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), loaded, "Wrote feed");
        }
        None => println!("{html}"),
    }

    Ok(())
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blog_feed=debug"));

    match format {
        LogFormat::Json => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
        }
        LogFormat::Pretty => {
            // Pretty-printed logging for development
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
        }
    }

    Ok(())
}
