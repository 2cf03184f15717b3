use std::error::Error;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    // CI runs (GitHub Actions) pass everything through the real environment.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cfg = commit_reviewer::AppConfig::from_env()?;

    let summary = commit_reviewer::run_review(cfg).await?;
    info!(
        files = summary.files_seen,
        reviewed = summary.reviews_generated,
        failed = summary.failures,
        posted = summary.comment_posted,
        "run finished"
    );

    Ok(())
}
