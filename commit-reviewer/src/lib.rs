//! Public entry for the oj-mentor review pipeline.
//!
//! Single high-level function to run the whole pipeline for one commit.
//!
//! 1) **Step 1 — Provider I/O**
//!    - Fetch commit meta, diff against the first parent
//!    - Download raw contents of changed source files
//!
//! 2) **Step 2 — Clients**
//!    - Build the scraper registry (shared HTTP clients) and the LLM client
//!
//! 3) **Step 3 — Per-file fan-out**
//!    - One task per file: detect judge URL → scrape (→ README fallback)
//!      → prompt → LLM completion
//!    - Tasks are joined together; a failing file never aborts siblings
//!
//! 4) **Step 4 — Publish**
//!    - Aggregate per-file sections (reviews and labeled failures) into a
//!      single commit comment and post it
//!
//! The pipeline uses `tracing` for debug logging and avoids `async-trait`
//! and heap trait objects. Provider and LLM dispatch are enum-based.

pub mod config;
pub mod errors;
pub mod github;
pub mod review;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

pub use config::AppConfig;
use errors::{Error, MentorResult};
use github::GitHubClient;
use problem_scraper::{FetchConfig, ScraperRegistry};
use review::llm::LlmClient;

/// Final counters of one run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub files_seen: usize,
    pub reviews_generated: usize,
    pub failures: usize,
    pub comment_posted: bool,
}

/// Run the whole review pipeline for the configured commit.
///
/// Only configuration, commit retrieval and comment publishing can fail
/// the run; problem-info acquisition and individual review generation are
/// best-effort per file.
pub async fn run_review(cfg: AppConfig) -> MentorResult<RunSummary> {
    let t0 = Instant::now();

    debug!("step1: init github client");
    let github = Arc::new(GitHubClient::new(&cfg.github)?);

    debug!("step1: collect reviewable files");
    let files = github.reviewable_files().await?;
    info!(files = files.len(), "reviewable files collected");
    if files.is_empty() {
        return Ok(RunSummary {
            files_seen: 0,
            reviews_generated: 0,
            failures: 0,
            comment_posted: false,
        });
    }

    debug!("step2: build scraper registry and llm client");
    let registry = Arc::new(
        ScraperRegistry::new(FetchConfig::default())
            .map_err(|e| Error::Other(format!("http client setup failed: {e}")))?,
    );
    let llm = Arc::new(LlmClient::from_config(&cfg.llm)?);
    let review_cfg = Arc::new(cfg.review.clone());
    let model_line = llm.describe();

    debug!(files = files.len(), "step3: fan out per-file reviews");
    let mut tasks = Vec::with_capacity(files.len());
    for (path, content) in files {
        let github = Arc::clone(&github);
        let registry = Arc::clone(&registry);
        let llm = Arc::clone(&llm);
        let review_cfg = Arc::clone(&review_cfg);
        tasks.push(tokio::spawn(async move {
            review::review_file(&github, &registry, &llm, &review_cfg, &path, &content).await
        }));
    }

    let mut reviews = Vec::with_capacity(tasks.len());
    for task in tasks {
        let file_review = task
            .await
            .map_err(|e| Error::Other(format!("join error: {e}")))?;
        reviews.push(file_review);
    }
    let failures = reviews.iter().filter(|r| !r.success).count();
    debug!(
        drafted = reviews.len() - failures,
        failed = failures,
        "step3: per-file reviews done"
    );

    debug!("step4: aggregate and publish commit comment");
    let comment = review::aggregate_comment(&reviews, &model_line, &cfg.review.language);
    github.post_commit_comment(&comment).await?;

    info!(
        files = reviews.len(),
        failures,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "review run complete"
    );
    Ok(RunSummary {
        files_seen: reviews.len(),
        reviews_generated: reviews.len() - failures,
        failures,
        comment_posted: true,
    })
}
