//! Per-platform parsers behind a closed registry.
//!
//! Dispatch is enum-based over [`Platform`] — no trait objects, mirroring
//! the one-`parse`-per-module layout. The registry is built once at
//! process start and passed by reference; it owns the shared HTTP clients
//! and composes canonical URL → fetch → parse.

pub mod boj;
pub mod codeforces;
pub mod hackerrank;
pub mod leetcode;
pub mod programmers;

use tracing::debug;

use crate::errors::{FetchError, ScrapeResult};
use crate::fetch::{FetchConfig, FetchPolicy};
use crate::types::{Platform, ProblemData};

/// Immutable platform → scraper registry.
///
/// HTML platforms go through the escalating [`FetchPolicy`]; LeetCode uses
/// its own GraphQL client (plain POST, no escalation observed to be
/// needed there).
#[derive(Debug, Clone)]
pub struct ScraperRegistry {
    policy: FetchPolicy,
    graphql: reqwest::Client,
}

impl ScraperRegistry {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let graphql = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let policy = FetchPolicy::new(config)?;
        Ok(Self { policy, graphql })
    }

    /// Fetch and normalize one problem: canonical URL → document → parse.
    ///
    /// Fetch and parse failures propagate unwrapped; converting them into
    /// "proceed without problem context" is the caller's job.
    pub async fn fetch_problem(
        &self,
        platform: Platform,
        problem_id: &str,
    ) -> ScrapeResult<ProblemData> {
        let url = platform.problem_url(problem_id);
        debug!(%platform, problem_id, %url, "fetching problem");

        match platform {
            Platform::LeetCode => leetcode::fetch(&self.graphql, problem_id).await,
            Platform::Boj => {
                let document = self.policy.fetch(&url).await?;
                Ok(boj::parse(&document, problem_id, &url)?)
            }
            Platform::Programmers => {
                let document = self.policy.fetch(&url).await?;
                Ok(programmers::parse(&document, problem_id, &url)?)
            }
            Platform::Codeforces => {
                let document = self.policy.fetch(&url).await?;
                Ok(codeforces::parse(&document, problem_id, &url)?)
            }
            Platform::HackerRank => {
                let document = self.policy.fetch(&url).await?;
                Ok(hackerrank::parse(&document, problem_id, &url)?)
            }
        }
    }
}
