//! Problem-context acquisition: detect → scrape → README fallback.
//!
//! Best-effort by contract. Every failure below is logged and converted
//! into "proceed without problem context"; nothing raises past the
//! per-file boundary.

use problem_scraper::{
    FormatOptions, ScrapeError, ScraperRegistry, detect_problem_url, format_problem,
    format_readme_problem, parse_readme_as_problem,
};
use tracing::{debug, info, warn};

use crate::config::ReviewConfig;
use crate::github::GitHubClient;

/// Build the formatted problem block for one reviewed file, if any source
/// of problem info pans out.
pub async fn problem_context(
    github: &GitHubClient,
    registry: &ScraperRegistry,
    review: &ReviewConfig,
    file_path: &str,
    content: &str,
) -> Option<String> {
    let (platform, problem_id) = match detect_problem_url(content) {
        Some(found) => found,
        None => {
            debug!(file = %file_path, "no judge url in content");
            return None;
        }
    };
    info!(file = %file_path, %platform, %problem_id, "detected problem reference");

    let opts = FormatOptions {
        max_description_len: review.max_description_len,
        include_examples: true,
    };

    match registry.fetch_problem(platform, &problem_id).await {
        Ok(problem) => return Some(format_problem(&problem, &opts)),
        Err(ScrapeError::UnsupportedPlatform(p)) => {
            // Same as a detection miss: nothing to scrape, nothing to fall
            // back to.
            debug!(file = %file_path, platform = %p, "no scraper wired for platform");
            return None;
        }
        Err(e) => warn!(file = %file_path, error = %e, "scrape failed, trying README fallback"),
    }

    match github.get_readme(file_path).await {
        Ok(Some(readme)) => {
            if let Some(recovered) = parse_readme_as_problem(&readme) {
                info!(file = %file_path, "problem info recovered from README");
                return Some(format_readme_problem(&recovered, &opts));
            }
            debug!(file = %file_path, "README does not match the problem convention");
        }
        Ok(None) => debug!(file = %file_path, "no README next to the file"),
        Err(e) => warn!(file = %file_path, error = %e, "README lookup failed"),
    }
    None
}
