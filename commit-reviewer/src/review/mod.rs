//! Per-file review pipeline and comment aggregation.
//!
//! Flow per file:
//!   1) best-effort problem context (detect → scrape → README fallback);
//!   2) prompt assembly (system + user);
//!   3) LLM completion.
//!
//! A file whose completion fails still contributes a clearly labeled
//! error section to the aggregate comment — it is never silently dropped,
//! and it never aborts sibling files.

pub mod context;
pub mod llm;
pub mod prompt;

use tracing::{debug, warn};

use crate::config::ReviewConfig;
use crate::github::GitHubClient;
use llm::LlmClient;
use problem_scraper::ScraperRegistry;

/// Outcome of one file's pipeline.
#[derive(Debug, Clone)]
pub struct FileReview {
    pub path: String,
    /// Review markdown on success, failure reason otherwise.
    pub body: String,
    pub success: bool,
}

/// Run the full pipeline for a single changed file. Infallible by design:
/// errors become an unsuccessful [`FileReview`].
pub async fn review_file(
    github: &GitHubClient,
    registry: &ScraperRegistry,
    llm: &LlmClient,
    review_cfg: &ReviewConfig,
    path: &str,
    content: &str,
) -> FileReview {
    debug!(file = %path, "reviewing file");

    let problem_context = context::problem_context(github, registry, review_cfg, path, content)
        .await
        .unwrap_or_default();

    let system = prompt::system_prompt(&review_cfg.language);
    let user = prompt::user_prompt(&problem_context, content);

    match llm.generate_review(&system, &user).await {
        Ok(review) => FileReview {
            path: path.to_string(),
            body: review,
            success: true,
        },
        Err(e) => {
            warn!(file = %path, error = %e, "review generation failed");
            FileReview {
                path: path.to_string(),
                body: e.to_string(),
                success: false,
            }
        }
    }
}

/// Join per-file sections into the single commit comment.
pub fn aggregate_comment(reviews: &[FileReview], model_line: &str, language: &str) -> String {
    let sections: Vec<String> = reviews
        .iter()
        .map(|r| {
            if r.success {
                format!("## File: `{}`\n\n{}", r.path, r.body)
            } else {
                format!(
                    "## File: `{}`\n\nreview generation failed: {}",
                    r.path, r.body
                )
            }
        })
        .collect();

    let mut comment = sections.join("\n\n---\n\n");
    comment.push_str(&format!(
        "\n\n---\n*oj-mentor — automated review ({model_line}, language: {language})*"
    ));
    comment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(path: &str, body: &str) -> FileReview {
        FileReview {
            path: path.to_string(),
            body: body.to_string(),
            success: true,
        }
    }

    #[test]
    fn aggregates_sections_in_order() {
        let reviews = vec![ok("a.py", "review a"), ok("b.rs", "review b")];
        let comment = aggregate_comment(&reviews, "openai (gpt-4o)", "english");

        let a = comment.find("## File: `a.py`").unwrap();
        let b = comment.find("## File: `b.rs`").unwrap();
        assert!(a < b);
        assert!(comment.contains("review a"));
        assert!(comment.contains("openai (gpt-4o)"));
    }

    #[test]
    fn failed_files_get_a_labeled_error_section() {
        let reviews = vec![
            ok("good.py", "fine"),
            FileReview {
                path: "bad.py".to_string(),
                body: "llm api status 500: boom".to_string(),
                success: false,
            },
        ];
        let comment = aggregate_comment(&reviews, "m", "english");
        assert!(comment.contains("## File: `bad.py`"));
        assert!(
            comment.contains("review generation failed: llm api status 500: boom")
        );
        // The healthy sibling is still present.
        assert!(comment.contains("fine"));
    }
}
