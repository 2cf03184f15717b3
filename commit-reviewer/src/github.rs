//! GitHub commit provider: changed files, sibling READMEs, commit comments.
//!
//! Endpoints used:
//! - GET  /repos/{repo}/commits/{sha}                 (meta + parents)
//! - GET  /repos/{repo}/compare/{parent}...{sha}      (changed files)
//! - GET  /repos/{repo}/contents/{path}?ref={sha}     (README lookup, raw media type)
//! - POST /repos/{repo}/commits/{sha}/comments        (publish review)

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GithubConfig;
use crate::errors::MentorResult;

/// Extensions we consider reviewable solution files.
const SOURCE_EXTENSIONS: &[&str] = &["c", "cpp", "cc", "cxx", "py", "java", "js", "go", "rs"];

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_api: String, // "https://api.github.com"
    token: String,
    repository: String, // "owner/repo"
    commit_sha: String,
}

impl GitHubClient {
    pub fn new(cfg: &GithubConfig) -> MentorResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent("oj-mentor/0.1")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_api: "https://api.github.com".to_string(),
            token: cfg.token.clone(),
            repository: cfg.repository.clone(),
            commit_sha: cfg.commit_sha.clone(),
        })
    }

    /// Collect the commit's reviewable files as `path -> content`.
    ///
    /// An initial commit (no parents) reviews its own file list; otherwise
    /// the commit is compared against its first parent. Deleted files and
    /// non-source extensions are skipped; a file whose raw content cannot
    /// be fetched is skipped with a warning rather than failing the run.
    pub async fn reviewable_files(&self) -> MentorResult<BTreeMap<String, String>> {
        let url = format!(
            "{}/repos/{}/commits/{}",
            self.base_api, self.repository, self.commit_sha
        );
        let commit: CommitDetail = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(author) = commit.commit.author.as_ref() {
            debug!(sha = %commit.sha, author = ?author.name, date = ?author.date, "commit meta loaded");
        }

        let files = if let Some(parent) = commit.parents.first() {
            let url = format!(
                "{}/repos/{}/compare/{}...{}",
                self.base_api, self.repository, parent.sha, self.commit_sha
            );
            let compared: CompareResponse = self
                .http
                .get(url)
                .header(AUTHORIZATION, format!("token {}", self.token))
                .header(ACCEPT, "application/vnd.github+json")
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            compared.files
        } else {
            debug!("initial commit, reviewing its own file list");
            commit.files
        };

        let mut out = BTreeMap::new();
        for file in files {
            if file.status == "removed" || !is_source_file(&file.filename) {
                continue;
            }
            let Some(raw_url) = file.raw_url.as_deref() else {
                continue;
            };
            match self.fetch_raw(raw_url).await {
                Ok(Some(content)) => {
                    out.insert(file.filename, content);
                }
                Ok(None) => {
                    warn!(file = %file.filename, "content not found (submodule?), skipping")
                }
                Err(e) => warn!(file = %file.filename, error = %e, "content fetch failed, skipping"),
            }
        }
        debug!(count = out.len(), "reviewable files resolved");
        Ok(out)
    }

    /// Fetch the README.md sitting in the same directory as `file_path`
    /// at this commit. `Ok(None)` when there is none.
    pub async fn get_readme(&self, file_path: &str) -> MentorResult<Option<String>> {
        let readme_path = sibling_readme_path(file_path);
        let url = format!(
            "{}/repos/{}/contents/{}?ref={}",
            self.base_api, self.repository, readme_path, self.commit_sha
        );
        debug!(%readme_path, "looking for sibling README");

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            // Raw media type: the body is the file content, no base64 step.
            .header(ACCEPT, "application/vnd.github.raw+json")
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let text = resp.error_for_status()?.text().await?;
        Ok(Some(text))
    }

    /// Publish the aggregated review as a single commit comment.
    pub async fn post_commit_comment(&self, body: &str) -> MentorResult<()> {
        let url = format!(
            "{}/repos/{}/commits/{}/comments",
            self.base_api, self.repository, self.commit_sha
        );
        self.http
            .post(url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .json(&CommentRequest { body })
            .send()
            .await?
            .error_for_status()?;
        info!(repository = %self.repository, sha = %self.commit_sha, "commit comment posted");
        Ok(())
    }

    async fn fetch_raw(&self, url: &str) -> MentorResult<Option<String>> {
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let text = resp.error_for_status()?.text().await?;
        Ok(Some(text))
    }
}

fn is_source_file(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// README.md in the same directory as the reviewed file.
fn sibling_readme_path(file_path: &str) -> String {
    match file_path.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/README.md"),
        None => "README.md".to_string(),
    }
}

// ===== Wire DTOs =====

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    sha: String,
    #[serde(default)]
    parents: Vec<CommitRef>,
    #[serde(default)]
    files: Vec<ChangedFile>,
    commit: GitCommit,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitCommit {
    author: Option<GitAuthor>,
}

#[derive(Debug, Deserialize)]
struct GitAuthor {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    files: Vec<ChangedFile>,
}

#[derive(Debug, Deserialize)]
struct ChangedFile {
    filename: String,
    /// "added" | "modified" | "removed" | "renamed"
    status: String,
    raw_url: Option<String>,
}
