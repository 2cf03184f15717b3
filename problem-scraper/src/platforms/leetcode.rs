//! LeetCode scraper — GraphQL, not an HTML scrape.
//!
//! The public problem page is a React shell; the statement lives behind
//! the `question(titleSlug:)` GraphQL query. Sample extraction is a
//! best-effort scan of `<pre>` blocks in the returned content for
//! `Input:` / `Output:` markers and may legitimately find nothing.

use lazy_static::lazy_static;
use reqwest::StatusCode;
use reqwest::header::{REFERER, USER_AGENT};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::errors::{FetchError, ParseError, ScrapeError};
use crate::fetch::BROWSER_UA;
use crate::html::flatten_html;
use crate::types::{Platform, ProblemData, TestCase};

const GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const QUESTION_QUERY: &str = "\
query getQuestionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    title
    content
    difficulty
    topicTags {
      name
    }
    sampleTestCase
  }
}";

lazy_static! {
    static ref PRE: Selector = Selector::parse("pre").unwrap();
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    #[serde(rename = "titleSlug")]
    title_slug: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    question: Option<Question>,
}

#[derive(Debug, Deserialize)]
struct Question {
    title: String,
    content: Option<String>,
    difficulty: Option<String>,
    #[serde(rename = "topicTags", default)]
    topic_tags: Vec<TopicTag>,
}

#[derive(Debug, Deserialize)]
struct TopicTag {
    name: String,
}

/// Fetch and normalize one problem by slug.
pub async fn fetch(client: &reqwest::Client, slug: &str) -> Result<ProblemData, ScrapeError> {
    let url = Platform::LeetCode.problem_url(slug);
    let payload = GraphqlRequest {
        query: QUESTION_QUERY,
        variables: Variables { title_slug: slug },
        operation_name: "getQuestionDetail",
    };

    let resp = client
        .post(GRAPHQL_URL)
        .header(USER_AGENT, BROWSER_UA)
        .header(REFERER, &url)
        .json(&payload)
        .send()
        .await
        .map_err(FetchError::from)?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: GRAPHQL_URL.to_string(),
        }
        .into());
    }

    let body = resp.text().await.map_err(FetchError::from)?;
    Ok(parse_response(&body, slug, &url)?)
}

/// Normalize a GraphQL response body into [`ProblemData`].
pub fn parse_response(body: &str, slug: &str, url: &str) -> Result<ProblemData, ParseError> {
    let resp: GraphqlResponse =
        serde_json::from_str(body).map_err(|e| ParseError::BadDocument(e.to_string()))?;

    if let Some(errors) = resp.errors {
        if !errors.is_empty() {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ParseError::Graphql(joined));
        }
    }

    let question = resp
        .data
        .and_then(|d| d.question)
        .ok_or_else(|| ParseError::Graphql(format!("problem not found: {slug}")))?;

    let content = question.content.unwrap_or_default();
    let description = flatten_html(&content);
    let test_cases = extract_test_cases(&content);
    let tags = question.topic_tags.into_iter().map(|t| t.name).collect();

    Ok(ProblemData {
        platform: Platform::LeetCode,
        problem_id: slug.to_string(),
        url: url.to_string(),
        title: question.title,
        description,
        // LeetCode embeds input/output rules in the statement itself.
        input_desc: "See description".to_string(),
        output_desc: "See description".to_string(),
        time_limit: None,
        memory_limit: None,
        difficulty: question.difficulty,
        tags,
        test_cases,
    })
}

/// Best-effort example extraction from `<pre>` blocks in the statement.
///
/// Never fails; slightly different formatting simply yields fewer cases.
fn extract_test_cases(content_html: &str) -> Vec<TestCase> {
    let doc = Html::parse_fragment(content_html);
    let mut cases = Vec::new();
    for pre in doc.select(&PRE) {
        let text: String = pre.text().collect();
        if let Some(tc) = split_example(&text) {
            cases.push(tc);
        }
    }
    cases
}

fn split_example(text: &str) -> Option<TestCase> {
    let after_input = &text[text.find("Input:")? + "Input:".len()..];
    let output_at = after_input.find("Output:")?;
    let input = after_input[..output_at].trim().to_string();
    let after_output = &after_input[output_at + "Output:".len()..];
    let output = match after_output.find("Explanation:") {
        Some(i) => &after_output[..i],
        None => after_output,
    }
    .trim()
    .to_string();
    Some(TestCase { input, output })
}
