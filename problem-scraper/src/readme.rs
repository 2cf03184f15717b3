//! solved.ac-style README fallback parser.
//!
//! Commit automation tools (BaekjoonHub and friends) drop a README next to
//! each solution with a fixed shape:
//!
//! ```text
//! # [Gold V] 하노이 탑 이동 순서 - 11729
//! [문제 링크](https://www.acmicpc.net/problem/11729)
//! ### 분류
//! 재귀
//! ### 문제 설명
//! ...
//! ### 입력
//! ...
//! ### 출력
//! ...
//! ```
//!
//! A README that does not match the convention is "no usable info", not an
//! error.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::ReadmeProblemInfo;

lazy_static! {
    // First line: # [<difficulty>] <name> - <numeric id>
    static ref TITLE_RE: Regex = Regex::new(r"^#\s+\[([^\]]+)\]\s+(.+?)\s*-\s*(\d+)\s*$").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[문제 링크\]\((https?://[^)\s]+)\)").unwrap();
}

/// Parse a README into problem info, or `None` when the convention does
/// not hold (wrong first line, or an empty description section).
pub fn parse_readme_as_problem(readme: &str) -> Option<ReadmeProblemInfo> {
    let text = readme.trim();
    if text.is_empty() {
        return None;
    }

    let first_line = text.lines().next()?;
    let caps = TITLE_RE.captures(first_line.trim())?;
    let difficulty = caps[1].to_string();
    let title = format!("{} - {}", caps[2].trim(), &caps[3]);

    let url = LINK_RE
        .captures(text)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let description = extract_section(text, "문제 설명");
    if description.is_empty() {
        return None;
    }
    let input_desc = extract_section(text, "입력");
    let output_desc = extract_section(text, "출력");
    let tags = split_tags(&extract_section(text, "분류"));

    Some(ReadmeProblemInfo {
        title,
        url,
        description,
        input_desc,
        output_desc,
        tags,
        difficulty: Some(difficulty),
    })
}

/// Body of `### <name>` up to the next `###` header or end of text.
fn extract_section(text: &str, name: &str) -> String {
    let pattern = format!(r"(?s)###\s+{}\s*\n(.*?)(?:\n###\s+|\z)", regex::escape(name));
    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(text))
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default()
}

/// Tag lists come either comma- or newline-separated.
fn split_tags(section: &str) -> Vec<String> {
    if section.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = if section.contains(',') {
        section.split(',').collect()
    } else {
        section.lines().collect()
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
