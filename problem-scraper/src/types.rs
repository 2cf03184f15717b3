//! Normalized records produced by the scraping layer.
//!
//! A [`ProblemData`] is a pure extraction result: built once by a platform
//! parser, handed to the formatter, never mutated. [`ReadmeProblemInfo`] is
//! the lower-fidelity shape recovered from a repository README when live
//! scraping fails.

use std::fmt;

/// Online judge platform (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Boj,
    LeetCode,
    Programmers,
    Codeforces,
    HackerRank,
}

impl Platform {
    /// Display name used in logs and in the formatted problem block.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Boj => "BOJ",
            Platform::LeetCode => "LeetCode",
            Platform::Programmers => "Programmers",
            Platform::Codeforces => "Codeforces",
            Platform::HackerRank => "HackerRank",
        }
    }

    /// Canonical problem URL for a platform-native id.
    ///
    /// Codeforces ids are stored as `<contest><index>` (e.g. `"1A"`); the
    /// contest is the leading digit run.
    pub fn problem_url(&self, problem_id: &str) -> String {
        match self {
            Platform::Boj => format!("https://www.acmicpc.net/problem/{problem_id}"),
            Platform::LeetCode => format!("https://leetcode.com/problems/{problem_id}/"),
            Platform::Programmers => format!(
                "https://school.programmers.co.kr/learn/courses/30/lessons/{problem_id}"
            ),
            Platform::Codeforces => {
                let split = problem_id
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(problem_id.len());
                let (contest, index) = problem_id.split_at(split);
                format!("https://codeforces.com/problemset/problem/{contest}/{index}")
            }
            Platform::HackerRank => {
                format!("https://www.hackerrank.com/challenges/{problem_id}/problem")
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One illustrative input/output pair shown on a problem page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

/// Normalized scrape result.
///
/// `platform`, `problem_id`, `url` and `title` are always populated on
/// success; every other field defaults to empty/`None` instead of failing
/// the parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemData {
    pub platform: Platform,
    pub problem_id: String,
    pub url: String,

    pub title: String,
    pub description: String,
    /// Empty where the platform does not separate it from `description`.
    pub input_desc: String,
    pub output_desc: String,

    /// Platform-reported, free-form (e.g. "2 초", "256 MB").
    pub time_limit: Option<String>,
    pub memory_limit: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Vec<String>,

    pub test_cases: Vec<TestCase>,
}

/// Problem info recovered from a solved.ac-style README.
///
/// Same conceptual shape as [`ProblemData`] minus platform/id/test cases,
/// which the README convention does not carry.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadmeProblemInfo {
    pub title: String,
    pub url: String,
    pub description: String,
    pub input_desc: String,
    pub output_desc: String,
    pub tags: Vec<String>,
    pub difficulty: Option<String>,
}
