//! Problem-URL detection over arbitrary source text.
//!
//! Scans the whole content (solution files usually carry the link in a
//! header comment, but not always on the first line) and returns the first
//! recognized reference in a fixed platform priority order. Multiple URLs
//! in one file yield only the first match; this is documented behavior.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Platform;

lazy_static! {
    // BOJ: https://www.acmicpc.net/problem/1000 or the boj.kr short link.
    static ref BOJ_RE: Regex = Regex::new(r"acmicpc\.net/problem/(\d+)").unwrap();
    static ref BOJ_SHORT_RE: Regex = Regex::new(r"boj\.kr/(\d+)").unwrap();

    // LeetCode: https://leetcode.com/problems/two-sum/ -> slug only.
    static ref LEETCODE_RE: Regex =
        Regex::new(r"leetcode\.com/problems/([A-Za-z0-9_-]+)").unwrap();

    // Programmers: https://school.programmers.co.kr/learn/courses/30/lessons/42576
    static ref PROGRAMMERS_RE: Regex =
        Regex::new(r"programmers\.co\.kr/learn/courses/30/lessons/(\d+)").unwrap();

    // Codeforces: /problemset/problem/1/A, /problem/1/A or /contest/1/problem/A.
    static ref CODEFORCES_PROBLEM_RE: Regex =
        Regex::new(r"codeforces\.com/(?:problemset/)?problem/(\d+)/([A-Za-z]\d*)").unwrap();
    static ref CODEFORCES_CONTEST_RE: Regex =
        Regex::new(r"codeforces\.com/contest/(\d+)/problem/([A-Za-z]\d*)").unwrap();

    // HackerRank: https://www.hackerrank.com/challenges/solve-me-first/problem
    static ref HACKERRANK_RE: Regex =
        Regex::new(r"hackerrank\.com/challenges/([A-Za-z0-9_-]+)").unwrap();
}

/// Find the first recognized online-judge problem reference in `text`.
///
/// Returns the platform and its native problem id (digits for BOJ and
/// Programmers, slug for LeetCode and HackerRank, `<contest><index>` for
/// Codeforces), or `None` when no pattern matches. A miss is not an error;
/// the caller proceeds without problem context.
pub fn detect_problem_url(text: &str) -> Option<(Platform, String)> {
    if let Some(c) = BOJ_RE.captures(text) {
        return Some((Platform::Boj, c[1].to_string()));
    }
    if let Some(c) = BOJ_SHORT_RE.captures(text) {
        return Some((Platform::Boj, c[1].to_string()));
    }
    if let Some(c) = LEETCODE_RE.captures(text) {
        return Some((Platform::LeetCode, c[1].to_string()));
    }
    if let Some(c) = PROGRAMMERS_RE.captures(text) {
        return Some((Platform::Programmers, c[1].to_string()));
    }
    if let Some(c) = CODEFORCES_PROBLEM_RE.captures(text) {
        return Some((Platform::Codeforces, format!("{}{}", &c[1], &c[2])));
    }
    if let Some(c) = CODEFORCES_CONTEST_RE.captures(text) {
        return Some((Platform::Codeforces, format!("{}{}", &c[1], &c[2])));
    }
    if let Some(c) = HACKERRANK_RE.captures(text) {
        return Some((Platform::HackerRank, c[1].to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_platform() {
        let cases: &[(&str, Platform, &str)] = &[
            (
                "// https://www.acmicpc.net/problem/1000\nfn main() {}",
                Platform::Boj,
                "1000",
            ),
            ("# see boj.kr/11729 for the statement", Platform::Boj, "11729"),
            (
                "https://leetcode.com/problems/two-sum/",
                Platform::LeetCode,
                "two-sum",
            ),
            (
                "https://school.programmers.co.kr/learn/courses/30/lessons/42576",
                Platform::Programmers,
                "42576",
            ),
            (
                "https://programmers.co.kr/learn/courses/30/lessons/12345",
                Platform::Programmers,
                "12345",
            ),
            (
                "https://codeforces.com/problemset/problem/1/A",
                Platform::Codeforces,
                "1A",
            ),
            (
                "https://codeforces.com/contest/1520/problem/B1",
                Platform::Codeforces,
                "1520B1",
            ),
            (
                "https://www.hackerrank.com/challenges/solve-me-first/problem",
                Platform::HackerRank,
                "solve-me-first",
            ),
        ];

        for (text, platform, id) in cases {
            let got = detect_problem_url(text);
            assert_eq!(got, Some((*platform, id.to_string())), "text: {text}");
        }
    }

    #[test]
    fn url_may_appear_anywhere_in_text() {
        let text = "import sys\n\n# solution for\n# https://www.acmicpc.net/problem/2557\nprint('hi')\n";
        assert_eq!(
            detect_problem_url(text),
            Some((Platform::Boj, "2557".to_string()))
        );
    }

    #[test]
    fn first_match_wins_by_platform_priority() {
        // BOJ is checked before LeetCode even when LeetCode appears first.
        let text = "https://leetcode.com/problems/two-sum/ and https://www.acmicpc.net/problem/1000";
        assert_eq!(
            detect_problem_url(text),
            Some((Platform::Boj, "1000".to_string()))
        );
    }

    #[test]
    fn plain_source_without_url_is_a_miss() {
        let text = "fn main() {\n    // local notes only\n    println!(\"42\");\n}\n";
        assert_eq!(detect_problem_url(text), None);
    }

    #[test]
    fn leetcode_slug_stops_at_path_separator() {
        let text = "https://leetcode.com/problems/two-sum/description/";
        assert_eq!(
            detect_problem_url(text),
            Some((Platform::LeetCode, "two-sum".to_string()))
        );
    }
}
