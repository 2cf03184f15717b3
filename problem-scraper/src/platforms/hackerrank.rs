//! HackerRank challenge parser.
//!
//! Challenge templates are inconsistent: the title may sit in any of
//! several containers depending on track age. Extraction is an explicit
//! prioritized strategy list — first non-empty match longer than three
//! characters wins — so the ordering stays visible and testable.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::errors::ParseError;
use crate::html::{element_text, flatten_element};
use crate::types::{Platform, ProblemData, TestCase};

const MIN_TITLE_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 20;

lazy_static! {
    static ref TITLE_STRATEGIES: Vec<Selector> = [
        ".challenge-name",
        ".challenge-title",
        "h1.ui-icon-label",
        ".page-header-text",
        "h1",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect();
    static ref DESCRIPTION_STRATEGIES: Vec<Selector> = [
        ".challenge-text",
        ".problem-statement",
        ".challenge-body-html",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect();
    static ref DIFFICULTY_STRATEGIES: Vec<Selector> = [".difficulty", ".challenge-difficulty"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect();
    static ref SAMPLE_INPUTS: Selector =
        Selector::parse(".challenge_sample_input pre").unwrap();
    static ref SAMPLE_OUTPUTS: Selector =
        Selector::parse(".challenge_sample_output pre").unwrap();
}

pub fn parse(document: &str, problem_id: &str, url: &str) -> Result<ProblemData, ParseError> {
    let doc = Html::parse_document(document);

    let title = first_text(&doc, &TITLE_STRATEGIES, MIN_TITLE_LEN).ok_or(
        ParseError::MissingAnchor {
            platform: "HackerRank",
            anchor: "challenge title",
        },
    )?;

    let description = first_element(&doc, &DESCRIPTION_STRATEGIES)
        .map(flatten_element)
        .filter(|d| d.len() > MIN_DESCRIPTION_LEN)
        .unwrap_or_default();

    let difficulty = first_text(&doc, &DIFFICULTY_STRATEGIES, 0);

    let inputs = doc.select(&SAMPLE_INPUTS).map(flatten_element);
    let outputs = doc.select(&SAMPLE_OUTPUTS).map(flatten_element);
    let test_cases = inputs
        .zip(outputs)
        .map(|(input, output)| TestCase { input, output })
        .collect();

    Ok(ProblemData {
        platform: Platform::HackerRank,
        problem_id: problem_id.to_string(),
        url: url.to_string(),
        title,
        description,
        input_desc: String::new(),
        output_desc: String::new(),
        time_limit: None,
        memory_limit: None,
        difficulty,
        tags: Vec::new(),
        test_cases,
    })
}

/// First strategy whose text is non-empty and longer than `min_len`.
fn first_text(doc: &Html, strategies: &[Selector], min_len: usize) -> Option<String> {
    for sel in strategies {
        for el in doc.select(sel) {
            let text = element_text(el);
            if text.len() > min_len {
                return Some(text);
            }
        }
    }
    None
}

fn first_element<'a>(doc: &'a Html, strategies: &[Selector]) -> Option<ElementRef<'a>> {
    strategies.iter().find_map(|sel| doc.select(sel).next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modern_challenge_template() {
        let html = r##"
            <html><body>
            <h1 class="ui-icon-label page-label">Solve Me First</h1>
            <div class="challenge-text">
              <p>Complete the function solveMeFirst to compute the sum of two integers.</p>
            </div>
            <div class="difficulty">Easy</div>
            <div class="challenge_sample_input"><pre>a = 2
b = 3</pre></div>
            <div class="challenge_sample_output"><pre>5</pre></div>
            </body></html>
        "##;
        let data = parse(
            html,
            "solve-me-first",
            "https://www.hackerrank.com/challenges/solve-me-first/problem",
        )
        .unwrap();

        assert_eq!(data.title, "Solve Me First");
        assert!(data.description.contains("sum of two integers"));
        assert_eq!(data.difficulty.as_deref(), Some("Easy"));
        assert_eq!(data.test_cases.len(), 1);
        assert_eq!(data.test_cases[0].input, "a = 2\nb = 3");
        assert_eq!(data.test_cases[0].output, "5");
    }

    #[test]
    fn title_strategies_are_tried_in_order() {
        // Both .challenge-name and a bare h1 are present; the earlier
        // strategy wins even though h1 appears first in the document.
        let html = r##"
            <html><body>
            <h1>Programming Challenges</h1>
            <span class="challenge-name">Diagonal Difference</span>
            </body></html>
        "##;
        let data = parse(html, "diagonal-difference", "u").unwrap();
        assert_eq!(data.title, "Diagonal Difference");
    }

    #[test]
    fn short_candidate_falls_through_to_next_strategy() {
        let html = r##"
            <html><body>
            <span class="challenge-name">A</span>
            <h1>Birthday Cake Candles</h1>
            </body></html>
        "##;
        let data = parse(html, "birthday-cake-candles", "u").unwrap();
        assert_eq!(data.title, "Birthday Cake Candles");
    }

    #[test]
    fn no_usable_title_is_a_parse_error() {
        let err = parse("<html><body><p>login required</p></body></html>", "x", "u").unwrap_err();
        assert!(matches!(err, ParseError::MissingAnchor { .. }));
    }

    #[test]
    fn tiny_description_container_is_treated_as_empty() {
        let html = r##"
            <html><body>
            <span class="challenge-name">Some Challenge</span>
            <div class="challenge-text">n/a</div>
            </body></html>
        "##;
        let data = parse(html, "x", "u").unwrap();
        assert_eq!(data.description, "");
    }
}
