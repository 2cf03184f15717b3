//! Codeforces problem parser.
//!
//! Everything lives under `.problem-statement`: a header with title and
//! limits, an unclassed statement body, input/output specifications and
//! paired sample blocks.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::errors::ParseError;
use crate::html::{element_text, flatten_element};
use crate::types::{Platform, ProblemData, TestCase};

lazy_static! {
    static ref STATEMENT: Selector = Selector::parse(".problem-statement").unwrap();
    static ref TITLE: Selector = Selector::parse(".problem-statement .title").unwrap();
    static ref TIME_LIMIT: Selector = Selector::parse(".time-limit").unwrap();
    static ref MEMORY_LIMIT: Selector = Selector::parse(".memory-limit").unwrap();
    static ref PROPERTY_TITLE: Selector = Selector::parse(".property-title").unwrap();
    static ref INPUT_SPEC: Selector = Selector::parse(".input-specification").unwrap();
    static ref OUTPUT_SPEC: Selector = Selector::parse(".output-specification").unwrap();
    static ref SAMPLE_INPUTS: Selector = Selector::parse(".input pre").unwrap();
    static ref SAMPLE_OUTPUTS: Selector = Selector::parse(".output pre").unwrap();
}

pub fn parse(document: &str, problem_id: &str, url: &str) -> Result<ProblemData, ParseError> {
    let doc = Html::parse_document(document);

    let statement = doc
        .select(&STATEMENT)
        .next()
        .ok_or(ParseError::MissingAnchor {
            platform: "Codeforces",
            anchor: ".problem-statement",
        })?;

    // Header title comes first in document order, before the sample-block
    // "Input"/"Output" titles.
    let title = doc
        .select(&TITLE)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingAnchor {
            platform: "Codeforces",
            anchor: ".problem-statement .title",
        })?;

    let time_limit = statement.select(&TIME_LIMIT).next().map(limit_text);
    let memory_limit = statement.select(&MEMORY_LIMIT).next().map(limit_text);

    let description = statement_body(statement).unwrap_or_default();

    let input_desc = statement
        .select(&INPUT_SPEC)
        .next()
        .map(|el| strip_section_label(&flatten_element(el), "Input"))
        .unwrap_or_default();
    let output_desc = statement
        .select(&OUTPUT_SPEC)
        .next()
        .map(|el| strip_section_label(&flatten_element(el), "Output"))
        .unwrap_or_default();

    let inputs = statement.select(&SAMPLE_INPUTS).map(flatten_element);
    let outputs = statement.select(&SAMPLE_OUTPUTS).map(flatten_element);
    let test_cases = inputs
        .zip(outputs)
        .map(|(input, output)| TestCase { input, output })
        .collect();

    Ok(ProblemData {
        platform: Platform::Codeforces,
        problem_id: problem_id.to_string(),
        url: url.to_string(),
        title,
        description,
        input_desc,
        output_desc,
        time_limit,
        memory_limit,
        difficulty: None,
        tags: Vec::new(),
        test_cases,
    })
}

/// The statement body is the first child div without a class attribute.
fn statement_body(statement: ElementRef<'_>) -> Option<String> {
    for child in statement.children() {
        let Some(el) = ElementRef::wrap(child) else {
            continue;
        };
        if el.value().name() == "div" && el.value().attr("class").is_none() {
            return Some(flatten_element(el));
        }
    }
    None
}

/// Limit cells carry a `.property-title` label before the value.
fn limit_text(el: ElementRef<'_>) -> String {
    let label = el
        .select(&PROPERTY_TITLE)
        .next()
        .map(element_text)
        .unwrap_or_default();
    let full = element_text(el);
    full.strip_prefix(label.as_str())
        .unwrap_or(&full)
        .trim()
        .to_string()
}

/// Drop a leading "Input"/"Output" section-title line if present.
fn strip_section_label(text: &str, label: &str) -> String {
    match text.split_once('\n') {
        Some((first, rest)) if first.trim() == label => rest.trim().to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBLEM_PAGE: &str = r##"
        <html><body>
        <div class="problem-statement">
          <div class="header">
            <div class="title">A. Theatre Square</div>
            <div class="time-limit"><div class="property-title">time limit per test</div>1 second</div>
            <div class="memory-limit"><div class="property-title">memory limit per test</div>256 megabytes</div>
          </div>
          <div><p>Theatre Square in the capital city of Berland has a rectangular shape.</p></div>
          <div class="input-specification"><div class="section-title">Input</div><p>The input contains three positive integer numbers.</p></div>
          <div class="output-specification"><div class="section-title">Output</div><p>Write the needed number of flagstones.</p></div>
          <div class="sample-tests">
            <div class="sample-test">
              <div class="input"><div class="title">Input</div><pre>6 6 4</pre></div>
              <div class="output"><div class="title">Output</div><pre>4</pre></div>
            </div>
          </div>
        </div>
        </body></html>
    "##;

    #[test]
    fn parses_problem_page() {
        let data = parse(
            PROBLEM_PAGE,
            "1A",
            "https://codeforces.com/problemset/problem/1/A",
        )
        .unwrap();

        assert_eq!(data.title, "A. Theatre Square");
        assert_eq!(data.time_limit.as_deref(), Some("1 second"));
        assert_eq!(data.memory_limit.as_deref(), Some("256 megabytes"));
        assert!(data.description.contains("rectangular shape"));
        assert_eq!(data.input_desc, "The input contains three positive integer numbers.");
        assert_eq!(data.output_desc, "Write the needed number of flagstones.");
        assert_eq!(data.test_cases.len(), 1);
        assert_eq!(data.test_cases[0].input, "6 6 4");
        assert_eq!(data.test_cases[0].output, "4");
    }

    #[test]
    fn missing_statement_is_a_parse_error() {
        let err = parse("<html><body><p>not a problem</p></body></html>", "1A", "u").unwrap_err();
        assert!(matches!(err, ParseError::MissingAnchor { .. }));
    }

    #[test]
    fn multiline_samples_keep_newlines() {
        let html = r##"
            <html><body>
            <div class="problem-statement">
              <div class="header"><div class="title">B. Lines</div></div>
              <div class="sample-test">
                <div class="input"><pre>3
1 2
3 4</pre></div>
                <div class="output"><pre>yes
no</pre></div>
              </div>
            </div>
            </body></html>
        "##;
        let data = parse(html, "2B", "u").unwrap();
        assert_eq!(data.test_cases.len(), 1);
        assert_eq!(data.test_cases[0].input, "3\n1 2\n3 4");
        assert_eq!(data.test_cases[0].output, "yes\nno");
    }
}
