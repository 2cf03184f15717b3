//! Baekjoon Online Judge (acmicpc.net) parser.
//!
//! Server-rendered page with stable element ids. The title is the required
//! anchor; description/input/output containers are optional and default to
//! empty. Samples are probed as `#sample-input-N` / `#sample-output-N`
//! pairs from N=1, stopping at the first missing pair.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

use crate::errors::ParseError;
use crate::html::{element_text, flatten_element, raw_text};
use crate::types::{Platform, ProblemData, TestCase};

lazy_static! {
    static ref TITLE: Selector = Selector::parse("#problem_title").unwrap();
    static ref INFO_CELLS: Selector = Selector::parse("#problem-info td").unwrap();
    static ref DESCRIPTION: Selector = Selector::parse("#problem_description").unwrap();
    static ref INPUT: Selector = Selector::parse("#problem_input").unwrap();
    static ref OUTPUT: Selector = Selector::parse("#problem_output").unwrap();
    static ref TAGS: Selector = Selector::parse("#problem_tags li a").unwrap();
    static ref SAMPLES: Selector =
        Selector::parse("[id^='sample-input-'], [id^='sample-output-']").unwrap();
    static ref SAMPLE_INPUT_ID: Regex = Regex::new(r"^sample-input-(\d+)$").unwrap();
    static ref SAMPLE_OUTPUT_ID: Regex = Regex::new(r"^sample-output-(\d+)$").unwrap();
}

pub fn parse(document: &str, problem_id: &str, url: &str) -> Result<ProblemData, ParseError> {
    let doc = Html::parse_document(document);

    let title = doc
        .select(&TITLE)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingAnchor {
            platform: "BOJ",
            anchor: "#problem_title",
        })?;

    // First two cells of the problem-info table are time and memory limit.
    let cells: Vec<String> = doc.select(&INFO_CELLS).map(|td| element_text(td)).collect();
    let (time_limit, memory_limit) = if cells.len() >= 2 {
        (Some(cells[0].clone()), Some(cells[1].clone()))
    } else {
        (None, None)
    };

    let description = doc
        .select(&DESCRIPTION)
        .next()
        .map(flatten_element)
        .unwrap_or_default();
    let input_desc = doc
        .select(&INPUT)
        .next()
        .map(flatten_element)
        .unwrap_or_default();
    let output_desc = doc
        .select(&OUTPUT)
        .next()
        .map(flatten_element)
        .unwrap_or_default();

    let test_cases = collect_samples(&doc);

    let tags: Vec<String> = doc
        .select(&TAGS)
        .map(|a| element_text(a))
        .filter(|t| !t.is_empty())
        .collect();

    Ok(ProblemData {
        platform: Platform::Boj,
        problem_id: problem_id.to_string(),
        url: url.to_string(),
        title,
        description,
        input_desc,
        output_desc,
        time_limit,
        memory_limit,
        difficulty: None,
        tags,
        test_cases,
    })
}

/// Pair up sample containers by index, stopping at the first gap.
fn collect_samples(doc: &Html) -> Vec<TestCase> {
    let mut inputs: HashMap<u32, String> = HashMap::new();
    let mut outputs: HashMap<u32, String> = HashMap::new();

    for el in doc.select(&SAMPLES) {
        let Some(id) = el.value().attr("id") else {
            continue;
        };
        if let Some(c) = SAMPLE_INPUT_ID.captures(id) {
            if let Ok(n) = c[1].parse() {
                inputs.insert(n, raw_text(el));
            }
        } else if let Some(c) = SAMPLE_OUTPUT_ID.captures(id) {
            if let Ok(n) = c[1].parse() {
                outputs.insert(n, raw_text(el));
            }
        }
    }

    let mut cases = Vec::new();
    for idx in 1u32.. {
        match (inputs.get(&idx), outputs.get(&idx)) {
            (Some(input), Some(output)) => cases.push(TestCase {
                input: input.clone(),
                output: output.clone(),
            }),
            _ => break,
        }
    }
    cases
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r##"
        <html><body>
        <table id="problem-info"><tbody><tr>
            <td>2 초</td><td>128 MB</td><td>424772</td><td>150018</td>
        </tr></tbody></table>
        <span id="problem_title">A+B</span>
        <div id="problem_description"><p>두 정수 A와 B를 입력받은 다음, A+B를 출력하는 프로그램을 작성하시오.</p></div>
        <div id="problem_input"><p>첫째 줄에 A와 B가 주어진다. (0 &lt; A, B &lt; 10)</p></div>
        <div id="problem_output"><p>첫째 줄에 A+B를 출력한다.</p></div>
        <pre id="sample-input-1">1 2</pre>
        <pre id="sample-output-1">3</pre>
        <pre id="sample-input-2">3 4</pre>
        <pre id="sample-output-2">7</pre>
        <div id="problem_tags"><ul><li><a href="#">사칙연산</a></li><li><a href="#">구현</a></li></ul></div>
        </body></html>
    "##;

    #[test]
    fn parses_full_page() {
        let data = parse(FULL_PAGE, "1000", "https://www.acmicpc.net/problem/1000").unwrap();
        assert_eq!(data.platform, Platform::Boj);
        assert_eq!(data.title, "A+B");
        assert_eq!(data.time_limit.as_deref(), Some("2 초"));
        assert_eq!(data.memory_limit.as_deref(), Some("128 MB"));
        assert!(data.description.contains("A+B를 출력하는"));
        assert!(data.input_desc.contains("첫째 줄에 A와 B"));
        assert_eq!(data.tags, vec!["사칙연산", "구현"]);
        assert_eq!(data.test_cases.len(), 2);
        assert_eq!(data.test_cases[0].input, "1 2");
        assert_eq!(data.test_cases[0].output, "3");
    }

    #[test]
    fn missing_title_is_a_parse_error() {
        let html = "<html><body><div id='problem_description'>text</div></body></html>";
        let err = parse(html, "1", "u").unwrap_err();
        assert!(matches!(err, ParseError::MissingAnchor { .. }));
    }

    #[test]
    fn missing_description_yields_empty_string() {
        let html = "<html><body><span id='problem_title'>A+B</span></body></html>";
        let data = parse(html, "1000", "u").unwrap();
        assert_eq!(data.description, "");
        assert_eq!(data.input_desc, "");
        assert_eq!(data.time_limit, None);
        assert!(data.test_cases.is_empty());
    }

    #[test]
    fn samples_stop_at_first_gap() {
        let html = r##"
            <html><body>
            <span id="problem_title">t</span>
            <pre id="sample-input-1">a</pre><pre id="sample-output-1">b</pre>
            <pre id="sample-input-2">c</pre><pre id="sample-output-2">d</pre>
            <pre id="sample-input-4">x</pre><pre id="sample-output-4">y</pre>
            </body></html>
        "##;
        let data = parse(html, "1", "u").unwrap();
        assert_eq!(data.test_cases.len(), 2);
        assert_eq!(data.test_cases[1].input, "c");
        assert_eq!(data.test_cases[1].output, "d");
    }

    #[test]
    fn unpaired_sample_input_is_dropped() {
        let html = r##"
            <html><body>
            <span id="problem_title">t</span>
            <pre id="sample-input-1">a</pre>
            </body></html>
        "##;
        let data = parse(html, "1", "u").unwrap();
        assert!(data.test_cases.is_empty());
    }
}
