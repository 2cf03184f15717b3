//! Programmers (school.programmers.co.kr) parser.
//!
//! The lesson page does not cleanly separate description/input/output, and
//! the dedicated title container is client-rendered, so the page `<title>`
//! is the reliable anchor. Examples come from the last table in the guide
//! section: header cells name the parameters, the final column is the
//! expected return value.

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use crate::errors::ParseError;
use crate::html::{element_text, flatten_element};
use crate::types::{Platform, ProblemData, TestCase};

lazy_static! {
    static ref PAGE_TITLE: Selector = Selector::parse("title").unwrap();
    static ref GUIDE: Selector = Selector::parse(".guide-section-description").unwrap();
    static ref TOUR: Selector = Selector::parse("#tour-main-step").unwrap();
    static ref TABLES: Selector = Selector::parse("table").unwrap();
    static ref THEAD_TH: Selector = Selector::parse("thead th").unwrap();
    static ref TBODY_TR: Selector = Selector::parse("tbody tr").unwrap();
    static ref TD: Selector = Selector::parse("td").unwrap();
}

pub fn parse(document: &str, problem_id: &str, url: &str) -> Result<ProblemData, ParseError> {
    let doc = Html::parse_document(document);

    // "코딩테스트 연습 - 체육복 | 프로그래머스 스쿨" -> keep the left side.
    let title = doc
        .select(&PAGE_TITLE)
        .next()
        .map(element_text)
        .map(|t| t.split('|').next().unwrap_or_default().trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingAnchor {
            platform: "Programmers",
            anchor: "title",
        })?;

    let container = doc
        .select(&GUIDE)
        .next()
        .or_else(|| doc.select(&TOUR).next());

    let mut description = String::new();
    let mut test_cases = Vec::new();
    if let Some(container) = container {
        description = flatten_element(container);
        if let Some(io_table) = container.select(&TABLES).last() {
            test_cases = parse_io_table(io_table);
        }
    }

    Ok(ProblemData {
        platform: Platform::Programmers,
        problem_id: problem_id.to_string(),
        url: url.to_string(),
        title,
        description,
        input_desc: "See description (Programmers usually mixes these)".to_string(),
        output_desc: "See description".to_string(),
        time_limit: None,
        memory_limit: None,
        difficulty: None,
        tags: Vec::new(),
        test_cases,
    })
}

/// Zip parameter names with row values into `name=value, ...` inputs;
/// the last column is the output.
fn parse_io_table(table: scraper::ElementRef<'_>) -> Vec<TestCase> {
    let headers: Vec<String> = table.select(&THEAD_TH).map(element_text).collect();

    let mut cases = Vec::new();
    for row in table.select(&TBODY_TR) {
        let cols: Vec<String> = row.select(&TD).map(element_text).collect();
        if cols.len() < 2 {
            continue;
        }
        let params = cols.len() - 1;
        let input = headers
            .iter()
            .take(headers.len().saturating_sub(1))
            .zip(cols.iter().take(params))
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        let output = cols[params].clone();
        cases.push(TestCase { input, output });
    }
    cases
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON_PAGE: &str = r##"
        <html><head><title>코딩테스트 연습 - 체육복 | 프로그래머스 스쿨</title></head>
        <body>
        <div class="guide-section-description">
            <h6>문제 설명</h6>
            <p>점심시간에 도둑이 들어 일부 학생이 체육복을 도난당했습니다.</p>
            <h6>입출력 예</h6>
            <table>
              <thead><tr><th>n</th><th>lost</th><th>reserve</th><th>return</th></tr></thead>
              <tbody>
                <tr><td>5</td><td>[2, 4]</td><td>[1, 3, 5]</td><td>5</td></tr>
                <tr><td>5</td><td>[2, 4]</td><td>[3]</td><td>4</td></tr>
              </tbody>
            </table>
        </div>
        </body></html>
    "##;

    #[test]
    fn parses_lesson_page() {
        let data = parse(
            LESSON_PAGE,
            "42862",
            "https://school.programmers.co.kr/learn/courses/30/lessons/42862",
        )
        .unwrap();

        assert_eq!(data.title, "코딩테스트 연습 - 체육복");
        assert!(data.description.contains("체육복을 도난당했습니다"));
        // Guide table is also rendered into the description as Markdown.
        assert!(data.description.contains("| n | lost | reserve | return |"));

        assert_eq!(data.test_cases.len(), 2);
        assert_eq!(data.test_cases[0].input, "n=5, lost=[2, 4], reserve=[1, 3, 5]");
        assert_eq!(data.test_cases[0].output, "5");
        assert_eq!(data.test_cases[1].output, "4");
    }

    #[test]
    fn missing_page_title_is_a_parse_error() {
        let err = parse("<html><body><p>x</p></body></html>", "1", "u").unwrap_err();
        assert!(matches!(err, ParseError::MissingAnchor { .. }));
    }

    #[test]
    fn missing_guide_container_yields_empty_description() {
        let html = "<html><head><title>코딩테스트 연습 - 완주하지 못한 선수</title></head><body></body></html>";
        let data = parse(html, "42576", "u").unwrap();
        assert_eq!(data.title, "코딩테스트 연습 - 완주하지 못한 선수");
        assert_eq!(data.description, "");
        assert!(data.test_cases.is_empty());
    }

    #[test]
    fn last_table_in_container_is_the_io_table() {
        let html = r##"
            <html><head><title>t | x</title></head><body>
            <div class="guide-section-description">
              <table><thead><tr><th>limit</th></tr></thead><tbody><tr><td>1억</td></tr></tbody></table>
              <table>
                <thead><tr><th>s</th><th>result</th></tr></thead>
                <tbody><tr><td>"abc"</td><td>"cba"</td></tr></tbody>
              </table>
            </div>
            </body></html>
        "##;
        let data = parse(html, "1", "u").unwrap();
        assert_eq!(data.test_cases.len(), 1);
        assert_eq!(data.test_cases[0].input, "s=\"abc\"");
        assert_eq!(data.test_cases[0].output, "\"cba\"");
    }
}
