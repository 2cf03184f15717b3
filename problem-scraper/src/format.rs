//! Rendering of problem records into the LLM-facing context block.
//!
//! Pure formatting: the same record always renders to the same bytes.

use crate::types::{ProblemData, ReadmeProblemInfo, TestCase};

const TRUNCATION_MARKER: &str = "... [truncated]";

/// Formatting knobs, owned by the caller's review config.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Description cut-off, in characters.
    pub max_description_len: usize,
    pub include_examples: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_description_len: 1000,
            include_examples: true,
        }
    }
}

/// Render a scraped problem into the canonical context block.
pub fn format_problem(p: &ProblemData, opts: &FormatOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    push_header(&mut lines);
    lines.push(format!("Site: {}", p.platform.as_str()));
    lines.push(format!("Problem ID: {}", p.problem_id));
    lines.push(format!("Title: {}", p.title));
    if let Some(difficulty) = &p.difficulty {
        lines.push(format!("Difficulty: {difficulty}"));
    }
    lines.push(format!("URL: {}", p.url));
    lines.push(String::new());

    if p.time_limit.is_some() || p.memory_limit.is_some() {
        push_section_title(&mut lines, "CONSTRAINTS");
        if let Some(t) = &p.time_limit {
            lines.push(format!("- Time Limit: {t}"));
        }
        if let Some(m) = &p.memory_limit {
            lines.push(format!("- Memory Limit: {m}"));
        }
        lines.push(String::new());
    }

    if !p.tags.is_empty() {
        push_section_title(&mut lines, "TAGS");
        lines.push(format!("- {}", p.tags.join(", ")));
        lines.push(String::new());
    }

    push_body_sections(
        &mut lines,
        &p.description,
        &p.input_desc,
        &p.output_desc,
        opts,
    );

    if opts.include_examples && !p.test_cases.is_empty() {
        push_examples(&mut lines, &p.test_cases);
    }

    lines.join("\n").trim_end().to_string()
}

/// Render README-recovered info into the same block shape.
pub fn format_readme_problem(info: &ReadmeProblemInfo, opts: &FormatOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    push_header(&mut lines);
    lines.push(format!("Title: {}", info.title));
    if let Some(difficulty) = &info.difficulty {
        lines.push(format!("Difficulty: {difficulty}"));
    }
    if !info.url.is_empty() {
        lines.push(format!("URL: {}", info.url));
    }
    lines.push(String::new());

    if !info.tags.is_empty() {
        push_section_title(&mut lines, "TAGS");
        lines.push(format!("- {}", info.tags.join(", ")));
        lines.push(String::new());
    }

    push_body_sections(
        &mut lines,
        &info.description,
        &info.input_desc,
        &info.output_desc,
        opts,
    );

    lines.join("\n").trim_end().to_string()
}

fn push_header(lines: &mut Vec<String>) {
    lines.push("PROBLEM INFORMATION".to_string());
    lines.push("=".repeat(50));
    lines.push(String::new());
}

fn push_section_title(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("-".repeat(title.len()));
}

fn push_body_sections(
    lines: &mut Vec<String>,
    description: &str,
    input_desc: &str,
    output_desc: &str,
    opts: &FormatOptions,
) {
    if !description.is_empty() {
        push_section_title(lines, "DESCRIPTION");
        lines.push(truncate(description, opts.max_description_len));
        lines.push(String::new());
    }
    if !input_desc.is_empty() {
        push_section_title(lines, "INPUT FORMAT");
        lines.push(input_desc.to_string());
        lines.push(String::new());
    }
    if !output_desc.is_empty() {
        push_section_title(lines, "OUTPUT FORMAT");
        lines.push(output_desc.to_string());
        lines.push(String::new());
    }
}

fn push_examples(lines: &mut Vec<String>, test_cases: &[TestCase]) {
    push_section_title(lines, "EXAMPLES");
    for (i, tc) in test_cases.iter().enumerate() {
        lines.push(format!("Example {}:", i + 1));
        lines.push("  Input:".to_string());
        for line in tc.input.lines() {
            lines.push(format!("    {line}"));
        }
        lines.push("  Output:".to_string());
        for line in tc.output.lines() {
            lines.push(format!("    {line}"));
        }
        lines.push(String::new());
    }
}

/// Character-based cut with an explicit marker; total length stays within
/// `max` plus the marker.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}
