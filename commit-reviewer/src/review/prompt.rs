//! Prompt builders for the review call.
//!
//! Keep prompts compact; the problem context block and the code are the
//! grounding, the format section keeps replies consistent across files.

/// Reviewer persona and response format. `language` is passed through
/// untouched from configuration.
pub fn system_prompt(language: &str) -> String {
    let mut s = String::new();
    s.push_str(
        "You are an experienced algorithm coach reviewing online-judge solutions submitted by learners.\n",
    );
    s.push_str(
        "Analyze the submitted code against the problem context when one is provided.\n",
    );
    s.push_str("\n# Review areas\n");
    s.push_str("- Correctness: logical errors, unhandled edge cases, wrong input/output handling.\n");
    s.push_str(
        "- Efficiency: time and space complexity; point out better algorithms or data structures when they exist.\n",
    );
    s.push_str("- Readability & style: naming, structure, idiomatic use of the language.\n");
    s.push_str("- Best practices: standard-library use, unnecessarily complex constructs.\n");
    s.push_str("\n# Review format\n");
    s.push_str("### Overall Assessment\n1-2 sentences, strengths first.\n");
    s.push_str("### What Went Well\nShort bullet points.\n");
    s.push_str(
        "### Areas for Improvement\nNumbered items, each with the concrete issue, a suggestion, and a short code example when useful.\n",
    );
    s.push_str("### Extra Tips\nRelated problems or techniques worth knowing, briefly.\n");
    s.push_str(&format!("\nWrite the entire review in {language}.\n"));
    s
}

/// Per-file user message: problem context block (or an explicit absence
/// note) plus the fenced solution code.
pub fn user_prompt(problem_context: &str, code: &str) -> String {
    let mut s = String::new();
    s.push_str("**Problem Description:**\n");
    if problem_context.is_empty() {
        s.push_str("No specific problem description provided.\n");
    } else {
        s.push_str(problem_context);
        s.push('\n');
    }
    s.push_str("\n**Code to Review:**\n```\n");
    s.push_str(code);
    s.push_str("\n```\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_carries_the_language() {
        let prompt = system_prompt("korean");
        assert!(prompt.contains("Write the entire review in korean."));
        assert!(prompt.contains("# Review format"));
    }

    #[test]
    fn user_prompt_embeds_context_and_code() {
        let prompt = user_prompt("PROBLEM INFORMATION\nTitle: A+B", "print(1+2)");
        assert!(prompt.contains("PROBLEM INFORMATION"));
        assert!(prompt.contains("```\nprint(1+2)\n```"));
    }

    #[test]
    fn missing_context_is_stated_explicitly() {
        let prompt = user_prompt("", "print(1)");
        assert!(prompt.contains("No specific problem description provided."));
    }
}
