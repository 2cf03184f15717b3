//! HTML-to-text flattening shared by the platform parsers.
//!
//! Rules:
//! - block-level elements (p, div, headers, list items, blockquote, table
//!   rows, br) are newline-delimited;
//! - inline `<code>` is wrapped in backticks;
//! - `<table>` becomes a Markdown pipe table (header from `thead`, body
//!   from `tbody`);
//! - runs of 3+ newlines collapse to exactly 2;
//! - text inside `<pre>` keeps its whitespace verbatim, everything else is
//!   whitespace-collapsed.

use ego_tree::NodeRef;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

lazy_static! {
    static ref THEAD_TH: Selector = Selector::parse("thead th").unwrap();
    static ref TBODY_TR: Selector = Selector::parse("tbody tr").unwrap();
    static ref ROW_CELLS: Selector = Selector::parse("td, th").unwrap();
    static ref TRAILING_WS: Regex = Regex::new(r"[ \t]+\n").unwrap();
    static ref EXTRA_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Flatten an HTML fragment (e.g. a GraphQL `content` payload).
pub(crate) fn flatten_html(html: &str) -> String {
    let doc = Html::parse_fragment(html);
    let mut out = String::new();
    for child in doc.tree.root().children() {
        render_node(child, &mut out, false);
    }
    cleanup(&out)
}

/// Flatten the subtree below one element.
pub(crate) fn flatten_element(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    if el.value().name() == "table" {
        render_table(el, &mut out);
    } else {
        let in_pre = el.value().name() == "pre";
        for child in el.children() {
            render_node(child, &mut out, in_pre);
        }
    }
    cleanup(&out)
}

/// Whitespace-collapsed inline text of an element (titles, table cells).
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Verbatim text of an element, trimmed. Used for sample I/O blocks where
/// interior newlines are data.
pub(crate) fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn render_node(node: NodeRef<'_, Node>, out: &mut String, in_pre: bool) {
    match node.value() {
        Node::Text(t) => {
            if in_pre {
                out.push_str(&t.text);
                return;
            }
            let mut text = collapse_spaces(&t.text);
            if out.is_empty() || out.ends_with('\n') {
                text = text.trim_start().to_string();
            }
            out.push_str(&text);
        }
        Node::Element(el) => match el.name() {
            "br" => out.push('\n'),
            "script" | "style" | "head" => {}
            "code" if !in_pre => {
                out.push('`');
                for child in node.children() {
                    render_node(child, out, in_pre);
                }
                out.push('`');
            }
            "table" => {
                if let Some(table) = ElementRef::wrap(node) {
                    render_table(table, out);
                }
            }
            name => {
                let block = is_block(name);
                let pre = in_pre || name == "pre";
                if block {
                    ensure_newline(out);
                }
                for child in node.children() {
                    render_node(child, out, pre);
                }
                if block {
                    ensure_newline(out);
                }
            }
        },
        _ => {
            for child in node.children() {
                render_node(child, out, in_pre);
            }
        }
    }
}

fn render_table(table: ElementRef<'_>, out: &mut String) {
    let headers: Vec<String> = table.select(&THEAD_TH).map(element_text).collect();
    let rows: Vec<Vec<String>> = table
        .select(&TBODY_TR)
        .map(|tr| tr.select(&ROW_CELLS).map(element_text).collect())
        .collect();
    if headers.is_empty() && rows.is_empty() {
        return;
    }

    ensure_newline(out);
    if !headers.is_empty() {
        out.push_str(&format!("| {} |\n", headers.join(" | ")));
        let sep = headers.iter().map(|_| "---").collect::<Vec<_>>();
        out.push_str(&format!("| {} |\n", sep.join(" | ")));
    }
    for row in rows {
        if !row.is_empty() {
            out.push_str(&format!("| {} |\n", row.join(" | ")));
        }
    }
    ensure_newline(out);
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "li"
            | "ul"
            | "ol"
            | "blockquote"
            | "tr"
            | "section"
            | "article"
            | "pre"
    )
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

fn cleanup(s: &str) -> String {
    let s = TRAILING_WS.replace_all(s, "\n");
    let s = EXTRA_NEWLINES.replace_all(&s, "\n\n");
    s.trim().to_string()
}
