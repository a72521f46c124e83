//! Converter for the small Markdown subset used by the blog posts.
//!
//! There is no parser here: the text goes through a fixed sequence of regex
//! substitutions. Supported: fenced code, `#`/`##`/`###` headings, `-` lists,
//! `[text](url)` links and plain paragraphs.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());
static CODE_SLOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<\x00(\d+)\x00>").unwrap());

static H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*-[ \t]+(.*)$").unwrap());
static LIST_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^<li>.*</li>(?:\n<li>.*</li>)*$").unwrap());

static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*([^<\s].*?)[ \t]*$").unwrap());

/// Escapes the characters that matter inside `<pre><code>`.
pub(crate) fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Converts `md` to an HTML fragment. Never fails; input outside the subset
/// is passed through (HTML outside code blocks is not escaped).
pub(crate) fn md_to_html(md: &str) -> String {
    // NUL is reserved for the code slot markers below
    let md = md.replace("\r\n", "\n").replace('\0', "\u{FFFD}");

    // code blocks go first and are parked behind a slot marker so that the
    // line rules below cannot touch their contents
    let mut blocks: Vec<String> = vec![];
    let md = CODE_FENCE.replace_all(&md, |caps: &Captures| {
        blocks.push(format!("<pre><code>{}</code></pre>", escape_html(&caps[1])));
        format!("<\u{0}{}\u{0}>", blocks.len() - 1)
    });

    let md = H3.replace_all(&md, "<h3>${1}</h3>");
    let md = H2.replace_all(&md, "<h2>${1}</h2>");
    let md = H1.replace_all(&md, "<h1>${1}</h1>");

    let md = LIST_ITEM.replace_all(&md, "<li>${1}</li>");
    let md = LIST_RUN.replace_all(&md, "<ul>${0}</ul>");

    let md = LINK.replace_all(&md, r#"<a href="${2}" target="_blank" rel="noopener">${1}</a>"#);

    let md = PARAGRAPH.replace_all(&md, "<p>${1}</p>");

    CODE_SLOT
        .replace_all(&md, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| blocks.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}
