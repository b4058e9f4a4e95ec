//! Free-text sanitizers. Every function here is total and idempotent:
//! applying it to its own output returns that output unchanged.

use std::sync::OnceLock;

use regex::Regex;

pub const MAX_INPUT_CHARS: usize = 1000;
pub const MAX_SEARCH_CHARS: usize = 100;
/// Maximum length of an email address path (RFC 5321).
pub const MAX_EMAIL_CHARS: usize = 254;

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
            .expect("script pattern is valid")
    })
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Removes every matched `<`…`>` span, nested spans included, in one
/// left-to-right pass, then drops any unmatched angle brackets.
fn strip_tags(text: &str) -> String {
    let mut open: Vec<usize> = Vec::new();
    // Outermost matched spans as byte ranges, sorted and disjoint.
    let mut spans: Vec<(usize, usize)> = Vec::new();

    for (i, c) in text.char_indices() {
        match c {
            '<' => open.push(i),
            '>' => {
                if let Some(start) = open.pop() {
                    while spans.last().is_some_and(|&(s, _)| s > start) {
                        spans.pop();
                    }
                    spans.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in spans {
        out.push_str(&text[cursor..start]);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out.retain(|c| c != '<' && c != '>');
    out
}

/// Removes script/style elements with their content, then every other tag
/// while keeping inner text. Linear in the input length.
fn strip_markup(text: &str) -> String {
    let without_scripts = script_re().replace_all(text, "");
    strip_tags(&without_scripts)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Plain-text form of arbitrary user input, at most 1000 characters.
pub fn sanitize_input(text: &str) -> String {
    let stripped = strip_markup(text);
    truncate_chars(stripped.trim(), MAX_INPUT_CHARS)
        .trim_end()
        .to_string()
}

/// Search-box text: markup removed, whitespace runs collapsed, at most 100 characters.
pub fn sanitize_search_query(text: &str) -> String {
    let stripped = strip_markup(text);
    let collapsed = whitespace_re().replace_all(&stripped, " ");
    truncate_chars(collapsed.trim(), MAX_SEARCH_CHARS)
        .trim_end()
        .to_string()
}

/// Lowercased email restricted to `[a-z0-9@._-]`, at most 254 characters.
pub fn sanitize_email(text: &str) -> String {
    let stripped = strip_markup(text).to_lowercase();
    let filtered: String = stripped
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-'))
        .collect();
    truncate_chars(&filtered, MAX_EMAIL_CHARS)
}
