//! Text cleanup ahead of literal decoding: fence removal and span location.

use regex::Regex;
use std::sync::LazyLock;

/// A run of three or more backticks and the word glued to it.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`{3,}([A-Za-z0-9_+.\-]*)").expect("fence pattern is valid"));

/// Remove every fenced-block delimiter, wherever it appears.
///
/// Fences alternate opening and closing. Only an opening fence owns the
/// word glued to it (its language tag), and only when that word ends at
/// whitespace, a bracket or the end of the text. A word glued to a closing
/// fence is prose and is kept.
pub fn strip_fences(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last = 0;

    for (index, caps) in FENCE.captures_iter(raw).enumerate() {
        let (Some(fence), Some(tag)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&raw[last..fence.start()]);

        let opening = index % 2 == 0;
        let tag_ends = raw[fence.end()..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == '{' || c == '[');
        if !(opening && tag_ends) {
            out.push_str(tag.as_str());
        }
        last = fence.end();
    }

    out.push_str(&raw[last..]);
    out
}

/// Byte range of a bracketed literal candidate inside cleaned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralSpan {
    pub start: usize,
    pub end: usize,
}

/// Locate the first `{` or `[` at or after `from` and the character that
/// closes it.
///
/// Brackets inside single- or double-quoted strings are ignored. An
/// unbalanced candidate (a truncated reply, or a stray closer of the wrong
/// kind) yields the longest plausible span so the decoder can report what
/// is wrong with it.
pub fn find_literal_span(text: &str, from: usize) -> Option<LiteralSpan> {
    let start = from + text.get(from..)?.find(['{', '['])?;

    let mut stack: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        let index = start + offset;
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                let expected = stack.pop();
                if expected != Some(c) || stack.is_empty() {
                    return Some(LiteralSpan {
                        start,
                        end: index + c.len_utf8(),
                    });
                }
            }
            _ => {}
        }
    }

    // Never closed: stop at the last closer of the outer kind, if any.
    let outer = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text[start..]
        .rfind(outer)
        .map(|i| start + i + 1)
        .unwrap_or(text.len());
    Some(LiteralSpan { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_text(text: &str, from: usize) -> Option<&str> {
        find_literal_span(text, from).map(|s| &text[s.start..s.end])
    }

    #[test]
    fn test_strip_labeled_and_unlabeled_fences() {
        assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "\n{\"a\": 1}\n");
        assert_eq!(strip_fences("```\n[1]\n```"), "\n[1]\n");
    }

    #[test]
    fn test_strip_fences_mid_text() {
        let raw = "Intro\n```python\nx\n```\nmore ```json {\"b\": 2} ```";
        assert_eq!(strip_fences(raw), "Intro\n\nx\n\nmore  {\"b\": 2} ");
    }

    #[test]
    fn test_word_after_closing_fence_is_kept() {
        let raw = "```json\n{\"a\": 1}\n```Hope this helps";
        assert_eq!(strip_fences(raw), "\n{\"a\": 1}\nHope this helps");
    }

    #[test]
    fn test_tag_glued_to_payload() {
        assert_eq!(strip_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_span_skips_leading_and_trailing_prose() {
        let text = "Here you go: {\"a\": [1, 2]} Hope this helps!";
        assert_eq!(span_text(text, 0), Some("{\"a\": [1, 2]}"));
    }

    #[test]
    fn test_span_ignores_brackets_in_strings() {
        let text = r#"{"a": "}", 'b': "[x"} tail"#;
        assert_eq!(span_text(text, 0), Some(r#"{"a": "}", 'b': "[x"}"#));
    }

    #[test]
    fn test_span_handles_escaped_quotes() {
        let text = r#"{"a": "say \"}\" now"} trailing"#;
        assert_eq!(span_text(text, 0), Some(r#"{"a": "say \"}\" now"}"#));
    }

    #[test]
    fn test_span_search_from_offset() {
        let text = "[note] {\"a\": 1}";
        let first = find_literal_span(text, 0).unwrap();
        assert_eq!(&text[first.start..first.end], "[note]");
        assert_eq!(span_text(text, first.end), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_span_unclosed_falls_back() {
        assert_eq!(span_text("{\"a\": {\"b\": 1}", 0), Some("{\"a\": {\"b\": 1}"));
        assert_eq!(span_text("{\"a\": 1", 0), Some("{\"a\": 1"));
    }

    #[test]
    fn test_no_opener() {
        assert!(find_literal_span("just words", 0).is_none());
        assert!(find_literal_span("{}", 5).is_none());
    }
}
