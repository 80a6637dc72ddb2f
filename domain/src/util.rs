//! Shared utility functions.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of model output for log messages.
///
/// Newlines are shown as `\n` and the text is cut at `max_bytes`, with an
/// ellipsis appended when anything was dropped.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let cut = truncate_str(s, max_bytes);
    let mut out = cut.replace('\n', "\\n");
    if cut.len() < s.len() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_str("cash", 10), "cash");
        assert_eq!(truncate_str("", 3), "");
    }

    #[test]
    fn test_truncate_backs_off_to_char_boundary() {
        // '€' is three bytes
        let answer = "5€ on hand";
        assert_eq!(truncate_str(answer, 2), "5");
        assert_eq!(truncate_str(answer, 4), "5€");
    }

    #[test]
    fn test_preview_of_model_reply() {
        assert_eq!(preview("{\n  \"Stocks\": {}\n}", 64), "{\\n  \"Stocks\": {}\\n}");
        assert_eq!(preview("Sure! Here is the canvas", 5), "Sure!...");
        assert_eq!(preview("€€", 4), "€...");
    }
}
