/// Truncates `s` to at most `max` bytes on a char boundary, marking the cut
/// with an ellipsis. Keeps audit events compact.
pub fn audit_preview(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= max)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let mut out = s[..end].to_string();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(audit_preview("hello", 10), "hello");
    }

    #[test]
    fn cuts_on_char_boundary() {
        assert_eq!(audit_preview("abcdef", 3), "abc…");
        // "é" is two bytes; it does not fit in the remaining single byte.
        assert_eq!(audit_preview("abé", 3), "ab…");
    }
}
