fn tagged_capacity(text_len: usize, newlines: usize, tag_len: usize) -> usize {
    text_len.saturating_add(tag_len.saturating_mul(newlines + 1))
}

/// Prepends `tag` to every line of `text`.
///
/// Embedded empty lines (`"\n\n"`) are tagged too. A trailing `'\n'` stays the
/// last character of the result instead of opening a tagged empty line, and
/// an empty input yields an empty output.
///
/// ```
/// use plugcon_core::add_prefix_to_each_line;
///
/// let tagged = add_prefix_to_each_line("Hello\nWorld\n", "[p Plugin] : ");
/// assert_eq!(tagged, "[p Plugin] : Hello\n[p Plugin] : World\n");
/// ```
pub fn add_prefix_to_each_line(text: &str, tag: &str) -> String {
    let newlines = text.bytes().filter(|&b| b == b'\n').count();
    let mut out = String::with_capacity(tagged_capacity(text.len(), newlines, tag.len()));

    let mut lines = text.split('\n').peekable();
    let mut first = true;
    while let Some(line) = lines.next() {
        if !first {
            out.push('\n');
        }
        first = false;

        if line.is_empty() && lines.peek().is_none() {
            break;
        }
        out.push_str(tag);
        out.push_str(line);
    }
    out
}

/// Byte-level twin of [`add_prefix_to_each_line`].
///
/// Raw chunks read from a plugin pipe are not guaranteed to be valid UTF-8
/// (a multi-byte character may straddle two reads), so the write path tags
/// bytes and never decodes them.
pub fn add_prefix_to_each_line_bytes(chunk: &[u8], tag: &[u8]) -> Vec<u8> {
    let newlines = chunk.iter().filter(|&&b| b == b'\n').count();
    let mut out = Vec::with_capacity(tagged_capacity(chunk.len(), newlines, tag.len()));

    let mut lines = chunk.split(|&b| b == b'\n').peekable();
    let mut first = true;
    while let Some(line) = lines.next() {
        if !first {
            out.push(b'\n');
        }
        first = false;

        if line.is_empty() && lines.peek().is_none() {
            break;
        }
        out.extend_from_slice(tag);
        out.extend_from_slice(line);
    }
    out
}
