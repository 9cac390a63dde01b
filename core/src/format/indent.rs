use super::{add_prefix_to_each_line, add_prefix_to_each_line_bytes};

/// Pads every line of `text` with `width` spaces.
///
/// Lines are split exactly as in [`add_prefix_to_each_line`], so an empty line
/// in the middle of the text becomes `width` spaces while a trailing newline
/// is left alone. A width of zero returns the text unchanged.
pub fn indent(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    add_prefix_to_each_line(text, &" ".repeat(width))
}

/// Byte form of [`indent`]; input that is not valid UTF-8 passes through.
pub fn indent_bytes(bytes: &[u8], width: usize) -> Vec<u8> {
    if width == 0 {
        return bytes.to_vec();
    }
    add_prefix_to_each_line_bytes(bytes, &vec![b' '; width])
}
