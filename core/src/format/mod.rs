//! Pure text transformations applied to plugin output.
//!
//! Both transformations share one notion of a line: the segments produced by
//! splitting on `'\n'`, except that the empty segment following a trailing
//! newline is not a line of its own.

mod indent;
mod prefix;

pub use indent::{indent, indent_bytes};
pub use prefix::{add_prefix_to_each_line, add_prefix_to_each_line_bytes};
