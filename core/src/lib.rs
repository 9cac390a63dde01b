//! Console aggregation for hosted plugin processes.
//!
//! Every plugin gets a [`PluginConsoleWriter`] bound to its identity. Writers
//! tag each line of whatever their plugin prints and hand the result to one
//! shared [`ConsoleAggregator`], which emits each write as a single
//! uninterrupted unit.

pub mod config;
pub mod console;
#[allow(clippy::module_inception)]
pub mod error;
pub mod format;
pub mod runner;
pub mod util;

pub use console::{
    plugin_tag, ConsoleAggregator, ConsoleSink, ConsoleStats, MemorySink, PluginConsoleWriter,
    PluginIdentity, StreamKind, WriterSink,
};
pub use error::{ConsoleError, PumpError};
pub use format::{add_prefix_to_each_line, add_prefix_to_each_line_bytes, indent, indent_bytes};
