//! Shared console and the per-plugin writers feeding it.
//!
//! ```text
//! plugin A stdout ─┐
//! plugin A stderr ─┼─ PluginConsoleWriter(A) ─┐
//!                                              ├─ ConsoleAggregator ── ConsoleSink
//! plugin B stdout ─┴─ PluginConsoleWriter(B) ─┘   (one write at a time)
//! ```

mod aggregator;
mod identity;
mod sink;
mod stream;
mod writer;

pub use aggregator::{ConsoleAggregator, ConsoleStats};
pub use identity::{plugin_tag, PluginIdentity};
pub use sink::{ConsoleSink, MemorySink, WriterSink};
pub use stream::StreamKind;
pub use writer::PluginConsoleWriter;

pub(crate) fn flow_audit_enabled() -> bool {
    std::env::var_os("PLUGCON_FLOW_AUDIT")
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false)
}
