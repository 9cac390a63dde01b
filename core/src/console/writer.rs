use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{ConsoleAggregator, PluginIdentity, StreamKind};
use crate::error::ConsoleError;
use crate::format::add_prefix_to_each_line_bytes;
use crate::util::audit_preview;

/// Tags one plugin's output and forwards it to the shared console.
///
/// Every chunk is tagged and submitted as it arrives. A line that the plugin
/// flushed in two pieces therefore shows up as two tagged fragments; chunks
/// are never held back waiting for a newline, so partial output appears as
/// soon as the plugin produces it.
///
/// Clones share the identity, the console and the failure counter, which lets
/// the stdout and stderr pumps of one plugin use the same writer.
#[derive(Clone)]
pub struct PluginConsoleWriter {
    identity: Arc<PluginIdentity>,
    console: ConsoleAggregator,
    failed_writes: Arc<AtomicU64>,
}

impl PluginConsoleWriter {
    pub fn new(identity: PluginIdentity, console: ConsoleAggregator) -> Self {
        Self {
            identity: Arc::new(identity),
            console,
            failed_writes: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn identity(&self) -> &PluginIdentity {
        &self.identity
    }

    pub fn console(&self) -> &ConsoleAggregator {
        &self.console
    }

    /// Tags `chunk` and writes it to the console in one atomic write.
    ///
    /// Returns the number of input bytes consumed, which is always the whole
    /// chunk on success. Empty chunks are accepted and not forwarded.
    pub async fn write(&self, stream: StreamKind, chunk: &[u8]) -> Result<usize, ConsoleError> {
        if chunk.is_empty() {
            return Ok(0);
        }

        let tagged = add_prefix_to_each_line_bytes(chunk, self.identity.tag().as_bytes());
        if self.console.audit_enabled() {
            tracing::debug!(
                target: "plugcon.console",
                stage = "writer.in",
                plugin = %self.identity.name(),
                stream = %stream,
                bytes = chunk.len(),
                preview = %audit_preview(&String::from_utf8_lossy(chunk), 120)
            );
        }

        self.console.write(&tagged).await?;
        Ok(chunk.len())
    }

    pub async fn write_str(&self, text: &str) -> Result<usize, ConsoleError> {
        self.write(StreamKind::Stdout, text.as_bytes()).await
    }

    /// Like [`write`](Self::write), but a broken console only costs this
    /// chunk: the failure is logged and counted, never returned.
    pub async fn report(&self, stream: StreamKind, chunk: &[u8]) -> usize {
        match self.write(stream, chunk).await {
            Ok(n) => n,
            Err(e) => {
                self.failed_writes.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    target: "plugcon.console",
                    plugin = %self.identity.name(),
                    stream = %stream,
                    bytes = chunk.len(),
                    error = %e,
                    "dropping plugin output"
                );
                0
            }
        }
    }

    /// Number of chunks lost through [`report`](Self::report).
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for PluginConsoleWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginConsoleWriter")
            .field("plugin", &self.identity.name())
            .field("failed_writes", &self.failed_writes())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{ConsoleSink, MemorySink};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    fn writer(name: &str) -> (PluginConsoleWriter, MemorySink) {
        let sink = MemorySink::new();
        let console = ConsoleAggregator::new(sink.clone());
        (console.writer_for(PluginIdentity::new(name)), sink)
    }

    #[tokio::test]
    async fn tags_each_line_of_a_chunk() {
        let (w, sink) = writer("my-plugin");
        let n = w
            .write(StreamKind::Stdout, b"\nHello\nWorld\n\nFoo bar\n")
            .await
            .unwrap();

        assert_eq!(n, 22);
        assert_eq!(
            sink.contents_lossy(),
            "[my-plugin Plugin] : \n\
             [my-plugin Plugin] : Hello\n\
             [my-plugin Plugin] : World\n\
             [my-plugin Plugin] : \n\
             [my-plugin Plugin] : Foo bar\n"
        );
    }

    #[tokio::test]
    async fn split_line_becomes_two_fragments() {
        let (w, sink) = writer("p");
        w.write(StreamKind::Stdout, b"Hel").await.unwrap();
        w.write(StreamKind::Stdout, b"lo\n").await.unwrap();
        assert_eq!(sink.contents_lossy(), "[p Plugin] : Hel[p Plugin] : lo\n");
    }

    #[tokio::test]
    async fn stderr_is_tagged_like_stdout() {
        let (w, sink) = writer("p");
        w.write(StreamKind::Stderr, b"boom\n").await.unwrap();
        assert_eq!(sink.contents_lossy(), "[p Plugin] : boom\n");
    }

    #[tokio::test]
    async fn empty_chunk_is_not_forwarded() {
        let (w, sink) = writer("p");
        assert_eq!(w.write(StreamKind::Stdout, b"").await.unwrap(), 0);
        assert!(sink.contents().is_empty());
        assert_eq!(w.console().stats().writes, 0);
    }

    struct BrokenSink;

    #[async_trait]
    impl ConsoleSink for BrokenSink {
        fn name(&self) -> &str {
            "broken"
        }

        async fn write_all(&mut self, _buf: &[u8]) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        async fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn write_surfaces_sink_failure() {
        let w = ConsoleAggregator::new(BrokenSink).writer_for(PluginIdentity::new("p"));
        let err = w.write_str("x\n").await.unwrap_err();
        assert!(matches!(err, ConsoleError::SinkWrite { .. }));
        assert_eq!(w.failed_writes(), 0);
    }

    #[tokio::test]
    async fn report_swallows_and_counts_failures() {
        let w = ConsoleAggregator::new(BrokenSink).writer_for(PluginIdentity::new("p"));
        assert_eq!(w.report(StreamKind::Stderr, b"x\n").await, 0);
        assert_eq!(w.report(StreamKind::Stdout, b"y\n").await, 0);
        assert_eq!(w.failed_writes(), 2);
        assert_eq!(w.clone().failed_writes(), 2);
    }
}
