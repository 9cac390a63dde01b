use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use super::sink::ConsoleSink;
use super::writer::PluginConsoleWriter;
use super::{flow_audit_enabled, PluginIdentity};
use crate::error::ConsoleError;
use crate::util::audit_preview;

/// Counters kept by the aggregator, readable without touching the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleStats {
    pub writes: u64,
    pub bytes: u64,
    pub failed_writes: u64,
}

struct Inner {
    sink_name: String,
    sink: Mutex<Box<dyn ConsoleSink>>,
    audit: AtomicBool,
    writes: AtomicU64,
    bytes: AtomicU64,
    failed_writes: AtomicU64,
}

/// The one writer allowed to touch the real console.
///
/// Cheap to clone; every clone talks to the same sink. Each [`write`] holds
/// the sink exclusively from the first byte to the flush, so concurrent
/// writes land one after another and never interleave. Writes issued in
/// sequence by one caller land in that sequence.
///
/// [`write`]: ConsoleAggregator::write
#[derive(Clone)]
pub struct ConsoleAggregator {
    inner: Arc<Inner>,
}

impl ConsoleAggregator {
    pub fn new<S>(sink: S) -> Self
    where
        S: ConsoleSink + 'static,
    {
        Self::from_boxed(Box::new(sink))
    }

    pub fn from_boxed(sink: Box<dyn ConsoleSink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sink_name: sink.name().to_string(),
                sink: Mutex::new(sink),
                audit: AtomicBool::new(flow_audit_enabled()),
                writes: AtomicU64::new(0),
                bytes: AtomicU64::new(0),
                failed_writes: AtomicU64::new(0),
            }),
        }
    }

    /// Creates the writer for one plugin, bound to this console.
    pub fn writer_for(&self, identity: PluginIdentity) -> PluginConsoleWriter {
        PluginConsoleWriter::new(identity, self.clone())
    }

    pub fn sink_name(&self) -> &str {
        &self.inner.sink_name
    }

    /// Toggles per-write debug events carrying a preview of the payload.
    pub fn set_audit(&self, enabled: bool) {
        self.inner.audit.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn audit_enabled(&self) -> bool {
        self.inner.audit.load(Ordering::Relaxed)
    }

    /// Emits `bytes` to the sink as one contiguous unit.
    ///
    /// A failed write is counted and returned; the sink lock is released
    /// either way and later writes proceed normally. Nothing is retried.
    ///
    /// The emission runs on its own task. Dropping the returned future stops
    /// the caller from waiting but never cuts the write short, so the bytes
    /// still land whole before any later write.
    pub async fn write(&self, bytes: &[u8]) -> Result<(), ConsoleError> {
        if bytes.is_empty() {
            return Ok(());
        }

        let inner = Arc::clone(&self.inner);
        let payload = bytes.to_vec();
        match tokio::spawn(emit(inner, payload)).await {
            Ok(result) => result,
            Err(e) => Err(ConsoleError::sink_write(
                self.inner.sink_name.clone(),
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            )),
        }
    }

    pub async fn write_str(&self, text: &str) -> Result<(), ConsoleError> {
        self.write(text.as_bytes()).await
    }

    pub fn stats(&self) -> ConsoleStats {
        ConsoleStats {
            writes: self.inner.writes.load(Ordering::Relaxed),
            bytes: self.inner.bytes.load(Ordering::Relaxed),
            failed_writes: self.inner.failed_writes.load(Ordering::Relaxed),
        }
    }
}

async fn emit(inner: Arc<Inner>, bytes: Vec<u8>) -> Result<(), ConsoleError> {
    let result = {
        let mut sink = inner.sink.lock().await;
        match sink.write_all(&bytes).await {
            Ok(()) => sink.flush().await,
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(()) => {
            inner.writes.fetch_add(1, Ordering::Relaxed);
            inner.bytes.fetch_add(bytes.len() as u64, Ordering::Relaxed);
            if inner.audit.load(Ordering::Relaxed) {
                tracing::debug!(
                    target: "plugcon.console",
                    stage = "sink.out",
                    sink = %inner.sink_name,
                    bytes = bytes.len(),
                    preview = %audit_preview(&String::from_utf8_lossy(&bytes), 120)
                );
            }
            Ok(())
        }
        Err(e) => {
            inner.failed_writes.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                target: "plugcon.console",
                sink = %inner.sink_name,
                bytes = bytes.len(),
                error = %e,
                "sink write failed"
            );
            Err(ConsoleError::sink_write(inner.sink_name.clone(), e))
        }
    }
}

impl std::fmt::Debug for ConsoleAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleAggregator")
            .field("sink", &self.inner.sink_name)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
