use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::console::{PluginConsoleWriter, StreamKind};
use crate::error::PumpError;
use crate::util::RingBytes;

const READ_CHUNK: usize = 16 * 1024;

pub fn pump_stdout<R>(
    rd: R,
    writer: PluginConsoleWriter,
    ring: Option<Arc<RingBytes>>,
) -> JoinHandle<Result<u64, PumpError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    pump_stream(rd, writer, StreamKind::Stdout, ring)
}

pub fn pump_stderr<R>(
    rd: R,
    writer: PluginConsoleWriter,
    ring: Option<Arc<RingBytes>>,
) -> JoinHandle<Result<u64, PumpError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    pump_stream(rd, writer, StreamKind::Stderr, ring)
}

/// Forwards everything read from `rd` to `writer`, one chunk per read.
///
/// Console failures are non-fatal here (see [`PluginConsoleWriter::report`]);
/// only a read error on the plugin pipe ends the pump early. Resolves to the
/// number of bytes read.
pub fn pump_stream<R>(
    mut rd: R,
    writer: PluginConsoleWriter,
    stream: StreamKind,
    ring: Option<Arc<RingBytes>>,
) -> JoinHandle<Result<u64, PumpError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_CHUNK];
        let mut total = 0u64;

        loop {
            let n = rd.read(&mut buf).await.map_err(|e| PumpError::StreamIo {
                plugin: writer.identity().name().to_string(),
                stream,
                source: e,
            })?;
            if n == 0 {
                break;
            }

            if let Some(ring) = ring.as_ref() {
                ring.push(&buf[..n]);
            }
            writer.report(stream, &buf[..n]).await;
            total += n as u64;
        }

        tracing::debug!(
            target: "plugcon.pump",
            plugin = %writer.identity().name(),
            stream = %stream,
            bytes = total,
            "stream closed"
        );
        Ok(total)
    })
}
