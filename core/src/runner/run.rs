use std::time::Instant;

use crate::console::{PluginConsoleWriter, StreamKind};
use crate::error::PumpError;
use crate::util::RingBytes;

use super::io_pump;
use super::traits::PluginSession;
use super::types::PluginOutcome;

/// Drives one plugin session to completion.
///
/// Both output pipes are pumped concurrently through `writer`, then the
/// process is awaited. `capture_bytes` bounds how much of stderr is kept for
/// [`PluginOutcome::stderr_tail`].
pub async fn run_plugin(
    mut session: Box<dyn PluginSession>,
    writer: PluginConsoleWriter,
    capture_bytes: usize,
) -> Result<PluginOutcome, PumpError> {
    let started = Instant::now();
    let plugin = writer.identity().name().to_string();
    let ring_err = RingBytes::new(capture_bytes);

    let out_task = session
        .stdout()
        .map(|rd| io_pump::pump_stdout(rd, writer.clone(), None));
    let err_task = session
        .stderr()
        .map(|rd| io_pump::pump_stderr(rd, writer.clone(), Some(ring_err.clone())));

    let exit = session.wait().await;

    let stdout_bytes = join_pump(&plugin, StreamKind::Stdout, out_task).await?;
    let stderr_bytes = join_pump(&plugin, StreamKind::Stderr, err_task).await?;
    let exit_code = exit?;

    let outcome = PluginOutcome {
        plugin,
        exit_code,
        duration_ms: started.elapsed().as_millis() as u64,
        stdout_bytes,
        stderr_bytes,
        stderr_tail: ring_err.to_string_lossy(),
        failed_writes: writer.failed_writes(),
    };
    tracing::info!(
        plugin = %outcome.plugin,
        exit_code = outcome.exit_code,
        duration_ms = outcome.duration_ms,
        stdout_bytes = outcome.stdout_bytes,
        stderr_bytes = outcome.stderr_bytes,
        failed_writes = outcome.failed_writes,
        "plugin finished"
    );
    Ok(outcome)
}

async fn join_pump(
    plugin: &str,
    stream: StreamKind,
    task: Option<tokio::task::JoinHandle<Result<u64, PumpError>>>,
) -> Result<u64, PumpError> {
    let Some(task) = task else {
        return Ok(0);
    };
    match task.await {
        Ok(res) => res,
        Err(e) => Err(PumpError::Join {
            plugin: plugin.to_string(),
            reason: format!("{stream} pump: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{ConsoleAggregator, MemorySink, PluginIdentity};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::io::AsyncRead;

    struct ScriptedSession {
        stdout: Option<&'static [u8]>,
        stderr: Option<&'static [u8]>,
        exit_code: i32,
    }

    #[async_trait]
    impl PluginSession for ScriptedSession {
        fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
            self.stdout
                .take()
                .map(|b| Box::new(b) as Box<dyn AsyncRead + Unpin + Send>)
        }

        fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
            self.stderr
                .take()
                .map(|b| Box::new(b) as Box<dyn AsyncRead + Unpin + Send>)
        }

        async fn wait(&mut self) -> anyhow::Result<i32> {
            Ok(self.exit_code)
        }
    }

    #[tokio::test]
    async fn pumps_both_streams_and_reports_outcome() {
        let sink = MemorySink::new();
        let writer = ConsoleAggregator::new(sink.clone()).writer_for(PluginIdentity::new("html"));
        let session = ScriptedSession {
            stdout: Some(b"report written\n"),
            stderr: Some(b"warning: slow\n"),
            exit_code: 3,
        };

        let outcome = run_plugin(Box::new(session), writer, 64).await.unwrap();

        assert_eq!(outcome.plugin, "html");
        assert_eq!(outcome.exit_code, 3);
        assert!(!outcome.success());
        assert_eq!(outcome.stdout_bytes, 15);
        assert_eq!(outcome.stderr_bytes, 14);
        assert_eq!(outcome.stderr_tail, "warning: slow\n");
        assert_eq!(outcome.failed_writes, 0);

        let out = sink.contents_lossy();
        assert!(out.contains("[html Plugin] : report written\n"));
        assert!(out.contains("[html Plugin] : warning: slow\n"));
    }

    #[tokio::test]
    async fn missing_pipes_count_as_empty() {
        let writer = ConsoleAggregator::new(MemorySink::new()).writer_for(PluginIdentity::new("p"));
        let session = ScriptedSession {
            stdout: None,
            stderr: None,
            exit_code: 0,
        };

        let outcome = run_plugin(Box::new(session), writer, 0).await.unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.stdout_bytes + outcome.stderr_bytes, 0);
        assert_eq!(outcome.stderr_tail, "");
    }
}
