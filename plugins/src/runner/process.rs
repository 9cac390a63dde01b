use anyhow::Result;
use async_trait::async_trait;
use plugcon_core::runner::{PluginLauncher, PluginSession, PluginStartArgs};
use std::process::Stdio;
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};

/// Starts plugins as child processes with piped output.
pub struct ProcessLauncher {}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginLauncher for ProcessLauncher {
    fn name(&self) -> &str {
        "process"
    }

    async fn start_session(&self, args: &PluginStartArgs) -> Result<Box<dyn PluginSession>> {
        let child = Command::new(&args.cmd)
            .args(&args.args)
            .envs(&args.envs)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| anyhow::anyhow!("spawn {}: {e}", args.cmd))?;

        tracing::debug!(cmd = %args.cmd, pid = ?child.id(), "plugin process started");
        Ok(Box::new(ProcessSession { child }))
    }
}

struct ProcessSession {
    child: Child,
}

#[async_trait]
impl PluginSession for ProcessSession {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    async fn wait(&mut self) -> Result<i32> {
        let status = self.child.wait().await?;
        Ok(status.code().unwrap_or(-1))
    }
}
