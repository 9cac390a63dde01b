use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::types::PluginStartArgs;

/// A running plugin process, as handed over by the process manager.
///
/// Each stream accessor yields its pipe once; later calls return `None`.
#[async_trait]
pub trait PluginSession: Send {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    /// Waits for the process to exit and returns its exit code.
    async fn wait(&mut self) -> anyhow::Result<i32>;
}

#[async_trait]
pub trait PluginLauncher: Send + Sync {
    fn name(&self) -> &str;
    async fn start_session(&self, args: &PluginStartArgs)
        -> anyhow::Result<Box<dyn PluginSession>>;
}
