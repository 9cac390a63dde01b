use std::path::{Path, PathBuf};

use async_trait::async_trait;
use plugcon_core::{ConsoleSink, WriterSink};

/// Appends console output to a file, creating it if missing.
pub struct FileSink {
    path: PathBuf,
    inner: WriterSink<tokio::fs::File>,
}

impl FileSink {
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            inner: WriterSink::new(format!("file:{}", path.display()), file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConsoleSink for FileSink {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(buf).await
    }

    async fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush().await
    }
}
