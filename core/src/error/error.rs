use thiserror::Error;

use crate::console::StreamKind;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("console sink '{sink}' rejected write: {source}")]
    SinkWrite {
        sink: String,
        source: std::io::Error,
    },
}

impl ConsoleError {
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        Self::SinkWrite {
            sink: sink.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum PumpError {
    #[error("stream io error: plugin {plugin} {stream}: {source}")]
    StreamIo {
        plugin: String,
        stream: StreamKind,
        source: std::io::Error,
    },
    #[error("plugin session error: {0}")]
    Session(#[from] anyhow::Error),
    #[error("pump task for plugin {plugin} did not finish: {reason}")]
    Join { plugin: String, reason: String },
}
