use plugcon_core::WriterSink;

pub type StdoutSink = WriterSink<tokio::io::Stdout>;
pub type StderrSink = WriterSink<tokio::io::Stderr>;

pub fn stdout_sink() -> StdoutSink {
    WriterSink::new("stdout", tokio::io::stdout())
}

pub fn stderr_sink() -> StderrSink {
    WriterSink::new("stderr", tokio::io::stderr())
}
