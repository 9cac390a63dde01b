mod file;
mod stdio;

pub use file::FileSink;
pub use stdio::{stderr_sink, stdout_sink, StderrSink, StdoutSink};
