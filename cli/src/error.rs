use plugcon_core::PumpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("plugin failed: {0}")]
    Plugin(#[from] PumpError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    // 11: config error
    // 20: spawn / IO failure
    // 50: internal/uncategorized
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Spawn(_) => 20,
            CliError::Plugin(pe) => match pe {
                PumpError::StreamIo { .. } => 20,
                PumpError::Session(_) | PumpError::Join { .. } => 50,
            },
            CliError::Io(_) => 20,
            CliError::Logging(_) => 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_exit_codes() {
        assert_eq!(CliError::Config("x".into()).exit_code(), 11);
        assert_eq!(CliError::Spawn("x".into()).exit_code(), 20);
        assert_eq!(
            CliError::Plugin(PumpError::Join {
                plugin: "p".into(),
                reason: "panicked".into()
            })
            .exit_code(),
            50
        );
        let io = std::io::Error::from(std::io::ErrorKind::BrokenPipe);
        assert_eq!(CliError::Io(io).exit_code(), 20);
    }
}
