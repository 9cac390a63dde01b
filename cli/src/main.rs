use clap::Parser;
mod commands;
mod error;
use commands::cli;
use error::CliError;
use plugcon_core::config::{self, AppConfig};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = load_config(&args)?;
    init_tracing(&cfg).map_err(CliError::Logging)?;

    match args.command {
        cli::Commands::Run(run_args) => commands::run::handle_run(run_args, &cfg).await,
        cli::Commands::Tag(tag_args) => commands::tag::handle_tag(tag_args, &cfg).await,
        cli::Commands::Indent(indent_args) => commands::indent::handle_indent(indent_args).await,
    }
}

fn load_config(args: &cli::Args) -> Result<AppConfig, CliError> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => config::load_from_path(std::path::Path::new(path)),
        None => config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;

    if let Some(target) = args.console.as_ref() {
        cfg.console.target = target.clone();
    }
    if args.no_color {
        cfg.console.color = false;
    }
    Ok(cfg)
}

/// Standard stream that carries diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiagStream {
    Stdout,
    Stderr,
}

impl DiagStream {
    /// Picks the standard stream the merged plugin output is not using.
    fn beside(console_target: &str) -> Self {
        match console_target.trim() {
            "stderr" => DiagStream::Stdout,
            _ => DiagStream::Stderr,
        }
    }

    fn make_writer(self) -> BoxMakeWriter {
        match self {
            DiagStream::Stdout => BoxMakeWriter::new(std::io::stdout),
            DiagStream::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }

    fn is_terminal(self) -> bool {
        match self {
            DiagStream::Stdout => atty::is(atty::Stream::Stdout),
            DiagStream::Stderr => atty::is(atty::Stream::Stderr),
        }
    }
}

fn log_filter(level: &str) -> Result<EnvFilter, String> {
    match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => Ok(EnvFilter::from_default_env()),
        _ => EnvFilter::try_new(level).map_err(|e| e.to_string()),
    }
}

fn log_file_writer(directory: Option<&str>) -> Result<NonBlocking, String> {
    let dir = directory
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("plugcon"));
    std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;

    let appender =
        tracing_appender::rolling::never(dir, format!("plugcon.{}.log", std::process::id()));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}

fn init_tracing(cfg: &AppConfig) -> Result<(), String> {
    let logging = &cfg.logging;
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err("logging disabled for both console and file".to_string());
    }

    let filter = log_filter(&logging.level)?;
    let diag = DiagStream::beside(&cfg.console.target);
    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(diag.make_writer())
            .with_ansi(diag.is_terminal())
    });
    let file_layer = if logging.file {
        let writer = log_file_writer(logging.directory.as_deref())?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_avoid_the_merged_stream() {
        assert_eq!(DiagStream::beside("stdout"), DiagStream::Stderr);
        assert_eq!(DiagStream::beside(""), DiagStream::Stderr);
        assert_eq!(DiagStream::beside(" stderr "), DiagStream::Stdout);
        assert_eq!(DiagStream::beside("/tmp/console.log"), DiagStream::Stderr);
    }

    #[test]
    fn configured_level_is_a_valid_filter() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(log_filter("plugcon=debug,warn").is_ok());
            assert!(log_filter("plugcon=loudest").is_err());
        }
    }
}
