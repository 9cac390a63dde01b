use plugcon_core::config::{AppConfig, PluginConfig};
use plugcon_core::runner::pump_stream;
use plugcon_core::{PluginIdentity, PumpError, StreamKind};
use plugcon_plugins::factory;

use crate::commands::cli::TagArgs;
use crate::error::CliError;

/// Tags stdin chunk by chunk, exactly as a plugin pipe would be.
pub async fn handle_tag(args: TagArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let identity = tag_identity(&args.name)?;
    let console = factory::build_console(&cfg.console)
        .await
        .map_err(|e| CliError::Config(e.to_string()))?;
    let writer = console.writer_for(identity);
    let stream = if args.stderr {
        StreamKind::Stderr
    } else {
        StreamKind::Stdout
    };

    let task = pump_stream(tokio::io::stdin(), writer.clone(), stream, None);
    let pumped = task.await.map_err(|e| PumpError::Join {
        plugin: writer.identity().name().to_string(),
        reason: e.to_string(),
    })?;
    pumped?;

    if writer.failed_writes() > 0 {
        return Ok(20);
    }
    Ok(0)
}

/// Same naming rules as configured plugins; tags from stdin are never colored.
fn tag_identity(name: &str) -> Result<PluginIdentity, CliError> {
    let cfg = PluginConfig {
        name: name.to_string(),
        command: String::new(),
        args: Vec::new(),
        env: Default::default(),
        color: None,
    };
    factory::plugin_identity(&cfg, false).map_err(|e| CliError::Config(e.to_string()))
}
