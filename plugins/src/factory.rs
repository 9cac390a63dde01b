use anyhow::Result;
use crossterm::style::Color;

use plugcon_core::config::{ConsoleConfig, PluginConfig};
use plugcon_core::runner::{PluginLauncher, PluginStartArgs};
use plugcon_core::{ConsoleAggregator, ConsoleSink, PluginIdentity};

use crate::runner::ProcessLauncher;
use crate::sinks::{stderr_sink, stdout_sink, FileSink};

pub async fn build_sink(cfg: &ConsoleConfig) -> Result<Box<dyn ConsoleSink>> {
    let target = cfg.target.trim();
    match target {
        "" | "stdout" | "-" => Ok(Box::new(stdout_sink())),
        "stderr" => Ok(Box::new(stderr_sink())),
        path => {
            let sink = FileSink::open(path)
                .await
                .map_err(|e| anyhow::anyhow!("open console file {path}: {e}"))?;
            Ok(Box::new(sink))
        }
    }
}

/// Builds the process-wide console from config.
pub async fn build_console(cfg: &ConsoleConfig) -> Result<ConsoleAggregator> {
    let console = ConsoleAggregator::from_boxed(build_sink(cfg).await?);
    if cfg.audit {
        console.set_audit(true);
    }
    Ok(console)
}

pub fn build_launcher() -> Box<dyn PluginLauncher> {
    Box::new(ProcessLauncher::new())
}

/// Maps a color name from config to a terminal color.
///
/// Accepts the basic ANSI names with an optional `dark_` prefix, in any case.
pub fn parse_color(name: &str) -> Option<Color> {
    let color = match name.trim().to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        _ => return None,
    };
    Some(color)
}

pub fn plugin_identity(cfg: &PluginConfig, color_enabled: bool) -> Result<PluginIdentity> {
    if cfg.name.trim().is_empty() {
        anyhow::bail!("plugin name must not be empty");
    }
    let identity = PluginIdentity::new(cfg.name.clone());
    let Some(color) = cfg.color.as_deref().filter(|_| color_enabled) else {
        return Ok(identity);
    };
    match parse_color(color) {
        Some(c) => Ok(identity.with_color(c)),
        None => anyhow::bail!("plugin {}: unknown color '{color}'", cfg.name),
    }
}

pub fn start_args(cfg: &PluginConfig) -> PluginStartArgs {
    PluginStartArgs {
        cmd: cfg.command.clone(),
        args: cfg.args.clone(),
        envs: cfg.env.clone(),
    }
}
