use clap::{Args as ClapArgs, Parser, Subcommand};
use plugcon_core::config::PluginConfig;

#[derive(Parser, Debug)]
#[command(name = "plugcon", version, about = "Run plugins and merge their console output")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of the default lookup.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Where merged output goes: stdout, stderr, or a file path.
    #[arg(long, global = true)]
    pub console: Option<String>,

    /// Print plugin tags without color.
    #[arg(long, default_value_t = false, global = true)]
    pub no_color: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Plugin to run, as NAME=COMMAND [ARGS...]. Can be specified multiple times.
    #[arg(long = "plugin", action = clap::ArgAction::Append)]
    pub plugins: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TagArgs {
    /// Plugin name used in the tag.
    #[arg(long)]
    pub name: String,

    /// Treat stdin as the plugin's stderr.
    #[arg(long, default_value_t = false)]
    pub stderr: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IndentArgs {
    #[arg(long, default_value_t = 2)]
    pub width: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run plugins concurrently and merge their tagged output.
    Run(RunArgs),
    /// Tag stdin as if a plugin had printed it.
    Tag(TagArgs),
    /// Indent stdin.
    Indent(IndentArgs),
}

/// Parses `NAME=COMMAND [ARGS...]`, splitting the command on whitespace.
pub fn parse_plugin_arg(arg: &str) -> Result<PluginConfig, String> {
    let (name, command_line) = arg
        .split_once('=')
        .ok_or_else(|| format!("invalid --plugin '{arg}': expected NAME=COMMAND"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid --plugin '{arg}': empty name"));
    }
    let mut words = command_line.split_whitespace().map(str::to_string);
    let command = words
        .next()
        .ok_or_else(|| format!("invalid --plugin '{arg}': empty command"))?;

    Ok(PluginConfig {
        name: name.to_string(),
        command,
        args: words.collect(),
        env: Default::default(),
        color: None,
    })
}
