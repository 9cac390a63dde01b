use plugcon_core::config::{AppConfig, PluginConfig};
use plugcon_core::runner::{run_plugin, PluginOutcome};
use plugcon_core::PumpError;
use plugcon_plugins::factory;

use crate::commands::cli::{parse_plugin_arg, RunArgs};
use crate::error::CliError;

/// Starts every plugin, pumps them all into one console and waits.
///
/// Returns the first non-zero plugin exit code, or 0.
pub async fn handle_run(args: RunArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let plugins = collect_plugins(&args, cfg)?;

    let console = factory::build_console(&cfg.console)
        .await
        .map_err(|e| CliError::Config(e.to_string()))?;
    let launcher = factory::build_launcher();

    let mut runs = Vec::with_capacity(plugins.len());
    for plugin in &plugins {
        let identity = factory::plugin_identity(plugin, cfg.console.color)
            .map_err(|e| CliError::Config(e.to_string()))?;
        let session = launcher
            .start_session(&factory::start_args(plugin))
            .await
            .map_err(|e| CliError::Spawn(format!("plugin {}: {e}", plugin.name)))?;
        let writer = console.writer_for(identity);
        runs.push(run_plugin(session, writer, cfg.console.capture_bytes));
    }

    let results = futures::future::join_all(runs).await;
    let exit = fold_outcomes(results);

    let stats = console.stats();
    tracing::info!(
        plugins = plugins.len(),
        writes = stats.writes,
        bytes = stats.bytes,
        failed_writes = stats.failed_writes,
        "all plugins finished"
    );
    exit
}

/// Configured plugins followed by the ones given with `--plugin`.
fn collect_plugins(args: &RunArgs, cfg: &AppConfig) -> Result<Vec<PluginConfig>, CliError> {
    let mut plugins = cfg.plugins.clone();
    for arg in &args.plugins {
        plugins.push(parse_plugin_arg(arg).map_err(CliError::Config)?);
    }
    if plugins.is_empty() {
        return Err(CliError::Config(
            "no plugins configured; pass --plugin NAME=COMMAND".to_string(),
        ));
    }
    Ok(plugins)
}

/// A failed run outranks any exit code; otherwise the first non-zero code
/// in launch order wins.
fn fold_outcomes(results: Vec<Result<PluginOutcome, PumpError>>) -> Result<i32, CliError> {
    let mut exit = 0;
    let mut first_err = None;
    for res in results {
        match res {
            Ok(outcome) if outcome.success() => {}
            Ok(outcome) => {
                tracing::warn!(
                    plugin = %outcome.plugin,
                    exit_code = outcome.exit_code,
                    stderr_tail = %outcome.stderr_tail.trim_end(),
                    "plugin exited with failure"
                );
                if exit == 0 {
                    exit = outcome.exit_code;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "plugin run failed");
                first_err.get_or_insert(e);
            }
        }
    }

    match first_err {
        Some(e) => Err(CliError::Plugin(e)),
        None => Ok(exit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(plugin: &str, exit_code: i32) -> Result<PluginOutcome, PumpError> {
        Ok(PluginOutcome {
            plugin: plugin.to_string(),
            exit_code,
            duration_ms: 1,
            stdout_bytes: 0,
            stderr_bytes: 0,
            stderr_tail: String::new(),
            failed_writes: 0,
        })
    }

    fn join_failure(plugin: &str) -> Result<PluginOutcome, PumpError> {
        Err(PumpError::Join {
            plugin: plugin.to_string(),
            reason: "task panicked".to_string(),
        })
    }

    #[test]
    fn all_successful_runs_exit_zero() {
        let exit = fold_outcomes(vec![outcome("a", 0), outcome("b", 0)]).unwrap();
        assert_eq!(exit, 0);
    }

    #[test]
    fn first_non_zero_exit_code_wins() {
        let exit =
            fold_outcomes(vec![outcome("a", 0), outcome("b", 3), outcome("c", 7)]).unwrap();
        assert_eq!(exit, 3);
    }

    #[test]
    fn failed_run_outranks_exit_codes() {
        let err = fold_outcomes(vec![
            outcome("a", 3),
            join_failure("b"),
            join_failure("c"),
        ])
        .unwrap_err();
        match err {
            CliError::Plugin(PumpError::Join { plugin, .. }) => assert_eq!(plugin, "b"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn no_results_exit_zero() {
        assert_eq!(fold_outcomes(Vec::new()).unwrap(), 0);
    }

    #[test]
    fn command_line_plugins_follow_configured_ones() {
        let cfg = plugcon_core::config::parse_config(
            "[[plugins]]\nname = \"html\"\ncommand = \"./html\"\n",
        )
        .unwrap();
        let args = RunArgs {
            plugins: vec!["xml=./xml --strict".to_string()],
        };
        let plugins = collect_plugins(&args, &cfg).unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["html", "xml"]);
    }

    #[test]
    fn no_plugins_is_a_config_error() {
        let err = collect_plugins(&RunArgs { plugins: Vec::new() }, &AppConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Config(ref m) if m.contains("no plugins configured")));
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn malformed_plugin_arg_is_a_config_error() {
        let args = RunArgs {
            plugins: vec!["missing-command".to_string()],
        };
        let err = collect_plugins(&args, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
