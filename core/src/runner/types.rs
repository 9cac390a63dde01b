use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct PluginStartArgs {
    pub cmd: String,
    pub args: Vec<String>,
    pub envs: HashMap<String, String>,
}

/// Summary of one plugin run.
#[derive(Debug, Clone)]
pub struct PluginOutcome {
    pub plugin: String,
    pub exit_code: i32,
    pub duration_ms: u64,
    pub stdout_bytes: u64,
    pub stderr_bytes: u64,
    /// Last bytes the plugin wrote to stderr, for error summaries.
    pub stderr_tail: String,
    /// Chunks that never reached the console because the sink failed.
    pub failed_writes: u64,
}

impl PluginOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
