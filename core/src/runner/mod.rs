mod io_pump;
mod run;
mod traits;
pub mod types;

pub use io_pump::{pump_stderr, pump_stdout, pump_stream};
pub use run::run_plugin;
pub use traits::{PluginLauncher, PluginSession};
pub use types::{PluginOutcome, PluginStartArgs};
