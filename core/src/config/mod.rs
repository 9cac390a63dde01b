mod load;
mod types;

pub use load::{get_plugcon_data_dir, load_default, load_from_path, parse_config};
pub use types::{AppConfig, ConsoleConfig, LoggingConfig, PluginConfig};
