use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default plugcon data directory: ~/.plugcon
pub fn get_plugcon_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".plugcon"))
}

pub fn parse_config(s: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str::<AppConfig>(s)?)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read config {}: {e}", path.display()))?;
    let mut cfg = parse_config(&s)?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    let explicit = std::env::var_os("PLUGCON_CONFIG")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let user = get_plugcon_data_dir().ok().map(|d| d.join("config.toml"));
    load_first(explicit, user, Path::new("plugcon.toml"))
}

/// Lookup order: explicit path (must exist), user config, local config,
/// then built-in defaults. Env overrides apply in every case.
fn load_first(
    explicit: Option<PathBuf>,
    user: Option<PathBuf>,
    local: &Path,
) -> anyhow::Result<AppConfig> {
    if let Some(p) = explicit {
        return load_from_path(&p);
    }
    if let Some(p) = user.filter(|p| p.exists()) {
        return load_from_path(&p);
    }
    if local.exists() {
        return load_from_path(local);
    }

    let mut cfg = AppConfig::default();
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(v) = std::env::var("PLUGCON_CONSOLE_TARGET") {
        if !v.trim().is_empty() {
            cfg.console.target = v;
        }
    }
    if let Ok(v) = std::env::var("PLUGCON_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v;
        }
    }
}
