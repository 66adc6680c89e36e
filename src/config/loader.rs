use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$TAIGA_BOARD_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/taiga-board/config.toml`
/// 4. `~/.config/taiga-board/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    // If an explicit path was given, just load that.
    if let Some(path) = explicit_path {
        return read_config(path);
    }

    match find_config() {
        Some(path) => read_config(&path),
        // No config found — use defaults.
        None => Ok(AppConfig::default()),
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

fn find_config() -> Option<PathBuf> {
    // $TAIGA_BOARD_CONFIG
    if let Ok(path) = std::env::var("TAIGA_BOARD_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/taiga-board/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("taiga-board/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/taiga-board/config.toml
    if let Some(home) = home_dir() {
        let p = home.join(".config/taiga-board/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
