use anyhow::{Result, bail};
use secrecy::Secret;

use crate::config::types::ServerConfig;

/// Resolve the Taiga auth token.
///
/// Priority:
/// 1. `TAIGA_TOKEN` environment variable
/// 2. `token` in the `[server]` config section
pub fn resolve_token(server: &ServerConfig) -> Result<Secret<String>> {
    if let Ok(token) = std::env::var("TAIGA_TOKEN")
        && !token.is_empty()
    {
        return Ok(Secret::new(token));
    }

    if let Some(token) = &server.token
        && !token.is_empty()
    {
        return Ok(Secret::new(token.clone()));
    }

    bail!(
        "no Taiga token found. Set TAIGA_TOKEN or add `token` to the \
         [server] section of the config."
    )
}
