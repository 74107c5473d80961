//! Server config loader (strict YAML parsing + environment overrides).
//!
//! Environment variables understood by `apply_env`:
//! - `DOPPLER_ADDR`: stream endpoint; selects the tcp source
//! - `CF_ACCESS_TOKEN`: access credential sent on subscribe
//! - `PORT`: listen port, binds `0.0.0.0:PORT`

pub mod schema;

use std::fs;

use taxoscope_core::error::{Result, TaxoscopeError};

pub use schema::{ServerConfig, ServerSection, SourceKind, SourceSection};

/// Names the optional YAML file read by `load_from_env`.
pub const CONFIG_PATH_ENV: &str = "TAXOSCOPE_CONFIG";

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn read_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TaxoscopeError::Config(format!("read config failed ({path}): {e}")))?;
    parse(&s)
}

fn parse(s: &str) -> Result<ServerConfig> {
    serde_yaml::from_str(s).map_err(|e| TaxoscopeError::Config(format!("invalid yaml: {e}")))
}

/// Build the process config: optional file from `TAXOSCOPE_CONFIG`, then
/// environment overrides, then validation.
pub fn load_from_env() -> Result<ServerConfig> {
    let lookup = |key: &str| std::env::var(key).ok();

    let mut cfg = match lookup(CONFIG_PATH_ENV) {
        Some(path) => read_file(&path)?,
        None => ServerConfig::default(),
    };

    apply_env(&mut cfg, lookup)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Overlay environment values on `cfg`. Empty values are ignored.
pub fn apply_env<F>(cfg: &mut ServerConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(addr) = get("DOPPLER_ADDR") {
        cfg.source.kind = SourceKind::Tcp;
        cfg.source.address = strip_scheme(addr.trim()).to_string();
    }
    if let Some(token) = get("CF_ACCESS_TOKEN") {
        cfg.source.access_token = token;
    }
    if let Some(port) = get("PORT") {
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|_| TaxoscopeError::Config(format!("PORT must be a port number, got {port:?}")))?;
        cfg.server.listen = format!("0.0.0.0:{port}");
    }
    Ok(())
}

fn strip_scheme(addr: &str) -> &str {
    ["ws://", "wss://", "tcp://"]
        .iter()
        .find_map(|scheme| addr.strip_prefix(scheme))
        .unwrap_or(addr)
        .trim_end_matches('/')
}
