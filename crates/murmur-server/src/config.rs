use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't have to mutate the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("MURMUR_DB_PATH").unwrap_or_else(|| "murmur.db".into());
        let host = lookup("MURMUR_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("MURMUR_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("MURMUR_PORT is not a valid port: {raw:?}"))?,
            None => 8080,
        };

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("murmur.db"));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.addr().unwrap(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("MURMUR_DB_PATH", "/tmp/m.db"),
            ("MURMUR_HOST", "127.0.0.1"),
            ("MURMUR_PORT", "3000"),
        ])
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/m.db"));
        assert_eq!(cfg.addr().unwrap(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("MURMUR_PORT", "eighty")]).is_err());
        assert!(config(&[("MURMUR_PORT", "70000")]).is_err());
    }

    #[test]
    fn bad_host_fails_at_addr() {
        let cfg = config(&[("MURMUR_HOST", "not a host")]).unwrap();
        assert!(cfg.addr().is_err());
    }
}
