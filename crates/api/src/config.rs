//! Process configuration, read once from the environment at startup.

use std::path::PathBuf;

use tracing::info;

pub const DATA_DIR_VAR: &str = "STOCKFLOW_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "STOCKFLOW_BIND_ADDR";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the ledger's JSON collections.
    pub data_dir: PathBuf,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str, default: &str| {
            match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                Some(v) => v,
                None => {
                    info!(var = key, default, "not set; using default");
                    default.to_string()
                }
            }
        };

        Self {
            data_dir: PathBuf::from(value(DATA_DIR_VAR, DEFAULT_DATA_DIR)),
            bind_addr: value(BIND_ADDR_VAR, DEFAULT_BIND_ADDR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset_or_blank() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");

        let cfg = AppConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn overrides_from_environment() {
        let env: HashMap<&str, &str> = HashMap::from([
            (DATA_DIR_VAR, "/var/lib/stockflow"),
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
        ]);
        let cfg = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/stockflow"));
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
    }
}
