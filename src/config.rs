use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Scanning service
    pub endpoint: String,
    pub timeout_ms: u64,

    // Output
    pub log_json: bool,
    pub color: bool,
}

fn parse_bool(raw: Option<String>, default: bool) -> bool {
    match raw.map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source so tests don't
    /// have to mutate the process environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = var("PHISHSCAN_ENDPOINT")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_ms = match var("PHISHSCAN_TIMEOUT_MS") {
            None => DEFAULT_TIMEOUT_MS,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow!("PHISHSCAN_TIMEOUT_MS must be an integer, got {raw:?}"))?,
        };
        if timeout_ms == 0 {
            return Err(anyhow!("PHISHSCAN_TIMEOUT_MS cannot be 0"));
        }

        let log_json = parse_bool(var("PHISHSCAN_LOG_JSON"), false);
        let color = parse_bool(var("PHISHSCAN_COLOR"), true);

        let cfg = Self {
            endpoint,
            timeout_ms,
            log_json,
            color,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let scheme_ok = self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://");
        if !scheme_ok {
            return Err(anyhow!(
                "scanning endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = from_map(&[]).expect("config");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!cfg.log_json);
        assert!(cfg.color);
    }

    #[test]
    fn reads_overrides() {
        let cfg = from_map(&[
            ("PHISHSCAN_ENDPOINT", " https://scan.internal/predict "),
            ("PHISHSCAN_TIMEOUT_MS", "2500"),
            ("PHISHSCAN_LOG_JSON", "yes"),
            ("PHISHSCAN_COLOR", "off"),
        ])
        .expect("config");
        assert_eq!(cfg.endpoint, "https://scan.internal/predict");
        assert_eq!(cfg.timeout_ms, 2500);
        assert!(cfg.log_json);
        assert!(!cfg.color);
    }

    #[test]
    fn unrecognized_bool_falls_back_to_default() {
        let cfg = from_map(&[("PHISHSCAN_COLOR", "maybe")]).expect("config");
        assert!(cfg.color);
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(from_map(&[("PHISHSCAN_TIMEOUT_MS", "0")]).is_err());
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(from_map(&[("PHISHSCAN_TIMEOUT_MS", "soon")]).is_err());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        assert!(from_map(&[("PHISHSCAN_ENDPOINT", "ftp://scan/predict")]).is_err());
    }
}
