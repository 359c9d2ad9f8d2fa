//! Service configuration stored in `subsync.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::target_map::TargetStatusMap;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "subsync.toml";

/// Env vars that override the configured status names.
pub const READY_FOR_DEV_ENV: &str = "PARENT_READY_FOR_DEV_STATUS_NAME";
pub const IN_PROGRESS_ENV: &str = "PARENT_IN_PROGRESS_STATUS_NAME";
pub const DONE_ENV: &str = "PARENT_DONE_STATUS_NAME";

/// Service configuration (TOML).
///
/// Every field is optional; a missing file behaves like an empty one. Status
/// names differ between tracker workflows, which is why they live here rather
/// than in code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SyncConfig {
    pub statuses: StatusNames,
    pub tracker: TrackerConfig,
    pub server: ServerConfig,
}

/// Status names for the three managed slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatusNames {
    pub ready_for_dev: String,
    pub in_progress: String,
    pub done: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Name of the env var holding the bearer token.
    pub token_env: String,
    /// Per-request timeout applied by the shared client.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for StatusNames {
    fn default() -> Self {
        Self {
            ready_for_dev: "To Do".to_string(),
            in_progress: "In Progress".to_string(),
            done: "Done".to_string(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            token_env: "JIRA_ACCESS_TOKEN".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl StatusNames {
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("statuses.ready_for_dev", &self.ready_for_dev),
            ("statuses.in_progress", &self.in_progress),
            ("statuses.done", &self.done),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(anyhow!("{field} must be non-empty"));
            }
        }
        for (i, (field, name)) in names.iter().enumerate() {
            for (other_field, other) in &names[i + 1..] {
                if name == other {
                    return Err(anyhow!(
                        "{field} and {other_field} must differ (both are {name:?})"
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn target_map(&self) -> TargetStatusMap {
        TargetStatusMap::new(&self.ready_for_dev, &self.in_progress, &self.done)
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        self.statuses.validate()?;
        if self.tracker.token_env.trim().is_empty() {
            return Err(anyhow!("tracker.token_env must be non-empty"));
        }
        if self.tracker.timeout_secs == 0 {
            return Err(anyhow!("tracker.timeout_secs must be > 0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.tracker.timeout_secs)
    }

    /// Replace status names with values from `lookup` where present.
    ///
    /// `lookup` is normally `std::env::var(..).ok()`; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (READY_FOR_DEV_ENV, &mut self.statuses.ready_for_dev),
            (IN_PROGRESS_ENV, &mut self.statuses.in_progress),
            (DONE_ENV, &mut self.statuses.done),
        ];
        for (var, slot) in slots {
            if let Some(value) = lookup(var).filter(|value| !value.trim().is_empty()) {
                *slot = value;
            }
        }
    }

    /// Read the bearer token from the env var named by `tracker.token_env`.
    pub fn access_token<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = &self.tracker.token_env;
        lookup(var.as_str())
            .filter(|token| !token.trim().is_empty())
            .with_context(|| format!("missing access token: set {var}"))
    }
}

/// Load config from a TOML file without env overrides.
///
/// If the file is missing, returns `SyncConfig::default()`.
pub fn load_config(path: &Path) -> Result<SyncConfig> {
    if !path.exists() {
        let cfg = SyncConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Load config from `path`, then apply process env overrides and validate.
pub fn load_effective_config(path: &Path) -> Result<SyncConfig> {
    let mut cfg = load_config(path)?;
    cfg.apply_overrides(|var| std::env::var(var).ok());
    cfg.validate().context("validate env overrides")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SyncConfig::default());
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("subsync.toml");
        fs::write(&path, "[statuses]\ndone = \"Closed\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.statuses.done, "Closed");
        assert_eq!(cfg.statuses.ready_for_dev, "To Do");
        assert_eq!(cfg.server, ServerConfig::default());
    }

    #[test]
    fn load_rejects_duplicate_status_names() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("subsync.toml");
        fs::write(&path, "[statuses]\ndone = \"To Do\"\n").expect("write");
        let err = load_config(&path).expect_err("duplicate names");
        assert!(format!("{err:#}").contains("must differ"));
    }

    #[test]
    fn validate_rejects_blank_names() {
        let mut cfg = SyncConfig::default();
        cfg.statuses.in_progress = "  ".to_string();
        let err = cfg.validate().expect_err("blank");
        assert!(err.to_string().contains("statuses.in_progress"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut cfg = SyncConfig::default();
        cfg.tracker.timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn overrides_replace_only_present_values() {
        let mut cfg = SyncConfig::default();
        cfg.apply_overrides(lookup_from(&[
            (IN_PROGRESS_ENV, "Development"),
            (DONE_ENV, ""),
        ]));
        assert_eq!(cfg.statuses.in_progress, "Development");
        assert_eq!(cfg.statuses.done, "Done");
        assert_eq!(cfg.statuses.ready_for_dev, "To Do");
    }

    #[test]
    fn access_token_reads_configured_var() {
        let mut cfg = SyncConfig::default();
        cfg.tracker.token_env = "TRACKER_TOKEN".to_string();
        let token = cfg
            .access_token(lookup_from(&[("TRACKER_TOKEN", "secret")]))
            .expect("token");
        assert_eq!(token, "secret");
    }

    #[test]
    fn access_token_missing_names_the_var() {
        let cfg = SyncConfig::default();
        let err = cfg.access_token(lookup_from(&[])).expect_err("missing");
        assert!(err.to_string().contains("JIRA_ACCESS_TOKEN"));
    }

    #[test]
    fn target_map_uses_configured_names() {
        let mut cfg = SyncConfig::default();
        cfg.statuses.done = "Closed".to_string();
        let map = cfg.statuses.target_map();
        assert!(map.is_managed("Closed"));
        assert!(!map.is_managed("Done"));
    }
}
