use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::catalog::WardCatalog;
use crate::engine::error::{ScheduleError, ScheduleResult};
use crate::engine::types::WardId;

pub const CONFIG_DIR: &str = ".sweep";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Ward whose schedule stands in for unknown wards.
    #[serde(default = "default_ward")]
    pub default_ward: WardId,
    /// JSON catalog replacing the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    #[serde(default = "default_upcoming_count")]
    pub upcoming_count: usize,
}

fn default_ward() -> WardId {
    WardId::DEFAULT
}

fn default_upcoming_count() -> usize {
    3
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            default_ward: default_ward(),
            catalog: None,
            upcoming_count: default_upcoming_count(),
        }
    }
}

impl SweepConfig {
    #[must_use]
    pub fn default_path() -> PathBuf {
        Path::new(CONFIG_DIR).join(CONFIG_FILE)
    }

    pub fn load(path: &Path) -> ScheduleResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|err| ScheduleError::Config(format!("unable to parse config: {err}")))
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> ScheduleResult<Self> {
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> ScheduleResult<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;
        let encoded = toml::to_string_pretty(self)
            .map_err(|err| ScheduleError::Config(format!("unable to encode config: {err}")))?;
        fs::write(path, encoded)?;
        Ok(())
    }

    /// Builds the configured catalog. Relative catalog paths resolve
    /// against the working directory.
    pub fn catalog(&self) -> ScheduleResult<WardCatalog> {
        match &self.catalog {
            Some(path) => WardCatalog::load(path, self.default_ward),
            None if self.default_ward == WardId::DEFAULT => WardCatalog::builtin(),
            None => {
                let builtin = WardCatalog::builtin()?;
                WardCatalog::from_schedules(builtin.wards().cloned().collect(), self.default_ward)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SweepConfig = toml::from_str("upcoming_count = 5").unwrap();
        assert_eq!(config.upcoming_count, 5);
        assert_eq!(config.default_ward.to_string(), "Ward 1");
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_default_ward_changes_fallback() {
        let config: SweepConfig = toml::from_str("default_ward = \"Ward 13\"").unwrap();
        let catalog = config.catalog().unwrap();
        let unknown = WardId::new(90).unwrap();
        assert_eq!(catalog.schedule(unknown).ward().number(), 13);
    }

    #[test]
    fn test_default_ward_outside_builtin_is_rejected() {
        let config: SweepConfig = toml::from_str("default_ward = \"Ward 50\"").unwrap();
        assert!(matches!(config.catalog(), Err(ScheduleError::MissingDefaultWard(_))));
    }
}
