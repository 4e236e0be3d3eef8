use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    PaddockError,
    laps::{DEFAULT_CLOSING_SECTOR, DEFAULT_OVERVIEW_LIMIT},
    replay::ProjectionConfig,
};

const CONFIG_DIR_NAME: &str = "paddock";
const CONFIG_FILE_NAME: &str = "config.json";

/// Circuit and presentation settings the aggregation pipeline runs with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Sector whose frame carries the lap time, usually the last one
    pub closing_sector: u32,
    /// Keep only the last completed record for a repeated (car, lap).
    /// Turning it off keeps every record the feed sent.
    pub dedupe_laps: bool,
    /// Rows shown in the lap overview
    pub overview_limit: usize,
    pub projection: ProjectionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            closing_sector: DEFAULT_CLOSING_SECTOR,
            dedupe_laps: true,
            overview_limit: DEFAULT_OVERVIEW_LIMIT,
            projection: ProjectionConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Reads the config from the user's config directory, if one was saved.
    pub fn from_local_file() -> Result<Option<Self>, PaddockError> {
        match Self::default_path() {
            Some(config_path) if config_path.exists() => Self::from_file(&config_path).map(Some),
            _ => Ok(None),
        }
    }

    pub fn from_file(config_path: &Path) -> Result<Self, PaddockError> {
        let file = std::fs::File::open(config_path)
            .map_err(|e| PaddockError::ConfigIOError { source: e })?;
        let config: Self = serde_json::from_reader(file)
            .map_err(|e| PaddockError::ConfigSerializeError { source: e })?;
        config.validate()?;
        debug!("Loaded engine config from {:?}: {:?}", config_path, config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PaddockError> {
        if self.closing_sector == 0 {
            return Err(PaddockError::InvalidConfig {
                field: "closing_sector".to_string(),
                reason: "sectors are numbered from 1".to_string(),
            });
        }
        if self.projection.sector_count == 0 {
            return Err(PaddockError::InvalidConfig {
                field: "projection.sector_count".to_string(),
                reason: "a lap has at least one sector".to_string(),
            });
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), PaddockError> {
        let config_path = Self::default_path().ok_or(PaddockError::NoConfigDir)?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), PaddockError> {
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| PaddockError::ConfigIOError { source: e })?;
            }
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| PaddockError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| PaddockError::ConfigSerializeError { source: e })
    }
}
