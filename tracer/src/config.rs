//! Serializable run configuration.
//!
//! A [`TracerConfig`] names the cost model, heuristic and search options for
//! a run. It is read from YAML or JSON, chosen by file extension.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cost::{CostKind, CostModel, CostParams};
use crate::error::{Error, Result};
use crate::heuristic::{HeuristicKind, HeuristicModel};
use crate::search::SearchConfig;
use crate::volume::VolumeStats;
use crate::voxel::Calibration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::UnsupportedConfigFormat(path.display().to_string()))?;

        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Ok(Self::Yaml)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(Error::UnsupportedConfigFormat(ext.to_string()))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSettings {
    pub kind: CostKind,
    #[serde(flatten)]
    pub params: CostParams,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    pub cost: CostSettings,
    pub heuristic: HeuristicKind,
    /// Voxel spacing. Steps fall back to unit spacing when absent, the
    /// Euclidean heuristic does not.
    pub calibration: Option<Calibration>,
    pub search: SearchConfig,
}

impl TracerConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yml::from_str(yaml).map_err(|err| Error::ConfigParse(err.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::ConfigParse(err.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self).map_err(|err| Error::ConfigParse(err.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| Error::ConfigParse(err.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;
        match format {
            ConfigFormat::Yaml => Self::from_yaml(&contents),
            ConfigFormat::Json => Self::from_json(&contents),
        }
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration.clone().unwrap_or_default()
    }

    pub fn cost_model(&self, stats: &VolumeStats) -> Result<CostModel> {
        CostModel::from_stats(self.cost.kind, stats, &self.cost.params)
    }

    /// Fails with [`Error::MissingCalibration`] when a distance heuristic is
    /// configured without a calibration; no unit spacing is assumed for it.
    pub fn heuristic_model(&self) -> Result<HeuristicModel> {
        HeuristicModel::new(self.heuristic, self.calibration.clone())
    }
}

/// Reads a [`TracerConfig`] from a `.yaml`, `.yml` or `.json` file.
pub fn load_config_file(path: impl AsRef<Path>) -> anyhow::Result<TracerConfig> {
    let path = path.as_ref();
    let config = TracerConfig::from_file(path)
        .with_context(|| format!("Failed to load tracer config from {}", path.display()))?;
    if let Some(calibration) = &config.calibration {
        calibration
            .validate()
            .with_context(|| format!("Invalid calibration in {}", path.display()))?;
    }
    config
        .heuristic_model()
        .with_context(|| format!("Invalid heuristic settings in {}", path.display()))?;
    log::info!(
        "Loaded tracer config from {}: {} cost, {} heuristic",
        path.display(),
        config.cost.kind,
        config.heuristic
    );
    Ok(config)
}
