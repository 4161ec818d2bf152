//! Engine configuration
//!
//! Every field has a default, so an empty YAML/JSON document is a valid config.

use crate::error::{SociogramError, SociogramResult};
use crate::rating::SymbolTable;
use serde::{Deserialize, Serialize};
use sociogram_algorithms::SpringConfig;
use std::collections::BTreeMap;
use std::path::Path;

/// Spring layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Seed for the initial placement; identical input and seed give identical layouts
    pub seed: u64,
    /// Relaxation step cap
    pub iterations: usize,
    /// Optimal pair distance, `None` for `sqrt(1 / n)`
    pub k: Option<f64>,
    /// Largest absolute coordinate of the final layout
    pub scale: f64,
    /// Early-stop threshold on the mean step length
    pub threshold: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        SpringConfig::default().into()
    }
}

impl From<SpringConfig> for LayoutConfig {
    fn from(spring: SpringConfig) -> Self {
        Self {
            seed: spring.seed,
            iterations: spring.iterations,
            k: spring.k,
            scale: spring.scale,
            threshold: spring.threshold,
        }
    }
}

impl LayoutConfig {
    pub fn to_spring_config(&self) -> SpringConfig {
        SpringConfig {
            seed: self.seed,
            iterations: self.iterations,
            k: self.k,
            scale: self.scale,
            threshold: self.threshold,
        }
    }
}

/// Cohesion group parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohesionConfig {
    /// Radius of the disk drawn around groups that have no hull
    pub disk_radius: f64,
    /// Smallest component reported as a group, never below 2
    pub min_group_size: usize,
}

impl Default for CohesionConfig {
    fn default() -> Self {
        Self {
            disk_radius: 0.05,
            min_group_size: 2,
        }
    }
}

impl CohesionConfig {
    /// `min_group_size` with singletons ruled out
    pub fn effective_min_group_size(&self) -> usize {
        self.min_group_size.max(2)
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SociogramConfig {
    pub layout: LayoutConfig,
    pub cohesion: CohesionConfig,
    /// Extra or replacement token weights merged over the built-in table
    pub symbols: Option<BTreeMap<String, f64>>,
}

impl SociogramConfig {
    pub fn from_yaml_str(s: &str) -> SociogramResult<Self> {
        let config: SociogramConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> SociogramResult<Self> {
        let config: SociogramConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` is read as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> SociogramResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> SociogramResult<()> {
        let layout = &self.layout;
        if let Some(k) = layout.k {
            if !(k.is_finite() && k > 0.0) {
                return Err(invalid(format!("layout.k must be positive, got {}", k)));
            }
        }
        if !(layout.scale.is_finite() && layout.scale > 0.0) {
            return Err(invalid(format!("layout.scale must be positive, got {}", layout.scale)));
        }
        if !(layout.threshold.is_finite() && layout.threshold >= 0.0) {
            return Err(invalid(format!(
                "layout.threshold must be non-negative, got {}",
                layout.threshold
            )));
        }
        let radius = self.cohesion.disk_radius;
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(invalid(format!("cohesion.disk_radius must be non-negative, got {}", radius)));
        }
        self.symbol_table().map(|_| ())
    }

    /// Built-in symbol table with configured overrides applied
    pub fn symbol_table(&self) -> SociogramResult<SymbolTable> {
        match &self.symbols {
            Some(overrides) => SymbolTable::with_overrides(overrides),
            None => Ok(SymbolTable::default()),
        }
    }
}

fn invalid(msg: String) -> SociogramError {
    SociogramError::InvalidConfig(msg)
}
