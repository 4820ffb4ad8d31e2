//! Serializable configuration for the catalog and the generator.
//!
//! Both structs deserialize from TOML with every field optional; omitted
//! fields fall back to the reference configuration.

use hexterra_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Default number of rejection-sampling attempts per cell.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Default inclusive lower bound of the acceptance threshold.
pub const DEFAULT_THRESHOLD_MIN: i32 = 0;

/// Default inclusive upper bound of the acceptance threshold.
///
/// Tuned for the eight reference categories and their influence magnitudes.
pub const DEFAULT_THRESHOLD_MAX: i32 = 60;

/// A landscape category and its prior selection weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Display name, unique within a catalog (case-insensitive)
    pub name: String,
    /// Unconditioned selection weight (>= 0)
    pub base_weight: f32,
}

impl CategoryEntry {
    /// Creates a new category entry.
    pub fn new(name: impl Into<String>, base_weight: f32) -> Self {
        Self {
            name: name.into(),
            base_weight,
        }
    }
}

/// One entry of the influence table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEntry {
    /// Category exerting the influence (the neighbour)
    pub influencer: String,
    /// Category being influenced (the candidate)
    pub influencee: String,
    /// Signed influence value
    pub value: f32,
}

impl InfluenceEntry {
    /// Creates a new influence entry.
    pub fn new(influencer: impl Into<String>, influencee: impl Into<String>, value: f32) -> Self {
        Self {
            influencer: influencer.into(),
            influencee: influencee.into(),
            value,
        }
    }
}

/// Catalog configuration: categories in walk order plus the influence table.
///
/// Pairs missing from `influences` default to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Categories, in the order the weighted draw walks them
    pub categories: Vec<CategoryEntry>,
    /// Influence triples
    pub influences: Vec<InfluenceEntry>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::reference()
    }
}

impl CatalogConfig {
    /// The eight-category reference configuration.
    pub fn reference() -> Self {
        const NAMES: [&str; 8] = [
            "Plains",
            "Woods",
            "Cave",
            "Hills",
            "Mountains",
            "Lake",
            "Desert",
            "Swamp",
        ];
        // Rows are influencers, columns influencees, both in NAMES order.
        const TABLE: [[f32; 8]; 8] = [
            [10.0, 4.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0],
            [4.0, 9.0, 1.0, 1.0, 0.0, 1.0, -5.0, 2.0],
            [1.0, 1.0, -10.0, 2.0, 2.0, 0.0, -1.0, -2.0],
            [3.0, 2.0, 3.0, 2.0, 3.0, -1.0, 0.0, -2.0],
            [1.0, 1.0, 4.0, 5.0, 3.0, -2.0, -2.0, -2.0],
            [5.0, 3.0, 0.0, 0.0, 0.0, 2.0, -6.0, 2.0],
            [5.0, -5.0, -2.0, -1.0, -1.0, -4.0, 10.0, -5.0],
            [3.0, 4.0, 0.0, 0.0, -1.0, 3.0, -5.0, 3.0],
        ];

        let categories = NAMES.iter().map(|name| CategoryEntry::new(*name, 1.0)).collect();
        let influences = TABLE
            .iter()
            .zip(NAMES)
            .flat_map(|(row, influencer)| {
                row.iter()
                    .zip(NAMES)
                    .map(move |(&value, influencee)| InfluenceEntry::new(influencer, influencee, value))
            })
            .collect();

        Self {
            categories,
            influences,
        }
    }
}

/// Rejection-sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Candidate draws per cell before falling back to the last one
    pub max_attempts: u32,
    /// Inclusive lower bound of the acceptance threshold
    pub threshold_min: i32,
    /// Inclusive upper bound of the acceptance threshold
    pub threshold_max: i32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            threshold_min: DEFAULT_THRESHOLD_MIN,
            threshold_max: DEFAULT_THRESHOLD_MAX,
        }
    }
}

impl GeneratorSettings {
    /// Checks that the settings describe a usable sampler.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidSettings(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.threshold_min > self.threshold_max {
            return Err(ConfigError::InvalidSettings(format!(
                "threshold range [{}, {}] is empty",
                self.threshold_min, self.threshold_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_config_is_complete() {
        let config = CatalogConfig::reference();
        assert_eq!(config.categories.len(), 8);
        assert_eq!(config.influences.len(), 64);
        assert!(config.categories.iter().all(|c| c.base_weight == 1.0));
    }

    #[test]
    fn test_reference_influence_is_asymmetric() {
        let config = CatalogConfig::reference();
        let lookup = |from: &str, to: &str| {
            config
                .influences
                .iter()
                .find(|e| e.influencer == from && e.influencee == to)
                .map(|e| e.value)
        };
        assert_eq!(lookup("Lake", "Desert"), Some(-6.0));
        assert_eq!(lookup("Desert", "Lake"), Some(-4.0));
        assert_eq!(lookup("Woods", "Plains"), Some(4.0));
    }

    #[test]
    fn test_settings_validation() {
        assert!(GeneratorSettings::default().validate().is_ok());

        let zero = GeneratorSettings {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::InvalidSettings(_))));

        let inverted = GeneratorSettings {
            threshold_min: 10,
            threshold_max: 5,
            ..Default::default()
        };
        assert!(matches!(inverted.validate(), Err(ConfigError::InvalidSettings(_))));
    }

    #[test]
    fn test_settings_partial_toml() {
        let settings: GeneratorSettings = toml::from_str("max_attempts = 7").expect("parse failed");
        assert_eq!(settings.max_attempts, 7);
        assert_eq!(settings.threshold_min, DEFAULT_THRESHOLD_MIN);
        assert_eq!(settings.threshold_max, DEFAULT_THRESHOLD_MAX);
    }
}
