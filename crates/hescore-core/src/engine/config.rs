use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoorDefaults {
    pub area_ft2: f64,
    pub r_value: f64,
}

impl Default for DoorDefaults {
    fn default() -> Self {
        Self {
            area_ft2: 40.0,
            r_value: 4.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuctDefaults {
    /// Leakage to outside in CFM25 per ft² of conditioned floor area, for ducts outside
    /// conditioned space.
    pub leakage_cfm25_per_ft2_unsealed: f64,
    pub leakage_cfm25_per_ft2_sealed: f64,
    pub insulated_r_value: f64,
}

impl Default for DuctDefaults {
    fn default() -> Self {
        Self {
            leakage_cfm25_per_ft2_unsealed: 0.12,
            leakage_cfm25_per_ft2_sealed: 0.06,
            insulated_r_value: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslationConfig {
    /// Run the transformation even when the input violates the content model.
    pub skip_validation: bool,
    pub schema_version: String,
    pub door: DoorDefaults,
    pub ducts: DuctDefaults,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            skip_validation: false,
            schema_version: "3.0".to_string(),
            door: DoorDefaults::default(),
            ducts: DuctDefaults::default(),
        }
    }
}

impl TranslationConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_version.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "schema_version",
                reason: "must not be empty".to_string(),
            });
        }
        positive("door.area_ft2", self.door.area_ft2)?;
        positive("door.r_value", self.door.r_value)?;
        non_negative(
            "ducts.leakage_cfm25_per_ft2_unsealed",
            self.ducts.leakage_cfm25_per_ft2_unsealed,
        )?;
        non_negative(
            "ducts.leakage_cfm25_per_ft2_sealed",
            self.ducts.leakage_cfm25_per_ft2_sealed,
        )?;
        positive("ducts.insulated_r_value", self.ducts.insulated_r_value)
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("must be positive (got {value})"),
        })
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("must not be negative (got {value})"),
        })
    }
}

#[derive(Default)]
pub struct TranslationConfigBuilder {
    skip_validation: Option<bool>,
    schema_version: Option<String>,
    door_area_ft2: Option<f64>,
    door_r_value: Option<f64>,
    duct_leakage_unsealed: Option<f64>,
    duct_leakage_sealed: Option<f64>,
    duct_insulated_r_value: Option<f64>,
}

impl TranslationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = Some(skip);
        self
    }
    pub fn schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = Some(version.into());
        self
    }
    pub fn door_area_ft2(mut self, area: f64) -> Self {
        self.door_area_ft2 = Some(area);
        self
    }
    pub fn door_r_value(mut self, r_value: f64) -> Self {
        self.door_r_value = Some(r_value);
        self
    }
    pub fn duct_leakage_unsealed(mut self, cfm25_per_ft2: f64) -> Self {
        self.duct_leakage_unsealed = Some(cfm25_per_ft2);
        self
    }
    pub fn duct_leakage_sealed(mut self, cfm25_per_ft2: f64) -> Self {
        self.duct_leakage_sealed = Some(cfm25_per_ft2);
        self
    }
    pub fn duct_insulated_r_value(mut self, r_value: f64) -> Self {
        self.duct_insulated_r_value = Some(r_value);
        self
    }

    pub fn build(self) -> Result<TranslationConfig, ConfigError> {
        let defaults = TranslationConfig::default();
        let config = TranslationConfig {
            skip_validation: self.skip_validation.unwrap_or(defaults.skip_validation),
            schema_version: self.schema_version.unwrap_or(defaults.schema_version),
            door: DoorDefaults {
                area_ft2: self.door_area_ft2.unwrap_or(defaults.door.area_ft2),
                r_value: self.door_r_value.unwrap_or(defaults.door.r_value),
            },
            ducts: DuctDefaults {
                leakage_cfm25_per_ft2_unsealed: self
                    .duct_leakage_unsealed
                    .unwrap_or(defaults.ducts.leakage_cfm25_per_ft2_unsealed),
                leakage_cfm25_per_ft2_sealed: self
                    .duct_leakage_sealed
                    .unwrap_or(defaults.ducts.leakage_cfm25_per_ft2_sealed),
                insulated_r_value: self
                    .duct_insulated_r_value
                    .unwrap_or(defaults.ducts.insulated_r_value),
            },
        };
        config.validate()?;
        Ok(config)
    }
}
