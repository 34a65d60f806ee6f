use serde::{Deserialize, Serialize};

use crate::constants::HENE_WAVELENGTH;
use crate::error::{EllipsometryError, Result};
use filmellips_data::LayerRow;

/// Serializable description of a model: instrument settings plus the
/// layer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Probe wavelength (nm)
    pub wavelength: f64,
    /// Calibration offset added to Delta (degrees)
    pub delta_offset: f64,
    /// Mirror Delta values above 180°
    pub reflect_delta: bool,
    pub name: Option<String>,
    /// Fronting medium first, backing medium last
    pub layers: Vec<LayerRow>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            wavelength: HENE_WAVELENGTH,
            delta_offset: 0.0,
            reflect_delta: false,
            name: None,
            layers: Vec::new(),
        }
    }
}

impl ModelConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ModelConfig = serde_json::from_str(json)
            .map_err(|e| EllipsometryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.wavelength.is_finite() && self.wavelength > 0.0) {
            return Err(EllipsometryError::InvalidWavelength(self.wavelength));
        }
        if self.layers.len() < 2 {
            return Err(EllipsometryError::StackTooShort(self.layers.len()));
        }
        if !self.delta_offset.is_finite() {
            return Err(EllipsometryError::InvalidConfig(format!(
                "delta_offset must be finite, got {}",
                self.delta_offset
            )));
        }
        for (i, row) in self.layers.iter().enumerate() {
            if row.extinction_coefficient < 0.0 {
                return Err(EllipsometryError::InvalidConfig(format!(
                    "layer {i}: extinction coefficient {} is negative",
                    row.extinction_coefficient
                )));
            }
            let interior = i > 0 && i < self.layers.len() - 1;
            if interior && !(row.thickness.is_finite() && row.thickness >= 0.0) {
                return Err(EllipsometryError::InvalidConfig(format!(
                    "layer {i}: thickness {} nm is not a finite non-negative value",
                    row.thickness
                )));
            }
        }
        Ok(())
    }
}
