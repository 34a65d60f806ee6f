//! Ellipsometry model: binds a layer structure to instrument settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::ellipsometry::{DeltaPsi, compute_delta_psi};
use crate::error::{EllipsometryError, Result};
use filmellips_data::LayerRow;

/// Anything that can be resolved into an ordered list of slabs.
///
/// Implementors may expand roughness into graded sub-layers or tie layer
/// values to fit parameters; the model only ever sees the resolved rows.
pub trait Structure {
    /// Layer rows, fronting medium first.
    fn slabs(&self) -> Vec<LayerRow>;

    /// Extra log-probability contributed by the structure itself.
    fn logp(&self) -> f64 {
        0.0
    }
}

impl Structure for Vec<LayerRow> {
    fn slabs(&self) -> Vec<LayerRow> {
        self.clone()
    }
}

/// A plain stack of slabs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack {
    layers: Vec<LayerRow>,
}

impl Stack {
    /// Start a stack with a non-absorbing fronting medium.
    pub fn new(fronting_index: f64) -> Self {
        Stack {
            layers: vec![LayerRow::semi_infinite(fronting_index, 0.0)],
        }
    }

    pub fn from_rows(layers: Vec<LayerRow>) -> Self {
        Stack { layers }
    }

    /// Append a finite film.
    pub fn layer(mut self, thickness: f64, n: f64, k: f64, roughness: f64) -> Self {
        self.layers.push(LayerRow::new(thickness, n, k, roughness));
        self
    }

    /// Terminate with the semi-infinite backing medium.
    pub fn backing(mut self, n: f64, k: f64, roughness: f64) -> Self {
        self.layers.push(LayerRow {
            roughness,
            ..LayerRow::semi_infinite(n, k)
        });
        self
    }

    pub fn rows(&self) -> &[LayerRow] {
        &self.layers
    }

    pub fn rows_mut(&mut self) -> &mut [LayerRow] {
        &mut self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Structure for Stack {
    fn slabs(&self) -> Vec<LayerRow> {
        self.layers.clone()
    }
}

/// Forward model for a single-wavelength ellipsometry measurement.
#[derive(Debug, Clone)]
pub struct EllipsometryModel<S> {
    structure: S,
    wavelength: f64,
    delta_offset: f64,
    reflect_delta: bool,
    name: Option<String>,
}

impl<S: Structure> EllipsometryModel<S> {
    /// # Arguments
    /// * `structure` - Layer structure
    /// * `wavelength` - Probe wavelength in nm
    pub fn new(structure: S, wavelength: f64) -> Self {
        EllipsometryModel {
            structure,
            wavelength,
            delta_offset: 0.0,
            reflect_delta: false,
            name: None,
        }
    }

    pub fn with_delta_offset(mut self, delta_offset: f64) -> Self {
        self.delta_offset = delta_offset;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Psi and Delta (degrees) at the given angles of incidence (degrees).
    pub fn model(&self, aoi: &[f64]) -> Result<DeltaPsi> {
        let slabs = self.structure.slabs();
        tracing::debug!(
            name = self.name.as_deref().unwrap_or(""),
            wavelength = self.wavelength,
            layers = slabs.len(),
            "evaluating ellipsometry model"
        );
        compute_delta_psi(
            aoi,
            &slabs,
            self.wavelength,
            self.delta_offset,
            self.reflect_delta,
        )
    }

    /// Log-probability of the structure, added to the fit likelihood.
    pub fn logp(&self) -> f64 {
        self.structure.logp()
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn set_wavelength(&mut self, wavelength: f64) {
        self.wavelength = wavelength;
    }

    pub fn delta_offset(&self) -> f64 {
        self.delta_offset
    }

    pub fn set_delta_offset(&mut self, delta_offset: f64) {
        self.delta_offset = delta_offset;
    }

    pub fn reflect_delta(&self) -> bool {
        self.reflect_delta
    }

    /// Mirror Delta values above 180° (WVASE-style reporting).
    pub fn set_reflect_delta(&mut self, reflect: bool) {
        self.reflect_delta = reflect;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn structure(&self) -> &S {
        &self.structure
    }

    pub fn structure_mut(&mut self) -> &mut S {
        &mut self.structure
    }

    pub fn set_structure(&mut self, structure: S) {
        self.structure = structure;
    }

    /// Instrument parameters in fit order: wavelength, then delta offset.
    pub fn instrument_parameters(&self) -> [(&'static str, f64); 2] {
        [
            ("wavelength", self.wavelength),
            ("delta offset", self.delta_offset),
        ]
    }

    /// Update the instrument parameters from resolved fit values.
    pub fn set_instrument_parameters(&mut self, values: &[f64]) -> Result<()> {
        let [wavelength, delta_offset] = values else {
            return Err(EllipsometryError::ParameterCount {
                expected: 2,
                actual: values.len(),
            });
        };
        self.wavelength = *wavelength;
        self.delta_offset = *delta_offset;
        Ok(())
    }
}

impl EllipsometryModel<Stack> {
    /// Build a model over a plain [`Stack`] from a validated config.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(EllipsometryModel {
            structure: Stack::from_rows(config.layers.clone()),
            wavelength: config.wavelength,
            delta_offset: config.delta_offset,
            reflect_delta: config.reflect_delta,
            name: config.name.clone(),
        })
    }
}

impl<S> fmt::Display for EllipsometryModel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EllipsometryModel(name={:?}, wavelength={} nm, delta_offset={}°)",
            self.name, self.wavelength, self.delta_offset
        )
    }
}
