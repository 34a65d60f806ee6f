#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One row of a stratified layer stack, ordered from the fronting medium
/// (row 0) to the backing medium (last row).
///
/// The thickness of the first and last rows is ignored: both media are
/// semi-infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerRow {
    /// Thickness (nm)
    #[serde(default)]
    pub thickness: f64,
    /// Real part of the refractive index
    pub refractive_index: f64,
    /// Imaginary part of the refractive index (absorption, k >= 0)
    #[serde(default)]
    pub extinction_coefficient: f64,
    /// Roughness between this layer and the one above it (nm)
    #[serde(default)]
    pub roughness: f64,
}

impl LayerRow {
    pub const fn new(
        thickness: f64,
        refractive_index: f64,
        extinction_coefficient: f64,
        roughness: f64,
    ) -> Self {
        LayerRow {
            thickness,
            refractive_index,
            extinction_coefficient,
            roughness,
        }
    }

    /// A semi-infinite medium (fronting or backing).
    pub const fn semi_infinite(refractive_index: f64, extinction_coefficient: f64) -> Self {
        LayerRow::new(f64::INFINITY, refractive_index, extinction_coefficient, 0.0)
    }

    /// Row from a `[thickness, n, k, roughness]` array.
    pub fn from_array(row: [f64; 4]) -> Self {
        LayerRow::new(row[0], row[1], row[2], row[3])
    }
}

/// Build layer rows from a flat row-major `[thickness, n, k, roughness]*` slice.
///
/// Returns `None` if the slice length is not a multiple of four.
pub fn rows_from_flat(flat: &[f64]) -> Option<Vec<LayerRow>> {
    if flat.len() % 4 != 0 {
        return None;
    }
    Some(
        flat.chunks_exact(4)
            .map(|c| LayerRow::from_array([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

/// A single ellipsometric observation or model prediction.
///
/// Units match what instrument readers produce: degrees for angles,
/// nanometres for wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaPsiRecord {
    pub aoi: f64,
    pub wavelength: f64,
    pub psi: f64,
    pub delta: f64,
}
