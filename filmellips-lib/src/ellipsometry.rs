//! Ellipsometric angles Psi and Delta of a layer stack.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{EllipsometryError, Result};
use crate::tmm::{TmmPoint, coh_tmm};
use filmellips_data::{DeltaPsiRecord, LayerRow};

/// Psi and Delta in degrees, one entry per query point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaPsi {
    pub psi: Vec<f64>,
    pub delta: Vec<f64>,
}

impl DeltaPsi {
    pub fn len(&self) -> usize {
        self.psi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.psi.is_empty()
    }

    /// `(psi, delta)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.psi.iter().copied().zip(self.delta.iter().copied())
    }

    /// Attach the query coordinates to each point.
    ///
    /// `aoi` and `wavelength` are broadcast the same way as the query that
    /// produced this result.
    pub fn to_records(&self, aoi: &[f64], wavelength: &[f64]) -> Result<Vec<DeltaPsiRecord>> {
        let queries = crate::tmm::broadcast(aoi, wavelength)?;
        if queries.len() != self.len() {
            return Err(EllipsometryError::ShapeMismatch {
                angles: aoi.len(),
                wavelengths: wavelength.len(),
            });
        }
        Ok(queries
            .iter()
            .zip(self.iter())
            .map(|(q, (psi, delta))| DeltaPsiRecord {
                aoi: q.theta,
                wavelength: q.wavelength,
                psi,
                delta,
            })
            .collect())
    }
}

/// Complex refractive indices and thicknesses of a stack.
///
/// The fronting medium cannot absorb, so its extinction coefficient is
/// dropped. Both boundary media get infinite thickness.
pub fn stack_optics(layers: &[LayerRow]) -> Result<(Vec<Complex64>, Vec<f64>)> {
    if layers.len() < 2 {
        return Err(EllipsometryError::StackTooShort(layers.len()));
    }
    let last = layers.len() - 1;

    let n_list: Vec<Complex64> = layers
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let k = if i == 0 { 0.0 } else { row.extinction_coefficient };
            Complex64::new(row.refractive_index, k)
        })
        .collect();
    let d_list: Vec<f64> = layers
        .iter()
        .enumerate()
        .map(|(i, row)| if i == 0 || i == last { f64::INFINITY } else { row.thickness })
        .collect();

    Ok((n_list, d_list))
}

/// Psi and Delta (radians) from the s and p reflection amplitudes.
///
/// Delta lies in `(0, 2pi]`.
pub fn psi_delta(r_p: Complex64, r_s: Complex64) -> (f64, f64) {
    let rho = r_p / r_s;
    let psi = rho.norm().atan();
    let delta = (-rho).inv().arg() + PI;
    (psi, delta)
}

/// Mirror Delta about pi, as some instrument software reports it.
pub fn reflect_delta(delta: f64) -> f64 {
    if delta > PI { 2.0 * PI - delta } else { delta }
}

fn check_wavelength(wavelength: f64) -> Result<()> {
    if wavelength.is_finite() && wavelength > 0.0 {
        Ok(())
    } else {
        Err(EllipsometryError::InvalidWavelength(wavelength))
    }
}

fn to_degrees(points: &[TmmPoint], delta_offset: f64, reflect: bool) -> DeltaPsi {
    let (psi, delta): (Vec<f64>, Vec<f64>) = points
        .iter()
        .map(|pt| {
            let (psi, delta) = psi_delta(pt.p.r, pt.s.r);
            let delta = if reflect { reflect_delta(delta) } else { delta };
            (psi.to_degrees(), delta.to_degrees() + delta_offset)
        })
        .unzip();
    DeltaPsi { psi, delta }
}

/// Psi and Delta of a layer stack using the transfer matrix method.
///
/// # Arguments
/// * `aoi` - Angles of incidence in degrees
/// * `layers` - Layer stack, fronting medium first (at least 2 rows)
/// * `wavelength` - Vacuum wavelength in nm
/// * `delta_offset` - Calibration offset added to Delta (degrees)
/// * `reflect` - Mirror Delta values above 180° to `360° - Delta`
pub fn compute_delta_psi(
    aoi: &[f64],
    layers: &[LayerRow],
    wavelength: f64,
    delta_offset: f64,
    reflect: bool,
) -> Result<DeltaPsi> {
    check_wavelength(wavelength)?;
    let (n_list, d_list) = stack_optics(layers)?;
    let th_0: Vec<f64> = aoi.iter().map(|a| a.to_radians()).collect();

    let points = coh_tmm(&n_list, &d_list, &th_0, &[wavelength])?;
    Ok(to_degrees(&points, delta_offset, reflect))
}

/// Like [`compute_delta_psi`], with angles broadcast against several
/// wavelengths.
pub fn compute_delta_psi_records(
    aoi: &[f64],
    wavelengths: &[f64],
    layers: &[LayerRow],
    delta_offset: f64,
    reflect: bool,
) -> Result<Vec<DeltaPsiRecord>> {
    for &wavelength in wavelengths {
        check_wavelength(wavelength)?;
    }
    let (n_list, d_list) = stack_optics(layers)?;
    let th_0: Vec<f64> = aoi.iter().map(|a| a.to_radians()).collect();

    let points = coh_tmm(&n_list, &d_list, &th_0, wavelengths)?;
    to_degrees(&points, delta_offset, reflect).to_records(aoi, wavelengths)
}
