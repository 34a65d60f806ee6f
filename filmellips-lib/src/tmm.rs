//! Coherent transfer-matrix propagation through a stratified stack.
//!
//! Layer 0 is the semi-infinite medium the light enters from, the last
//! layer the semi-infinite medium it exits into. Every interior layer
//! contributes one 2x2 characteristic matrix; the running product of these
//! from front to back gives the net reflection and transmission amplitudes.

use std::f64::consts::PI;
use std::ops::Mul;

use num_complex::Complex64;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use crate::constants::OPACITY_LIMIT;
use crate::error::{EllipsometryError, Result};
use crate::fresnel::{InterfaceCoefficients, Polarization, interfaces};
use crate::snell::layer_angles;

/// 2x2 complex matrix relating forward/backward amplitudes on either side
/// of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicMatrix {
    pub m00: Complex64,
    pub m01: Complex64,
    pub m10: Complex64,
    pub m11: Complex64,
}

impl CharacteristicMatrix {
    /// Entry into the stack: `(1/t) [[1, r], [r, 1]]`.
    pub fn interface(r: Complex64, t: Complex64) -> Self {
        let inv_t = t.inv();
        let r_t = r * inv_t;
        CharacteristicMatrix {
            m00: inv_t,
            m01: r_t,
            m10: r_t,
            m11: inv_t,
        }
    }

    /// Propagation through a layer of phase thickness `delta`, then across
    /// the interface `(r, t)` leading out of it.
    pub fn layer(delta: Complex64, r: Complex64, t: Complex64) -> Self {
        let beta = (Complex64::i() * delta).exp();
        let beta_inv = beta.inv();
        let inv_t = t.inv();
        CharacteristicMatrix {
            m00: beta_inv * inv_t,
            m01: r * beta_inv * inv_t,
            m10: r * beta * inv_t,
            m11: beta * inv_t,
        }
    }

    /// Net reflection amplitude of the whole stack.
    pub fn reflection(&self) -> Complex64 {
        self.m10 / self.m00
    }

    /// Net transmission amplitude of the whole stack.
    pub fn transmission(&self) -> Complex64 {
        self.m00.inv()
    }
}

impl Mul for CharacteristicMatrix {
    type Output = CharacteristicMatrix;

    fn mul(self, rhs: CharacteristicMatrix) -> CharacteristicMatrix {
        CharacteristicMatrix {
            m00: self.m00 * rhs.m00 + self.m01 * rhs.m10,
            m01: self.m00 * rhs.m01 + self.m01 * rhs.m11,
            m10: self.m10 * rhs.m00 + self.m11 * rhs.m10,
            m11: self.m10 * rhs.m01 + self.m11 * rhs.m11,
        }
    }
}

/// One (angle of incidence, vacuum wavelength) combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPoint {
    /// Angle of incidence in the fronting medium (radians)
    pub theta: f64,
    /// Vacuum wavelength (same length unit as the layer thicknesses)
    pub wavelength: f64,
}

/// Net complex amplitudes for one polarization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amplitudes {
    pub r: Complex64,
    pub t: Complex64,
}

/// s and p amplitudes at one query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TmmPoint {
    pub s: Amplitudes,
    pub p: Amplitudes,
}

impl TmmPoint {
    pub fn get(&self, polarization: Polarization) -> Amplitudes {
        match polarization {
            Polarization::S => self.s,
            Polarization::P => self.p,
        }
    }
}

/// Pair angles with wavelengths.
///
/// Equal lengths zip element-wise; a single value on either side is
/// repeated against the other.
pub fn broadcast(th_0: &[f64], lam_vac: &[f64]) -> Result<Vec<QueryPoint>> {
    let point = |theta, wavelength| QueryPoint { theta, wavelength };
    match (th_0.len(), lam_vac.len()) {
        (a, b) if a == b => Ok(th_0
            .iter()
            .zip(lam_vac)
            .map(|(&t, &l)| point(t, l))
            .collect()),
        (_, 1) => Ok(th_0.iter().map(|&t| point(t, lam_vac[0])).collect()),
        (1, _) => Ok(lam_vac.iter().map(|&l| point(th_0[0], l)).collect()),
        (angles, wavelengths) => Err(EllipsometryError::ShapeMismatch {
            angles,
            wavelengths,
        }),
    }
}

/// Phase accrued crossing a layer of thickness `d`, with the imaginary part
/// capped at [`OPACITY_LIMIT`].
pub fn phase_thickness(kz: Complex64, d: f64) -> Complex64 {
    let delta = kz * d;
    if delta.im > OPACITY_LIMIT {
        tracing::trace!(im = delta.im, "clamping opaque layer phase");
        Complex64::new(delta.re, OPACITY_LIMIT)
    } else {
        delta
    }
}

fn solve_polarization(
    polarization: Polarization,
    n_list: &[Complex64],
    th_list: &[Complex64],
    deltas: &[Complex64],
) -> Amplitudes {
    let coeffs = interfaces(polarization, n_list, th_list);
    let InterfaceCoefficients { r, t } = coeffs[0];

    let m_tilde = deltas
        .iter()
        .zip(&coeffs[1..])
        .fold(CharacteristicMatrix::interface(r, t), |acc, (&delta, next)| {
            acc * CharacteristicMatrix::layer(delta, next.r, next.t)
        });

    Amplitudes {
        r: m_tilde.reflection(),
        t: m_tilde.transmission(),
    }
}

/// Transfer-matrix solution at a single query point.
///
/// `d_list` holds one thickness per layer; the first and last entries are
/// never read.
pub fn coh_tmm_point(
    n_list: &[Complex64],
    d_list: &[f64],
    query: QueryPoint,
) -> Result<TmmPoint> {
    let num_layers = n_list.len();
    if num_layers < 2 {
        return Err(EllipsometryError::StackTooShort(num_layers));
    }
    if d_list.len() != num_layers {
        return Err(EllipsometryError::LengthMismatch {
            indices: num_layers,
            thicknesses: d_list.len(),
        });
    }

    let th_list = layer_angles(n_list, query.theta)?;

    // kz: forward wavevector normal to the layers; positive imaginary part decays
    let deltas: Vec<Complex64> = (1..num_layers - 1)
        .map(|i| {
            let kz = 2.0 * PI * n_list[i] * th_list[i].cos() / query.wavelength;
            phase_thickness(kz, d_list[i])
        })
        .collect();

    Ok(TmmPoint {
        s: solve_polarization(Polarization::S, n_list, &th_list, &deltas),
        p: solve_polarization(Polarization::P, n_list, &th_list, &deltas),
    })
}

/// Transfer-matrix solution over every broadcast (angle, wavelength) pair.
///
/// # Arguments
/// * `n_list` - Complex refractive index per layer, front to back
/// * `d_list` - Thickness per layer (first and last ignored)
/// * `th_0` - Angles of incidence in radians
/// * `lam_vac` - Vacuum wavelengths, broadcast against `th_0`
pub fn coh_tmm(
    n_list: &[Complex64],
    d_list: &[f64],
    th_0: &[f64],
    lam_vac: &[f64],
) -> Result<Vec<TmmPoint>> {
    if n_list.len() < 2 {
        return Err(EllipsometryError::StackTooShort(n_list.len()));
    }
    let queries = broadcast(th_0, lam_vac)?;
    tracing::debug!(
        layers = n_list.len(),
        points = queries.len(),
        "running transfer matrix"
    );

    #[cfg(feature = "parallel")]
    let points: Result<Vec<TmmPoint>> = queries
        .par_iter()
        .map(|&q| coh_tmm_point(n_list, d_list, q))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let points: Result<Vec<TmmPoint>> = queries
        .iter()
        .map(|&q| coh_tmm_point(n_list, d_list, q))
        .collect();

    points
}
