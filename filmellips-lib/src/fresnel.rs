//! Fresnel amplitude coefficients at a single planar interface.
//!
//! All inputs are complex: `n_i`/`n_f` are the refractive indices of the
//! incident and final media, `th_i`/`th_f` the (possibly complex)
//! propagation angles in each medium.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Polarization channel of the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarization {
    /// Electric field perpendicular to the plane of incidence
    S,
    /// Electric field parallel to the plane of incidence
    P,
}

impl Polarization {
    pub const ALL: [Polarization; 2] = [Polarization::S, Polarization::P];
}

/// Reflection and transmission amplitude across one interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceCoefficients {
    pub r: Complex64,
    pub t: Complex64,
}

pub fn interface_r_s(
    n_i: Complex64,
    n_f: Complex64,
    th_i: Complex64,
    th_f: Complex64,
) -> Complex64 {
    let a = n_i * th_i.cos();
    let b = n_f * th_f.cos();
    (a - b) / (a + b)
}

pub fn interface_r_p(
    n_i: Complex64,
    n_f: Complex64,
    th_i: Complex64,
    th_f: Complex64,
) -> Complex64 {
    let a = n_f * th_i.cos();
    let b = n_i * th_f.cos();
    (a - b) / (a + b)
}

pub fn interface_t_s(
    n_i: Complex64,
    n_f: Complex64,
    th_i: Complex64,
    th_f: Complex64,
) -> Complex64 {
    let a = n_i * th_i.cos();
    2.0 * a / (a + n_f * th_f.cos())
}

pub fn interface_t_p(
    n_i: Complex64,
    n_f: Complex64,
    th_i: Complex64,
    th_f: Complex64,
) -> Complex64 {
    2.0 * n_i * th_i.cos() / (n_f * th_i.cos() + n_i * th_f.cos())
}

/// Both coefficients for one polarization.
///
/// A zero denominator is a true optical singularity and yields NaN/Inf.
pub fn interface(
    polarization: Polarization,
    n_i: Complex64,
    n_f: Complex64,
    th_i: Complex64,
    th_f: Complex64,
) -> InterfaceCoefficients {
    match polarization {
        Polarization::S => InterfaceCoefficients {
            r: interface_r_s(n_i, n_f, th_i, th_f),
            t: interface_t_s(n_i, n_f, th_i, th_f),
        },
        Polarization::P => InterfaceCoefficients {
            r: interface_r_p(n_i, n_f, th_i, th_f),
            t: interface_t_p(n_i, n_f, th_i, th_f),
        },
    }
}

/// Coefficients for every adjacent pair `(j, j + 1)` of a stack.
///
/// `n_list` and `th_list` must have the same length; the result has one
/// entry fewer.
pub fn interfaces(
    polarization: Polarization,
    n_list: &[Complex64],
    th_list: &[Complex64],
) -> Vec<InterfaceCoefficients> {
    debug_assert_eq!(n_list.len(), th_list.len());
    n_list
        .windows(2)
        .zip(th_list.windows(2))
        .map(|(n, th)| interface(polarization, n[0], n[1], th[0], th[1]))
        .collect()
}
