//! Snell's law with complex refractive indices.
//!
//! The arcsine here is the complex principal branch; the real `f64::asin`
//! returns NaN past the critical angle and must not be used.

use num_complex::Complex64;

pub use crate::constants::REALITY_TOLERANCE;
use crate::error::{EllipsometryError, Result};

/// Returns the conserved transverse quantity `n0 sin th0`.
///
/// Fails when its imaginary part is not negligible: the incident wave would
/// then vary in intensity along the interface.
pub fn check_incidence(n_0: Complex64, th_0: f64) -> Result<Complex64> {
    let n0_sin = n_0 * th_0.sin();
    if n0_sin.im.abs() >= REALITY_TOLERANCE || !n0_sin.im.is_finite() {
        return Err(EllipsometryError::NonPhysicalIncidence {
            theta: th_0,
            residual: n0_sin.im,
        });
    }
    Ok(n0_sin)
}

/// Whether `theta` describes a forward-travelling wave in a medium of index `n`.
///
/// Forward means decaying (`Im(n cos th) > 0`), or moving away from the
/// interface (`Re(n cos th) > 0`) when the medium is lossless.
pub fn is_forward_angle(n: Complex64, theta: Complex64) -> bool {
    let ncostheta = n * theta.cos();
    if ncostheta.im.abs() > REALITY_TOLERANCE {
        ncostheta.im > 0.0
    } else {
        ncostheta.re > 0.0
    }
}

/// Propagation angle in every layer of a stack illuminated at `th_0`.
///
/// Interior layers keep the principal value; the two semi-infinite media
/// are flipped to `pi - theta` if the principal value is a backward wave.
pub fn layer_angles(n_list: &[Complex64], th_0: f64) -> Result<Vec<Complex64>> {
    let Some(&n_0) = n_list.first() else {
        return Err(EllipsometryError::StackTooShort(0));
    };
    let n0_sin = check_incidence(n_0, th_0)?;

    let mut angles: Vec<Complex64> = n_list.iter().map(|&n| (n0_sin / n).asin()).collect();

    let last = angles.len() - 1;
    for i in [0, last] {
        if !is_forward_angle(n_list[i], angles[i]) {
            tracing::trace!(layer = i, "flipping backward-wave angle");
            angles[i] = std::f64::consts::PI - angles[i];
        }
    }
    Ok(angles)
}
